// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Same-origin download proxy module
//!
//! Provides GET /download?imageUrl=..., re-streaming a generated image as an attachment.

pub mod handler;
pub mod request;

pub use handler::{attachment_filename, download_handler};
pub use request::DownloadQuery;
