// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-to-image endpoint module
//!
//! Provides POST /generate, returning four image URLs for a prompt.

pub mod handler;
pub mod request;

pub use handler::generate_handler;
pub use request::GenerationRequest;
