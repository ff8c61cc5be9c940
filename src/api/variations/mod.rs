// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image variations endpoint module
//!
//! Provides POST /variations, returning four variations of an existing image.

pub mod handler;
pub mod request;

pub use handler::variations_handler;
pub use request::VariationRequest;
