// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Variation request types and validation

use serde::{Deserialize, Serialize};

/// Request body for POST /variations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariationRequest {
    /// URL of the source image
    #[serde(default)]
    pub image: Option<String>,
}

impl VariationRequest {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
        }
    }

    /// Return the image reference if it is present and not blank
    pub fn validate(&self) -> Result<&str, String> {
        match self.image.as_deref() {
            Some(image) if !image.trim().is_empty() => Ok(image),
            _ => Err("Valid image URL is required".to_string()),
        }
    }
}
