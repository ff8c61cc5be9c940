// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation request types and validation

use serde::{Deserialize, Serialize};

/// Request body for POST /generate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Text prompt describing the desired images
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
        }
    }

    /// Return the prompt if it is present and not blank
    pub fn validate(&self) -> Result<&str, String> {
        match self.prompt.as_deref() {
            Some(prompt) if !prompt.trim().is_empty() => Ok(prompt),
            _ => Err("Prompt is required".to_string()),
        }
    }
}
