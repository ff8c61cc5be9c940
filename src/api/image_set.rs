// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Success payload shared by the generate and variations endpoints

use serde::{Deserialize, Serialize};

use crate::provider::{ProviderImage, FAN_OUT};

/// `{ "images": [...] }`, always `FAN_OUT` entries long
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageSetResponse {
    pub images: Vec<String>,
}

impl ImageSetResponse {
    /// Flatten provider results in order. Entries without a URL become `""`
    /// and short result lists are padded, so one bad item never fails the call.
    pub fn from_provider(results: Vec<ProviderImage>) -> Self {
        let mut images: Vec<String> = results
            .into_iter()
            .take(FAN_OUT)
            .map(|image| image.url.unwrap_or_default())
            .collect();
        images.resize(FAN_OUT, String::new());

        Self { images }
    }
}
