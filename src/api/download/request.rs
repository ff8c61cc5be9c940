// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Download proxy query parameters and validation

use serde::{Deserialize, Serialize};
use url::Url;

/// Query string of GET /download
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadQuery {
    /// Absolute URL of the image to proxy
    #[serde(default)]
    pub image_url: Option<String>,
}

impl DownloadQuery {
    /// Parse `imageUrl` into an absolute URL
    pub fn validate(&self) -> Result<Url, String> {
        let raw = match self.image_url.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Err("Missing or invalid imageUrl parameter".to_string()),
        };

        let url = Url::parse(raw).map_err(|_| "Invalid URL format provided".to_string())?;
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err("Invalid URL format provided".to_string());
        }

        Ok(url)
    }
}

/// Whether `url` is served from the expected storage domain
pub fn is_storage_host(url: &Url, storage_host_suffix: &str) -> bool {
    url.host_str()
        .map(|host| host.ends_with(storage_host_suffix))
        .unwrap_or(false)
}
