// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration, read from flags or the environment

use clap::Parser;
use std::net::SocketAddr;
use url::Url;

use crate::provider::openai::DEFAULT_BASE_URL;
use crate::provider::{ALLOWED_SIZES, DEFAULT_MODEL, DEFAULT_SIZE};

/// Host suffix of the blob storage that serves generated images
pub const DEFAULT_STORAGE_HOST_SUFFIX: &str = "blob.core.windows.net";

/// Image Studio server
#[derive(Parser, Debug, Clone)]
#[command(name = "image-studio")]
#[command(about = "Prompt-to-image web backend with variations and a download proxy", long_about = None)]
pub struct StudioConfig {
    /// Address the HTTP server binds to
    #[arg(long, env = "API_LISTEN_ADDR", default_value = "127.0.0.1:3000")]
    pub listen_addr: SocketAddr,

    /// API key for the image-generation provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Base URL of the provider API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub openai_base_url: String,

    /// Provider model used for generation and variations
    #[arg(long, env = "IMAGE_MODEL", default_value = DEFAULT_MODEL)]
    pub image_model: String,

    /// Output resolution requested from the provider
    #[arg(long, env = "IMAGE_SIZE", default_value = DEFAULT_SIZE)]
    pub image_size: String,

    /// Download URLs outside this host suffix are logged as suspicious
    #[arg(long, env = "STORAGE_HOST_SUFFIX", default_value = DEFAULT_STORAGE_HOST_SUFFIX)]
    pub storage_host_suffix: String,
}

impl StudioConfig {
    /// Validate settings that clap cannot check on its own
    pub fn validate(&self) -> Result<(), String> {
        if self.openai_api_key.trim().is_empty() {
            return Err("OPENAI_API_KEY must not be empty".to_string());
        }

        if !ALLOWED_SIZES.contains(&self.image_size.as_str()) {
            return Err(format!(
                "invalid image size '{}'; allowed: {}",
                self.image_size,
                ALLOWED_SIZES.join(", ")
            ));
        }

        Url::parse(&self.openai_base_url)
            .map_err(|e| format!("invalid provider base URL '{}': {}", self.openai_base_url, e))?;

        if self.storage_host_suffix.trim().is_empty() {
            return Err("storage host suffix must not be empty".to_string());
        }

        Ok(())
    }
}
