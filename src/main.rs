// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use image_studio::{
    api::{start_server, AppState},
    config::StudioConfig,
    provider::{HttpImageFetcher, OpenAiImageClient},
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = StudioConfig::parse();
    config.validate().map_err(|e| anyhow!(e))?;

    tracing::info!(
        "Starting Image Studio: model={}, size={}, storage host suffix={}",
        config.image_model,
        config.image_size,
        config.storage_host_suffix
    );

    let provider = OpenAiImageClient::new(&config.openai_base_url, &config.openai_api_key)?
        .with_model(config.image_model.clone())
        .with_size(config.image_size.clone());
    let fetcher = HttpImageFetcher::new()?;

    let state = AppState::new(Arc::new(provider), Arc::new(fetcher))
        .with_storage_host_suffix(&config.storage_host_suffix);

    start_server(state, config.listen_addr)
        .await
        .map_err(|e| anyhow!("server error: {}", e))?;

    tracing::info!("Image Studio stopped");
    Ok(())
}
