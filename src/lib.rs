// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod provider;
pub mod studio;

pub use api::{create_app, start_server, AppState};
pub use config::StudioConfig;
pub use provider::{
    HttpImageFetcher, ImageFetcher, ImageProvider, OpenAiImageClient, ProviderImage, FAN_OUT,
};
pub use studio::{HttpStudioApi, StudioApi, StudioView, ViewState};
