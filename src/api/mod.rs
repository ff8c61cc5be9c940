// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod download;
pub mod errors;
pub mod generate;
pub mod http_server;
pub mod image_set;
pub mod variations;

pub use download::{download_handler, DownloadQuery};
pub use errors::{ApiError, ErrorResponse};
pub use generate::{generate_handler, GenerationRequest};
pub use http_server::{create_app, start_server, AppState};
pub use image_set::ImageSetResponse;
pub use variations::{variations_handler, VariationRequest};
