// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-to-image endpoint handler

use axum::{body::Bytes, extract::State, Json};
use tracing::{debug, error, info, warn};

use super::request::GenerationRequest;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::image_set::ImageSetResponse;

/// POST /generate - Generate four images from a text prompt
///
/// Pipeline:
/// 1. Parse and validate the body (400 on a missing or blank prompt)
/// 2. Call the provider's text-to-image capability
/// 3. Flatten the results into exactly four URLs
///
/// Provider failures are logged and reported as a generic 500.
pub async fn generate_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImageSetResponse>, ApiError> {
    // The body is parsed as JSON whatever the declared content type
    let request: GenerationRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Generate request body rejected: {}", e);
        ApiError::InvalidRequest("Prompt is required".to_string())
    })?;

    let prompt = request.validate().map_err(|e| {
        warn!("Generate validation failed: {}", e);
        ApiError::InvalidRequest(e)
    })?;

    debug!("Generate request received: prompt_len={}", prompt.len());

    let results = state.provider.generate(prompt).await.map_err(|e| {
        error!("Error generating images: {}", e);
        ApiError::InternalError("Failed to generate images".to_string())
    })?;

    info!("Generated {} images", results.len());

    Ok(Json(ImageSetResponse::from_provider(results)))
}
