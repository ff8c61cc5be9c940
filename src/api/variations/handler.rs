// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image variations endpoint handler

use axum::{body::Bytes, extract::State, Json};
use tracing::{debug, error, info, warn};

use super::request::VariationRequest;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::image_set::ImageSetResponse;
use crate::provider::{FetchError, ImageAttachment, ProviderError, ProviderImage};

/// POST /variations - Generate four variations of an existing image
///
/// Pipeline:
/// 1. Parse and validate the body (400 unless `image` is a non-blank string)
/// 2. Fetch the source image bytes
/// 3. Upload them to the provider's variation capability
/// 4. Flatten the results into exactly four URLs
///
/// Fetch and provider failures are logged and reported as a generic 500.
pub async fn variations_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImageSetResponse>, ApiError> {
    // The body is parsed as JSON whatever the declared content type
    let request: VariationRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Variations request body rejected: {}", e);
        ApiError::InvalidRequest("Valid image URL is required".to_string())
    })?;

    let image = request.validate().map_err(|e| {
        warn!("Variations validation failed: {}", e);
        ApiError::InvalidRequest(e)
    })?;

    debug!("Variations request received: image={}", image);

    let results = create_variations(&state, image).await.map_err(|e| {
        error!("Error generating image variations: {}", e);
        ApiError::InternalError("Failed to generate image variations".to_string())
    })?;

    info!("Generated {} variations", results.len());

    Ok(Json(ImageSetResponse::from_provider(results)))
}

async fn create_variations(
    state: &AppState,
    image: &str,
) -> Result<Vec<ProviderImage>, ProviderError> {
    let upstream = state.fetcher.fetch(image).await?;
    if !upstream.is_success() {
        return Err(FetchError::Status {
            status: upstream.status,
            status_text: upstream.status_text,
        }
        .into());
    }

    let content_type = upstream.content_type.clone();
    let bytes = upstream.into_bytes().await?;
    debug!("Fetched source image: {} bytes", bytes.len());

    state
        .provider
        .vary(ImageAttachment::png(bytes, content_type))
        .await
}
