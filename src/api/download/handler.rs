// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Download proxy endpoint handler

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::Response,
};
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use super::request::{is_storage_host, DownloadQuery};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

const SERVER_ERROR: &str = "Server error occurred while downloading image.";

/// Filename offered to the browser for a download started at `now`
pub fn attachment_filename(now: DateTime<Utc>) -> String {
    format!("generated-image-{}.png", now.timestamp_millis())
}

/// GET /download?imageUrl=<url> - Re-stream an image as an attachment
///
/// Foreign hosts are only logged; the request still goes through.
/// A non-success upstream status is passed back to the caller as-is.
pub async fn download_handler(
    State(state): State<AppState>,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| {
        warn!("Download query rejected: {}", e.body_text());
        ApiError::InvalidRequest("Missing or invalid imageUrl parameter".to_string())
    })?;

    let url = query.validate().map_err(|e| {
        warn!("Download validation failed: {}", e);
        ApiError::InvalidRequest(e)
    })?;

    if !is_storage_host(&url, &state.storage_host_suffix) {
        warn!(
            "Potential misuse: URL does not seem to be from blob storage: {}",
            url
        );
    }

    debug!("Proxying download for {}", url);

    let upstream = state.fetcher.fetch(url.as_str()).await.map_err(|e| {
        error!("Download fetch failed: {}", e);
        ApiError::InternalError(SERVER_ERROR.to_string())
    })?;

    if !upstream.is_success() {
        error!(
            "Failed to fetch image from source: {} {}",
            upstream.status, upstream.status_text
        );
        return Err(ApiError::Upstream {
            status: upstream.status,
            message: format!("Failed to fetch image: {}", upstream.status_text),
        });
    }

    let filename = attachment_filename(Utc::now());
    let content_type = upstream
        .content_type
        .clone()
        .unwrap_or_else(|| "image/png".to_string());

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .header(header::CONTENT_TYPE, content_type);
    if let Some(length) = upstream.content_length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }

    let response = builder.body(Body::from_stream(upstream.body)).map_err(|e| {
        error!("Failed to build download response: {}", e);
        ApiError::InternalError(SERVER_ERROR.to_string())
    })?;

    info!("Streaming {} as {}", url, filename);

    Ok(response)
}
