// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client for the studio endpoints, as used by the view

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::api::{GenerationRequest, ImageSetResponse, VariationRequest};

#[derive(Debug, Error)]
pub enum StudioClientError {
    /// Non-success response; `message` is the server's `error` field when present
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl StudioClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            StudioClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Calls the view makes against the backend
#[async_trait]
pub trait StudioApi: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Vec<String>, StudioClientError>;

    async fn variations(&self, image: &str) -> Result<Vec<String>, StudioClientError>;

    /// Same-origin link that downloads `image` through the proxy
    fn download_url(&self, image: &str) -> Result<Url, StudioClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

pub struct HttpStudioApi {
    client: Client,
    base_url: Url,
}

impl HttpStudioApi {
    pub fn new(base_url: &str) -> Result<Self, StudioClientError> {
        // A trailing slash keeps `join` from replacing the last path segment
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::builder().build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Follow a link from [`StudioApi::download_url`], returning the raw response
    pub async fn follow_download(&self, link: Url) -> Result<reqwest::Response, StudioClientError> {
        debug!("Studio GET {}", link);
        let response = self.client.get(link).send().await?;
        Self::check(response, "Failed to download image").await
    }

    async fn post_for_images<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<Vec<String>, StudioClientError> {
        let url = self.base_url.join(path)?;
        debug!("Studio POST {}", url);

        let response = self.client.post(url).json(body).send().await?;
        let response = Self::check(response, fallback).await?;
        let set: ImageSetResponse = response.json().await?;
        Ok(set.images)
    }

    async fn check(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<reqwest::Response, StudioClientError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .filter(|msg| !msg.is_empty())
            .unwrap_or_else(|| fallback.to_string());

        Err(StudioClientError::Server { status, message })
    }
}

#[async_trait]
impl StudioApi for HttpStudioApi {
    async fn generate(&self, prompt: &str) -> Result<Vec<String>, StudioClientError> {
        self.post_for_images(
            "generate",
            &GenerationRequest::new(prompt),
            "Failed to generate images",
        )
        .await
    }

    async fn variations(&self, image: &str) -> Result<Vec<String>, StudioClientError> {
        self.post_for_images(
            "variations",
            &VariationRequest::new(image),
            "Failed to generate variations",
        )
        .await
    }

    fn download_url(&self, image: &str) -> Result<Url, StudioClientError> {
        let mut url = self.base_url.join("download")?;
        url.query_pairs_mut().append_pair("imageUrl", image);
        Ok(url)
    }
}
