// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! External collaborators: the image-generation provider and the blob host
//!
//! Handlers only see the two narrow capabilities defined here, so the real
//! HTTP clients can be swapped for the fakes in [`mock`] under test.

pub mod fetch;
pub mod mock;
pub mod openai;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::TryStreamExt;
use thiserror::Error;

pub use fetch::HttpImageFetcher;
pub use mock::{MockImageFetcher, MockImageProvider};
pub use openai::OpenAiImageClient;

/// Number of images requested from the provider per generation or variation call
pub const FAN_OUT: usize = 4;

/// Output sizes the provider accepts for both capabilities
pub const ALLOWED_SIZES: &[&str] = &["256x256", "512x512", "1024x1024"];

pub const DEFAULT_SIZE: &str = "1024x1024";
pub const DEFAULT_MODEL: &str = "dall-e-2";

/// Errors raised while talking to the image-generation provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid attachment: {0}")]
    InvalidAttachment(String),

    #[error("source image could not be fetched: {0}")]
    Fetch(#[from] FetchError),
}

/// Errors raised while fetching image bytes from a URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid image URL '{0}'")]
    InvalidUrl(String),

    #[error("image request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("image stream failed: {0}")]
    Stream(String),
}

/// One entry of a provider result list. A missing URL is kept as `None`
/// rather than dropped so callers can preserve ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderImage {
    pub url: Option<String>,
}

impl ProviderImage {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// Image bytes packaged for upload to the provider's variation capability
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ImageAttachment {
    /// Package fetched bytes as `image.png`, keeping the upstream content type when known
    pub fn png(bytes: Bytes, content_type: Option<String>) -> Self {
        Self {
            file_name: "image.png".to_string(),
            content_type: content_type
                .filter(|ct| !ct.trim().is_empty())
                .unwrap_or_else(|| "image/png".to_string()),
            bytes,
        }
    }
}

/// Image-generation capabilities used by the handlers
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Synthesize `FAN_OUT` images from a text prompt
    async fn generate(&self, prompt: &str) -> Result<Vec<ProviderImage>, ProviderError>;

    /// Synthesize `FAN_OUT` variations of an uploaded image
    async fn vary(&self, image: ImageAttachment) -> Result<Vec<ProviderImage>, ProviderError>;
}

pub type ByteStream = BoxStream<'static, Result<Bytes, FetchError>>;

/// A response from the blob host, body not yet consumed
pub struct UpstreamImage {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub body: ByteStream,
}

impl UpstreamImage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Drain the body into a single buffer
    pub async fn into_bytes(self) -> Result<Bytes, FetchError> {
        let chunks: Vec<Bytes> = self.body.try_collect().await?;
        Ok(Bytes::from(chunks.concat()))
    }
}

impl std::fmt::Debug for UpstreamImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamImage")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Plain HTTP GET against the storage host
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Issue the request. Non-success statuses are returned, not raised;
    /// only transport-level faults are errors.
    async fn fetch(&self, url: &str) -> Result<UpstreamImage, FetchError>;
}
