// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-memory provider and fetcher for tests and local runs without credentials

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{
    FetchError, ImageAttachment, ImageFetcher, ImageProvider, ProviderError, ProviderImage,
    UpstreamImage,
};

/// Scripted outcome for one provider capability
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Images(Vec<ProviderImage>),
    Fail { status: u16, body: String },
}

impl MockOutcome {
    fn resolve(&self) -> Result<Vec<ProviderImage>, ProviderError> {
        match self {
            MockOutcome::Images(images) => Ok(images.clone()),
            MockOutcome::Fail { status, body } => Err(ProviderError::Status {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

/// Provider that replays scripted results and records every call
pub struct MockImageProvider {
    generate_outcome: MockOutcome,
    vary_outcome: MockOutcome,
    generate_calls: AtomicUsize,
    vary_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    attachments: Mutex<Vec<ImageAttachment>>,
}

impl MockImageProvider {
    pub fn new(generate_outcome: MockOutcome, vary_outcome: MockOutcome) -> Self {
        Self {
            generate_outcome,
            vary_outcome,
            generate_calls: AtomicUsize::new(0),
            vary_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            attachments: Mutex::new(Vec::new()),
        }
    }

    /// Both capabilities succeed with the given URLs
    pub fn with_urls(generated: &[&str], varied: &[&str]) -> Self {
        let to_images = |urls: &[&str]| {
            urls.iter()
                .map(|u| ProviderImage::with_url(*u))
                .collect::<Vec<_>>()
        };
        Self::new(
            MockOutcome::Images(to_images(generated)),
            MockOutcome::Images(to_images(varied)),
        )
    }

    /// Both capabilities fail with the given provider status
    pub fn failing(status: u16, body: &str) -> Self {
        let outcome = MockOutcome::Fail {
            status,
            body: body.to_string(),
        };
        Self::new(outcome.clone(), outcome)
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn vary_calls(&self) -> usize {
        self.vary_calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn attachments(&self) -> Vec<ImageAttachment> {
        self.attachments.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate(&self, prompt: &str) -> Result<Vec<ProviderImage>, ProviderError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.generate_outcome.resolve()
    }

    async fn vary(&self, image: ImageAttachment) -> Result<Vec<ProviderImage>, ProviderError> {
        self.vary_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut attachments) = self.attachments.lock() {
            attachments.push(image);
        }
        self.vary_outcome.resolve()
    }
}

/// A canned blob-host response
#[derive(Debug, Clone)]
pub struct MockResource {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl MockResource {
    pub fn ok(content_type: &str, body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            content_type: Some(content_type.to_string()),
            body: body.into(),
        }
    }

    pub fn status(status: u16, status_text: &str) -> Self {
        Self {
            status,
            status_text: status_text.to_string(),
            content_type: None,
            body: Bytes::new(),
        }
    }
}

/// Fetcher serving canned resources by URL. Unknown URLs are transport faults.
#[derive(Default)]
pub struct MockImageFetcher {
    resources: HashMap<String, MockResource>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl MockImageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, url: &str, resource: MockResource) -> Self {
        self.resources.insert(url.to_string(), resource);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ImageFetcher for MockImageFetcher {
    async fn fetch(&self, url: &str) -> Result<UpstreamImage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }

        let resource = self
            .resources
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Stream(format!("connection refused: {}", url)))?;

        let body = resource.body.clone();
        Ok(UpstreamImage {
            status: resource.status,
            status_text: resource.status_text,
            content_type: resource.content_type,
            content_length: Some(body.len() as u64),
            body: Box::pin(futures::stream::once(async move { Ok(body) })),
        })
    }
}
