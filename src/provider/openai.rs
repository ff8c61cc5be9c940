// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OpenAI Images API client (text-to-image and image variations)

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    ImageAttachment, ImageProvider, ProviderError, ProviderImage, DEFAULT_MODEL, DEFAULT_SIZE,
    FAN_OUT,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Client for the provider's `/v1/images/*` endpoints
pub struct OpenAiImageClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    size: String,
}

/// JSON body of `POST /v1/images/generations`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationBody {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
}

// --- OpenAI response types ---

#[derive(Debug, Deserialize)]
pub struct OpenAIImageResponse {
    #[serde(default)]
    pub data: Vec<OpenAIImageData>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIImageData {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub b64_json: Option<String>,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

impl From<OpenAIImageResponse> for Vec<ProviderImage> {
    fn from(response: OpenAIImageResponse) -> Self {
        response
            .data
            .into_iter()
            .map(|item| ProviderImage { url: item.url })
            .collect()
    }
}

impl OpenAiImageClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ProviderError> {
        let client = Client::builder().build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Image provider configured: base_url={}", base_url);

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            size: DEFAULT_SIZE.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    fn generation_body(&self, prompt: &str) -> ImageGenerationBody {
        ImageGenerationBody {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: FAN_OUT as u32,
            size: self.size.clone(),
        }
    }

    async fn read_images(response: reqwest::Response) -> Result<Vec<ProviderImage>, ProviderError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let api_response: OpenAIImageResponse = response.json().await?;
        Ok(api_response.into())
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<ProviderImage>, ProviderError> {
        let url = format!("{}/v1/images/generations", self.base_url);
        debug!("Provider generate POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.generation_body(prompt))
            .send()
            .await?;

        Self::read_images(response).await
    }

    async fn vary(&self, image: ImageAttachment) -> Result<Vec<ProviderImage>, ProviderError> {
        let url = format!("{}/v1/images/variations", self.base_url);
        debug!(
            "Provider vary POST {} ({} bytes, {})",
            url,
            image.bytes.len(),
            image.content_type
        );

        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| ProviderError::InvalidAttachment(e.to_string()))?;

        let form = Form::new()
            .part("image", part)
            .text("model", self.model.clone())
            .text("n", FAN_OUT.to_string())
            .text("size", self.size.clone());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        Self::read_images(response).await
    }
}
