// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Studio view: sequences backend calls around [`ViewState`] transitions

use tracing::{error, info};
use url::Url;

use super::client::StudioApi;
use super::state::{Notice, ViewState};

const ERROR_TITLE: &str = "Error";

pub struct StudioView<A: StudioApi> {
    api: A,
    state: ViewState,
}

impl<A: StudioApi> StudioView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ViewState::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.state.set_prompt(prompt);
    }

    pub fn select(&mut self, index: usize) -> Option<&str> {
        self.state.select(index)
    }

    /// Submit the current prompt. Returns whether a new image set arrived.
    pub async fn generate(&mut self) -> bool {
        if !self.state.can_generate() {
            return false;
        }

        self.state.begin_request();
        self.state.clear_selection();

        let result = self.api.generate(&self.state.prompt).await;
        match result {
            Ok(images) => {
                info!("Received {} images", images.len());
                self.state.finish_with_images(
                    images,
                    Notice::info(
                        "Images generated",
                        "Select your favorite image from the options below.",
                    ),
                );
                true
            }
            Err(e) => {
                error!("Generate failed: {}", e);
                self.state.fail(Notice::error(ERROR_TITLE, e.to_string()));
                false
            }
        }
    }

    /// Ask for variations of the selected image. Returns whether a new image set arrived.
    pub async fn regenerate_variations(&mut self) -> bool {
        if self.state.loading {
            return false;
        }
        let Some(selected) = self.state.selected.clone() else {
            return false;
        };

        self.state.begin_request();

        let result = self.api.variations(&selected).await;
        match result {
            Ok(images) => {
                info!("Received {} variations", images.len());
                self.state.finish_with_images(
                    images,
                    Notice::info(
                        "New variations generated",
                        "Select your favorite image from the new options.",
                    ),
                );
                true
            }
            Err(e) => {
                error!("Variations failed: {}", e);
                self.state.fail(Notice::error(ERROR_TITLE, e.to_string()));
                false
            }
        }
    }

    /// Proxy link for the selected image; the caller navigates to it.
    /// State is unchanged apart from an error notice when nothing is selected.
    pub fn download(&mut self) -> Option<Url> {
        let Some(selected) = self.state.selected.as_deref() else {
            self.state.notify(Notice::error(
                "No image selected",
                "Please select an image to download.",
            ));
            return None;
        };

        match self.api.download_url(selected) {
            Ok(url) => Some(url),
            Err(e) => {
                error!("Download failed: {}", e);
                self.state.notify(Notice::error(
                    "Download Error",
                    "Could not download the image. Please try again.",
                ));
                None
            }
        }
    }
}
