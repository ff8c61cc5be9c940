// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! View state of the studio page
//!
//! A plain value owned by the view. Transitions here are synchronous and
//! side-effect free; [`super::view::StudioView`] sequences them around the
//! network calls.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Toast payload. Rendering is up to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Generating,
    ImagesShown { selected: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub prompt: String,
    pub images: Vec<String>,
    pub selected: Option<String>,
    pub loading: bool,
    pub notice: Option<Notice>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ViewPhase {
        if self.loading {
            ViewPhase::Generating
        } else if self.images.is_empty() {
            ViewPhase::Idle
        } else {
            ViewPhase::ImagesShown {
                selected: self.selected.is_some(),
            }
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// The generate trigger is enabled only for a non-blank prompt while idle
    pub fn can_generate(&self) -> bool {
        !self.loading && !self.prompt.trim().is_empty()
    }

    /// Select the image at `index` of the current set. Out-of-range indices
    /// and clicks while a request is in flight are ignored.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        if self.loading {
            return None;
        }
        let image = self.images.get(index)?.clone();
        self.selected = Some(image);
        self.selected.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected.as_ref()?;
        self.images.iter().position(|image| image == selected)
    }

    /// Mark a request as in flight
    pub fn begin_request(&mut self) {
        self.loading = true;
        self.notice = None;
    }

    /// Replace the image set. The selection always belongs to the previous set,
    /// so it is dropped.
    pub fn finish_with_images(&mut self, images: Vec<String>, notice: Notice) {
        self.images = images;
        self.selected = None;
        self.loading = false;
        self.notice = Some(notice);
    }

    /// Leave images and selection as they were and surface the error
    pub fn fail(&mut self, notice: Notice) {
        self.loading = false;
        self.notice = Some(notice);
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}
