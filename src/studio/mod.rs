// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client side of the studio: view state and the calls it makes

pub mod client;
pub mod state;
pub mod view;

pub use client::{HttpStudioApi, StudioApi, StudioClientError};
pub use state::{Notice, NoticeLevel, ViewPhase, ViewState};
pub use view::StudioView;
