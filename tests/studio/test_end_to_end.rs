// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Full round trips: view -> HTTP client -> router -> mock provider and blob host

use image_studio::provider::{mock::MockResource, MockImageFetcher, MockImageProvider};
use image_studio::studio::{HttpStudioApi, NoticeLevel, StudioView};
use std::sync::Arc;

use crate::common::{default_provider, spawn_app, state_with, GENERATED, PNG_BYTES, VARIED};

fn fetcher_serving(urls: &[&str]) -> Arc<MockImageFetcher> {
    let fetcher = urls.iter().fold(MockImageFetcher::new(), |fetcher, url| {
        fetcher.with_resource(url, MockResource::ok("image/png", PNG_BYTES))
    });
    Arc::new(fetcher)
}

#[tokio::test]
async fn test_generate_select_download() {
    let provider = default_provider();
    let fetcher = fetcher_serving(&GENERATED);
    let base = spawn_app(state_with(provider.clone(), fetcher.clone())).await;

    let mut view = StudioView::new(HttpStudioApi::new(&base).unwrap());
    view.set_prompt("a red fox in snow");

    assert!(view.generate().await);
    assert_eq!(view.state().images, GENERATED);
    assert_eq!(provider.prompts(), vec!["a red fox in snow".to_string()]);

    assert_eq!(view.select(1), Some(GENERATED[1]));
    let link = view.download().unwrap();

    let response = view.api().follow_download(link).await.unwrap();
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"generated-image-"));
    assert!(disposition.ends_with(".png\""));
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );
    let bytes = response.bytes().await.unwrap();
    assert_eq!(bytes.as_ref(), PNG_BYTES);

    assert_eq!(fetcher.requested(), vec![GENERATED[1].to_string()]);
}

#[tokio::test]
async fn test_variations_of_selected_image() {
    let provider = default_provider();
    let fetcher = fetcher_serving(&GENERATED);
    let base = spawn_app(state_with(provider.clone(), fetcher.clone())).await;

    let mut view = StudioView::new(HttpStudioApi::new(&base).unwrap());
    view.set_prompt("a red fox in snow");
    view.generate().await;
    view.select(2);

    assert!(view.regenerate_variations().await);

    assert_eq!(view.state().images, VARIED);
    assert!(view.state().selected.is_none());
    assert_eq!(fetcher.requested(), vec![GENERATED[2].to_string()]);
    assert_eq!(provider.vary_calls(), 1);
    assert_eq!(provider.attachments()[0].bytes.as_ref(), PNG_BYTES);
}

#[tokio::test]
async fn test_provider_failure_surfaces_generic_message() {
    let provider = Arc::new(MockImageProvider::failing(401, "invalid api key sk-secret"));
    let fetcher = Arc::new(MockImageFetcher::new());
    let base = spawn_app(state_with(provider, fetcher)).await;

    let mut view = StudioView::new(HttpStudioApi::new(&base).unwrap());
    view.set_prompt("a red fox in snow");

    assert!(!view.generate().await);

    let state = view.state();
    assert!(!state.loading);
    assert!(state.images.is_empty());
    let notice = state.notice.as_ref().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.description, "Failed to generate images");
    assert!(!notice.description.contains("sk-secret"));
}

#[tokio::test]
async fn test_download_of_missing_blob_reports_upstream_status() {
    let provider = default_provider();
    let fetcher = Arc::new(
        MockImageFetcher::new().with_resource(GENERATED[0], MockResource::status(404, "Not Found")),
    );
    let base = spawn_app(state_with(provider, fetcher)).await;

    let mut view = StudioView::new(HttpStudioApi::new(&base).unwrap());
    view.set_prompt("a red fox in snow");
    view.generate().await;
    view.select(0);

    let link = view.download().unwrap();
    let err = view.api().follow_download(link).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Failed to fetch image: Not Found");
}

#[tokio::test]
async fn test_cli_download_writes_attachment_file() {
    let provider = default_provider();
    let fetcher = fetcher_serving(&GENERATED);
    let base = spawn_app(state_with(provider, fetcher)).await;
    let dir = tempfile::tempdir().unwrap();

    let api = HttpStudioApi::new(&base).unwrap();
    let link = image_studio::studio::StudioApi::download_url(&api, GENERATED[3]).unwrap();
    let path = image_studio::cli::save_download(&api, link, dir.path())
        .await
        .unwrap();

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("generated-image-"));
    assert!(name.ends_with(".png"));
    assert_eq!(path.parent(), Some(dir.path()));
    assert_eq!(std::fs::read(&path).unwrap(), PNG_BYTES);
}
