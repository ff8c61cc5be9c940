// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for GET /download

use axum::http::{header, StatusCode};
use chrono::{TimeZone, Utc};
use image_studio::api::download::attachment_filename;
use image_studio::provider::{mock::MockResource, MockImageFetcher};
use std::io;
use std::sync::{Arc, Mutex};

use crate::common::{app_with, default_provider, encode, get, send, PNG_BYTES, STORAGE_IMAGE};

fn download_uri(image_url: &str) -> String {
    format!("/download?imageUrl={}", encode(image_url))
}

/// Log sink installed as the thread's default subscriber for one test
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_warnings() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

fn assert_generated_filename(disposition: &str) {
    let name = disposition
        .strip_prefix("attachment; filename=\"generated-image-")
        .and_then(|rest| rest.strip_suffix(".png\""))
        .unwrap_or_else(|| panic!("unexpected disposition: {}", disposition));
    assert!(
        !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()),
        "timestamp not numeric: {}",
        disposition
    );
}

#[test]
fn test_attachment_filename_embeds_unix_millis() {
    let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    assert_eq!(attachment_filename(at), "generated-image-1700000000123.png");
}

#[tokio::test]
async fn test_missing_or_empty_image_url_returns_400() {
    for uri in ["/download", "/download?imageUrl=", "/download?other=1"] {
        let fetcher = Arc::new(MockImageFetcher::new());
        let app = app_with(default_provider(), fetcher.clone());

        let response = send(app, get(uri)).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(
            response.json()["error"],
            "Missing or invalid imageUrl parameter"
        );
        assert_eq!(fetcher.calls(), 0);
    }
}

#[tokio::test]
async fn test_malformed_image_url_returns_400_without_fetch() {
    for raw in ["not a url", "/relative/path.png", "http//missing-colon.png", "data:image/png"] {
        let fetcher = Arc::new(MockImageFetcher::new());
        let app = app_with(default_provider(), fetcher.clone());

        let response = send(app, get(&download_uri(raw))).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "raw: {}", raw);
        assert_eq!(response.json()["error"], "Invalid URL format provided");
        assert_eq!(fetcher.calls(), 0, "raw: {}", raw);
    }
}

#[tokio::test]
async fn test_success_streams_bytes_with_attachment_headers() {
    let fetcher = Arc::new(
        MockImageFetcher::new().with_resource(STORAGE_IMAGE, MockResource::ok("image/png", PNG_BYTES)),
    );
    let app = app_with(default_provider(), fetcher.clone());

    let response = send(app, get(&download_uri(STORAGE_IMAGE))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_ref(), PNG_BYTES);
    assert_eq!(response.headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(
        response.headers[header::CONTENT_LENGTH],
        PNG_BYTES.len().to_string().as_str()
    );
    let disposition = response.headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert_generated_filename(disposition);
    assert_eq!(fetcher.requested(), vec![STORAGE_IMAGE.to_string()]);
}

#[tokio::test]
async fn test_missing_upstream_content_type_defaults_to_png() {
    let resource = MockResource {
        content_type: None,
        ..MockResource::ok("ignored", PNG_BYTES)
    };
    let fetcher = Arc::new(MockImageFetcher::new().with_resource(STORAGE_IMAGE, resource));
    let app = app_with(default_provider(), fetcher);

    let response = send(app, get(&download_uri(STORAGE_IMAGE))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "image/png");
}

#[tokio::test]
async fn test_upstream_content_type_is_copied() {
    let fetcher = Arc::new(
        MockImageFetcher::new().with_resource(STORAGE_IMAGE, MockResource::ok("image/jpeg", PNG_BYTES)),
    );
    let app = app_with(default_provider(), fetcher);

    let response = send(app, get(&download_uri(STORAGE_IMAGE))).await;

    assert_eq!(response.headers[header::CONTENT_TYPE], "image/jpeg");
}

#[tokio::test]
async fn test_foreign_host_is_still_proxied() {
    let foreign = "https://cdn.example.com/elsewhere/cat.png";
    let fetcher = Arc::new(
        MockImageFetcher::new().with_resource(foreign, MockResource::ok("image/png", PNG_BYTES)),
    );
    let app = app_with(default_provider(), fetcher.clone());

    let (logs, _guard) = capture_warnings();

    let response = send(app, get(&download_uri(foreign))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_ref(), PNG_BYTES);
    assert_eq!(fetcher.calls(), 1);

    let logs = logs.contents();
    assert!(logs.contains("WARN"), "logs: {}", logs);
    assert!(logs.contains("does not seem to be from blob storage"), "logs: {}", logs);
    assert!(logs.contains(foreign), "logs: {}", logs);
}

#[tokio::test]
async fn test_storage_host_logs_no_warning() {
    let fetcher = Arc::new(
        MockImageFetcher::new().with_resource(STORAGE_IMAGE, MockResource::ok("image/png", PNG_BYTES)),
    );
    let app = app_with(default_provider(), fetcher);
    let (logs, _guard) = capture_warnings();

    let response = send(app, get(&download_uri(STORAGE_IMAGE))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!logs.contents().contains("blob storage"));
}

#[tokio::test]
async fn test_upstream_status_is_passed_through() {
    for (status, text) in [(403, "Forbidden"), (404, "Not Found"), (502, "Bad Gateway")] {
        let fetcher = Arc::new(
            MockImageFetcher::new().with_resource(STORAGE_IMAGE, MockResource::status(status, text)),
        );
        let app = app_with(default_provider(), fetcher);

        let response = send(app, get(&download_uri(STORAGE_IMAGE))).await;

        assert_eq!(response.status.as_u16(), status);
        assert_eq!(
            response.json()["error"],
            format!("Failed to fetch image: {}", text)
        );
        assert!(response.headers.get(header::CONTENT_DISPOSITION).is_none());
    }
}

#[tokio::test]
async fn test_unregistered_upstream_status_reports_code() {
    let fetcher = Arc::new(
        MockImageFetcher::new().with_resource(STORAGE_IMAGE, MockResource::status(520, "520")),
    );
    let app = app_with(default_provider(), fetcher);

    let response = send(app, get(&download_uri(STORAGE_IMAGE))).await;

    assert_eq!(response.status.as_u16(), 520);
    assert_eq!(response.json()["error"], "Failed to fetch image: 520");
}

#[tokio::test]
async fn test_transport_fault_returns_generic_500() {
    let fetcher = Arc::new(MockImageFetcher::new());
    let app = app_with(default_provider(), fetcher.clone());

    let response = send(app, get(&download_uri(STORAGE_IMAGE))).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json()["error"],
        "Server error occurred while downloading image."
    );
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_repeated_downloads_are_byte_identical() {
    let fetcher = Arc::new(
        MockImageFetcher::new().with_resource(STORAGE_IMAGE, MockResource::ok("image/png", PNG_BYTES)),
    );

    let first = send(
        app_with(default_provider(), fetcher.clone()),
        get(&download_uri(STORAGE_IMAGE)),
    )
    .await;
    let second = send(
        app_with(default_provider(), fetcher.clone()),
        get(&download_uri(STORAGE_IMAGE)),
    )
    .await;

    assert_eq!(first.body, second.body);
    assert_eq!(
        first.headers[header::CONTENT_TYPE],
        second.headers[header::CONTENT_TYPE]
    );
    assert_eq!(fetcher.calls(), 2);
}
