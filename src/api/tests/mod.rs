use super::*;
use crate::browser::test_helpers::{InMemorySource, create_test_browser, record};
use crate::types::ArtworkRecord;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::time::Duration;
use tower::ServiceExt;


/// Router over an in-memory source holding `ids`, with the browser's own config
fn create_test_app(source: InMemorySource) -> (Router, ArtworkBrowser) {
    let (browser, _source) = create_test_browser(source);
    let config = browser.config();
    (create_router(browser.clone(), config), browser)
}

/// Read a response body as JSON
async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// JSON request with the given method, path and body
fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_serve_with_shutdown_stops_on_signal() {
    let (browser, _source) = create_test_browser(InMemorySource::with_ids(1..=5));

    let mut config = (*browser.config()).clone();
    config.api.bind_address = "127.0.0.1:0".parse().unwrap(); // Port 0 = OS assigns a free port
    let config = Arc::new(config);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(serve_with_shutdown(browser, config, async move {
        shutdown_rx.await.ok();
    }));

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown_tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server should stop after the shutdown signal")
        .unwrap();
    assert!(result.is_ok(), "graceful shutdown should succeed: {result:?}");
}

#[tokio::test]
async fn test_serve_reports_bind_failure() {
    let blocker = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let taken = blocker.local_addr().unwrap();

    let (browser, _source) = create_test_browser(InMemorySource::with_ids(1..=5));
    let mut config = (*browser.config()).clone();
    config.api.bind_address = taken;

    let result = serve_with_shutdown(browser, Arc::new(config), std::future::pending()).await;
    assert!(matches!(result, Err(crate::error::Error::Io(_))));
}

#[tokio::test]
async fn test_spawn_api_server_method() {
    let (browser, _source) = create_test_browser(InMemorySource::with_ids(1..=5));

    let api_handle = browser.spawn_api_server();

    // Give it a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    api_handle.abort();
}

#[tokio::test]
async fn test_cors_enabled() {
    let (browser, _source) = create_test_browser(InMemorySource::with_ids(1..=5));

    let mut config = (*browser.config()).clone();
    config.api.cors_enabled = true;
    config.api.cors_origins = vec!["*".to_string()];

    let app = create_router(browser, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let (browser, _source) = create_test_browser(InMemorySource::with_ids(1..=5));

    let mut config = (*browser.config()).clone();
    config.api.cors_enabled = false;

    let app = create_router(browser, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be absent when CORS is disabled"
    );
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let (browser, _source) = create_test_browser(InMemorySource::with_ids(1..=5));

    let mut config = (*browser.config()).clone();
    config.api.cors_origins = vec!["http://gallery.local".to_string()];

    let app = create_router(browser, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://gallery.local")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://gallery.local")
    );
}

#[tokio::test]
async fn test_view_before_first_load() {
    let (app, _browser) = create_test_app(InMemorySource::with_ids(1..=30));

    let response = app
        .oneshot(Request::builder().uri("/view").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["current_page"], 1);
    assert_eq!(json["page_size"], 12);
    assert_eq!(json["total_records"], 0);
    assert_eq!(json["records"].as_array().unwrap().len(), 0);
    assert_eq!(json["selection"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_view_reflects_loaded_page_and_selection() {
    let (app, browser) = create_test_app(InMemorySource::with_ids(1..=30));

    browser.set_page(2).await.unwrap();
    browser.toggle_selection(vec![record(14), record(15)]).await;

    let response = app
        .oneshot(Request::builder().uri("/view").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["current_page"], 2);
    assert_eq!(json["total_records"], 30);
    assert_eq!(json["records"][0]["id"], 13);
    assert_eq!(json["records"].as_array().unwrap().len(), 12);

    let selected: Vec<ArtworkRecord> = serde_json::from_value(json["selection"].clone()).unwrap();
    assert_eq!(selected, vec![record(14), record(15)]);
}
