//! Test utilities for the Gatekeeper backend tests
//!
//! Builds an application over a temporary SQLite file and static directory
//! and offers small helpers for driving the router in-process.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use gatekeeper_backend_lib::{config::Settings, router::create_router, AppState};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Bytes of the file served by `/download`
pub const DOWNLOAD_BYTES: &[u8] = b"%PDF-1.4\n% cheat sheet\n";

/// Session cookie name used in the default settings
pub const SESSION_COOKIE: &str = "gatekeeper_session";

/// Flash cookie name
pub const FLASH_COOKIE: &str = gatekeeper_backend_lib::flash::FLASH_COOKIE;

/// Sets up a test environment with a temporary database and static directory
///
/// # Returns
///
/// A tuple with:
/// - the router
/// - the shared state (for inspecting the credential store)
/// - the temporary directory (keep this in scope to prevent cleanup during the test)
pub fn setup_test_env() -> (Router, Arc<AppState>, TempDir) {
    let temp_dir = TempDir::new().unwrap();

    let static_dir = temp_dir.path().join("static");
    std::fs::create_dir_all(static_dir.join("files")).unwrap();
    std::fs::write(static_dir.join("files").join("cheat_sheet.pdf"), DOWNLOAD_BYTES).unwrap();

    let mut settings = Settings::default();
    settings.storage.database_path = temp_dir.path().join("users.db");
    settings.assets.static_dir = static_dir;
    // keep hashing fast in tests
    settings.password.scrypt_log_n = 4;

    let state = Arc::new(AppState::open(settings).expect("Failed to create AppState for test"));
    let app = create_router(state.clone());

    (app, state, temp_dir)
}

/// Run one request through the router
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// Build a GET request, optionally with a `Cookie` header
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Build a urlencoded form POST, optionally with a `Cookie` header
pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// POST /register
pub async fn register(app: &Router, email: &str, password: &str, name: &str) -> Response<Body> {
    let body = format!("email={email}&password={password}&name={name}");
    send(app, post_form("/register", &body, None)).await
}

/// POST /login
pub async fn login(app: &Router, email: &str, password: &str) -> Response<Body> {
    let body = format!("email={email}&password={password}");
    send(app, post_form("/login", &body, None)).await
}

/// Value of the cookie `name` set by the response, if any
pub fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(n, _)| n.trim() == name)
        .map(|(_, value)| value.trim().to_string())
}

/// `Cookie` header value carrying the session token from `response`
pub fn session_header(response: &Response<Body>) -> String {
    let token = set_cookie(response, SESSION_COOKIE).expect("response should set a session");
    format!("{SESSION_COOKIE}={token}")
}

/// Target of a redirect
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Assert the response is a redirect to `target`
pub fn assert_redirect(response: &Response<Body>, target: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), Some(target));
}

/// Collect the response body as text
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
