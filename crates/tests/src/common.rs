use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    middleware, Router,
};
use serde_json::Value;
use server::store::{AppState, Store};
use shared_types::FeatureFlags;
use tower::ServiceExt;

pub const DEMO_PASSWORD: &str = server::store::DEMO_PASSWORD;

/// Build a test router over a freshly seeded in-memory store.
///
/// Every call gets its own store, so tests never see each other's writes.
pub fn test_app() -> Router {
    test_app_with_flags(FeatureFlags {
        self_registration: true,
        ..FeatureFlags::default()
    })
}

pub fn test_app_with_flags(flags: FeatureFlags) -> Router {
    let state = AppState::new(Arc::new(Store::seeded()), flags);
    // Same layering as the served app: the permissive auth middleware puts
    // Claims in request extensions for the AuthRequired extractor.
    server::openapi::api_router(state.clone()).layer(middleware::from_fn_with_state(
        state,
        server::auth::middleware::auth_middleware,
    ))
}

/// Sign in as a seeded demo account and return the access token.
pub async fn login_as(app: &Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": DEMO_PASSWORD }).to_string();
    let (status, response) = post_json(app, "/api/v1/auth/login", &body).await;
    assert_eq!(status, StatusCode::OK, "Login as {email} failed: {response:?}");
    response["access_token"]
        .as_str()
        .expect("login response carries an access token")
        .to_string()
}

/// POST JSON without credentials.
pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, req).await
}

/// GET without credentials.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// GET with a JWT Bearer token.
pub async fn get_authed(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// POST JSON with a JWT Bearer token.
pub async fn post_json_authed(
    app: &Router,
    uri: &str,
    body: &str,
    token: &str,
) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, req).await
}

/// Send a request through the router and parse the response.
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send_raw(app, req).await;
    (status, body)
}

/// Send a request and also return the response headers (for cookie checks).
pub async fn send_raw(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&body_bytes).to_string(),
        ))
    };

    (status, headers, body)
}

/// All `Set-Cookie` header values of a response.
pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// The `name=value` pair of a cookie set by the response, if any.
pub fn cookie_pair(headers: &HeaderMap, name: &str) -> Option<String> {
    set_cookies(headers)
        .into_iter()
        .find(|c| c.starts_with(&format!("{name}=")))
        .and_then(|c| c.split(';').next().map(str::to_string))
}
