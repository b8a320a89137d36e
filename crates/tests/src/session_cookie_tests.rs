use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use server::auth::cookies::{ACCESS_COOKIE, REFRESH_COOKIE};

use crate::common::{cookie_pair, send_raw, set_cookies, test_app, DEMO_PASSWORD};

fn login_request() -> Request<Body> {
    let body = json!({ "email": "caregiver@ablelyf.test", "password": DEMO_PASSWORD }).to_string();
    Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn login_sets_http_only_cookies() {
    let app = test_app();

    let (status, headers, _) = send_raw(&app, login_request()).await;

    assert_eq!(status, StatusCode::OK);
    let cookies = set_cookies(&headers);
    for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
        let cookie = cookies
            .iter()
            .find(|c| c.starts_with(&format!("{name}=")))
            .unwrap_or_else(|| panic!("missing {name} cookie in {cookies:?}"));
        assert!(cookie.contains("HttpOnly"), "{cookie}");
        assert!(cookie.contains("Path=/"), "{cookie}");
    }
}

#[tokio::test]
async fn access_cookie_authenticates() {
    let app = test_app();
    let (_, headers, _) = send_raw(&app, login_request()).await;
    let access = cookie_pair(&headers, ACCESS_COOKIE).unwrap();

    let (status, _, me) = send_raw(&app, get_with_cookie("/api/v1/auth/me", &access)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["name"], "Emily Davis");
}

#[tokio::test]
async fn refresh_cookie_alone_restores_the_session() {
    let app = test_app();
    let (_, headers, _) = send_raw(&app, login_request()).await;
    let refresh = cookie_pair(&headers, REFRESH_COOKIE).unwrap();

    let (status, headers, me) = send_raw(&app, get_with_cookie("/api/v1/auth/me", &refresh)).await;

    assert_eq!(status, StatusCode::OK, "{me:?}");
    assert_eq!(me["role"], "caregiver");
    // Rotated pair comes back on the response.
    let rotated = cookie_pair(&headers, REFRESH_COOKIE).unwrap();
    assert_ne!(rotated, refresh);
    assert!(cookie_pair(&headers, ACCESS_COOKIE).is_some());
}

#[tokio::test]
async fn a_refresh_token_works_only_once() {
    let app = test_app();
    let (_, headers, _) = send_raw(&app, login_request()).await;
    let refresh = cookie_pair(&headers, REFRESH_COOKIE).unwrap();

    let (first, _, _) = send_raw(&app, get_with_cookie("/api/v1/auth/me", &refresh)).await;
    let (second, _, _) = send_raw(&app, get_with_cookie("/api/v1/auth/me", &refresh)).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_cookies_and_revokes_refresh() {
    let app = test_app();
    let (_, headers, _) = send_raw(&app, login_request()).await;
    let access = cookie_pair(&headers, ACCESS_COOKIE).unwrap();
    let refresh = cookie_pair(&headers, REFRESH_COOKIE).unwrap();

    let logout = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/logout")
        .header("cookie", format!("{access}; {refresh}"))
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send_raw(&app, logout).await;

    assert_eq!(status, StatusCode::OK);
    let cleared = set_cookies(&headers);
    assert!(
        cleared
            .iter()
            .any(|c| c.starts_with(&format!("{REFRESH_COOKIE}=;")) && c.contains("Max-Age=0")),
        "{cleared:?}"
    );

    let (status, _, _) = send_raw(&app, get_with_cookie("/api/v1/auth/me", &refresh)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
