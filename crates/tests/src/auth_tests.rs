use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::FeatureFlags;

use crate::common::{
    get, get_authed, login_as, post_json, post_json_authed, test_app, test_app_with_flags,
    DEMO_PASSWORD,
};

// ─── Login ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_returns_user_and_token() {
    let app = test_app();
    let body = json!({ "email": "therapist@ablelyf.test", "password": DEMO_PASSWORD }).to_string();

    let (status, response) = post_json(&app, "/api/v1/auth/login", &body).await;

    assert_eq!(status, StatusCode::OK, "Login failed: {:?}", response);
    assert_eq!(response["user"]["name"], "Sarah Johnson");
    assert_eq!(response["user"]["role"], "therapist");
    assert!(response["access_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn login_email_is_case_insensitive() {
    let app = test_app();
    let body = json!({ "email": "HR@AbleLyf.test", "password": DEMO_PASSWORD }).to_string();

    let (status, response) = post_json(&app, "/api/v1/auth/login", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["user"]["role"], "hr");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = test_app();
    let body = json!({ "email": "therapist@ablelyf.test", "password": "not-the-password" }).to_string();

    let (status, response) = post_json(&app, "/api/v1/auth/login", &body).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["message"], "Invalid email or password");
}

#[tokio::test]
async fn unknown_email_gets_the_same_error_as_wrong_password() {
    let app = test_app();
    let body = json!({ "email": "nobody@ablelyf.test", "password": DEMO_PASSWORD }).to_string();

    let (status, response) = post_json(&app, "/api/v1/auth/login", &body).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["message"], "Invalid email or password");
}

#[tokio::test]
async fn malformed_email_is_a_validation_error() {
    let app = test_app();
    let body = json!({ "email": "not-an-email", "password": DEMO_PASSWORD }).to_string();

    let (status, response) = post_json(&app, "/api/v1/auth/login", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["field_errors"]["email"].is_string(), "{:?}", response);
}

// ─── Register ───────────────────────────────────────────────────────────────

fn registration(email: &str, role: &str) -> String {
    json!({
        "name": "Priya Shah",
        "email": email,
        "password": "long-enough-pw",
        "role": role,
    })
    .to_string()
}

#[tokio::test]
async fn register_creates_account_and_signs_in() {
    let app = test_app();

    let (status, response) = post_json(
        &app,
        "/api/v1/auth/register",
        &registration("priya@ablelyf.test", "teacher"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "Register failed: {:?}", response);
    assert_eq!(response["user"]["email"], "priya@ablelyf.test");
    assert_eq!(response["user"]["role"], "teacher");

    let token = response["access_token"].as_str().unwrap();
    let (status, me) = get_authed(&app, "/api/v1/auth/me", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["name"], "Priya Shah");
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let app = test_app();

    let (status, _) = post_json(
        &app,
        "/api/v1/auth/register",
        &registration("Caregiver@ablelyf.test", "caregiver"),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_unknown_role_is_rejected() {
    let app = test_app();

    let (status, _) = post_json(
        &app,
        "/api/v1/auth/register",
        &registration("priya@ablelyf.test", "superuser"),
    )
    .await;

    assert!(status.is_client_error(), "got {status}");
}

#[tokio::test]
async fn register_cannot_claim_privileged_roles() {
    let app = test_app();

    for role in ["admin", "hr"] {
        let email = format!("{role}-signup@ablelyf.test");
        let (status, response) =
            post_json(&app, "/api/v1/auth/register", &registration(&email, role)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{role}: {:?}", response);
        assert!(response["field_errors"]["role"].is_string(), "{:?}", response);

        let login = json!({ "email": email, "password": "long-enough-pw" }).to_string();
        let (status, _) = post_json(&app, "/api/v1/auth/login", &login).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn register_short_password_is_a_validation_error() {
    let app = test_app();
    let body = json!({
        "name": "Priya Shah",
        "email": "priya@ablelyf.test",
        "password": "short",
        "role": "teacher",
    })
    .to_string();

    let (status, response) = post_json(&app, "/api/v1/auth/register", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["field_errors"]["password"].is_string(), "{:?}", response);
}

#[tokio::test]
async fn register_is_forbidden_when_self_registration_is_off() {
    let app = test_app_with_flags(FeatureFlags::default());

    let (status, _) = post_json(
        &app,
        "/api/v1/auth/register",
        &registration("priya@ablelyf.test", "teacher"),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ─── Me / logout ────────────────────────────────────────────────────────────

#[tokio::test]
async fn me_requires_authentication() {
    let app = test_app();

    let (status, _) = get(&app, "/api/v1/auth/me").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_rejects_a_garbage_token() {
    let app = test_app();

    let (status, _) = get_authed(&app, "/api/v1/auth/me", "not.a.jwt").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_the_signed_in_user() {
    let app = test_app();
    let token = login_as(&app, "teacher@ablelyf.test").await;

    let (status, response) = get_authed(&app, "/api/v1/auth/me", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["name"], "Lisa Park");
    assert_eq!(response["role"], "teacher");
}

#[tokio::test]
async fn logout_requires_authentication() {
    let app = test_app();

    let (status, _) = post_json(&app, "/api/v1/auth/logout", "{}").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_acknowledges() {
    let app = test_app();
    let token = login_as(&app, "admin@ablelyf.test").await;

    let (status, response) = post_json_authed(&app, "/api/v1/auth/logout", "{}", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["message"], "Signed out");
}
