use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{get, test_app};

#[tokio::test]
async fn health_reports_ok_without_auth() {
    let app = test_app();

    let (status, response) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ok");
    assert_eq!(response["users"], 8);
}

#[tokio::test]
async fn docs_are_served() {
    let app = test_app();

    let (status, _) = get(&app, "/docs").await;

    assert_eq!(status, StatusCode::OK);
}
