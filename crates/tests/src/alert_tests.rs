use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{get_authed, login_as, post_json, post_json_authed, test_app};

#[tokio::test]
async fn list_alerts_is_scoped_and_newest_first() {
    let app = test_app();
    let token = login_as(&app, "therapist@ablelyf.test").await;

    let (status, response) = get_authed(&app, "/api/v1/alerts", &token).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = response
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["alert-1", "alert-2", "alert-3"]);
}

#[tokio::test]
async fn resolve_open_alert() {
    let app = test_app();
    let token = login_as(&app, "therapist@ablelyf.test").await;

    let (status, response) =
        post_json_authed(&app, "/api/v1/alerts/alert-1/resolve", "{}", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, "resolved");

    let (_, alerts) = get_authed(&app, "/api/v1/alerts", &token).await;
    let alert = alerts
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == "alert-1")
        .unwrap();
    assert_eq!(alert["resolved"], true);
}

#[tokio::test]
async fn resolving_twice_reports_already_resolved() {
    let app = test_app();
    let token = login_as(&app, "therapist@ablelyf.test").await;

    let (_, first) = post_json_authed(&app, "/api/v1/alerts/alert-2/resolve", "{}", &token).await;
    let (status, second) =
        post_json_authed(&app, "/api/v1/alerts/alert-2/resolve", "{}", &token).await;

    assert_eq!(first, "resolved");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, "already_resolved");
}

#[tokio::test]
async fn unknown_alert_is_not_found_without_error() {
    let app = test_app();
    let token = login_as(&app, "admin@ablelyf.test").await;

    let (status, response) =
        post_json_authed(&app, "/api/v1/alerts/alert-999/resolve", "{}", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, "not_found");
}

#[tokio::test]
async fn alert_of_another_caseload_is_not_found() {
    let app = test_app();
    let token = login_as(&app, "therapist@ablelyf.test").await;

    // alert-4 belongs to patient-3, Michael's patient.
    let (status, response) =
        post_json_authed(&app, "/api/v1/alerts/alert-4/resolve", "{}", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, "not_found");

    let admin = login_as(&app, "admin@ablelyf.test").await;
    let (_, alerts) = get_authed(&app, "/api/v1/alerts", &admin).await;
    let alert = alerts
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == "alert-4")
        .unwrap();
    assert_eq!(alert["resolved"], false);
}

#[tokio::test]
async fn resolve_requires_authentication() {
    let app = test_app();

    let (status, _) = post_json(&app, "/api/v1/alerts/alert-1/resolve", "{}").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
