use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{get_authed, login_as, post_json_authed, test_app};

fn progress(value: i32) -> String {
    json!({ "progress": value }).to_string()
}

#[tokio::test]
async fn list_plans_is_scoped() {
    let app = test_app();
    let token = login_as(&app, "m.chen@ablelyf.test").await;

    let (status, response) = get_authed(&app, "/api/v1/plans", &token).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = response
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["plan-3", "plan-4"]);
}

#[tokio::test]
async fn therapist_updates_goal_progress() {
    let app = test_app();
    let token = login_as(&app, "therapist@ablelyf.test").await;

    let (status, response) = post_json_authed(
        &app,
        "/api/v1/plans/plan-1/goals/goal-2/progress",
        &progress(55),
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{:?}", response);
    assert_eq!(response["plan_id"], "plan-1");
    assert_eq!(response["update"], "updated");
    assert_eq!(response["goal"]["progress"], 55);
    assert_eq!(response["goal"]["status"], "in-progress");
}

#[tokio::test]
async fn reaching_100_achieves_and_locks_the_goal() {
    let app = test_app();
    let token = login_as(&app, "therapist@ablelyf.test").await;
    let uri = "/api/v1/plans/plan-2/goals/goal-4/progress";

    let (_, achieved) = post_json_authed(&app, uri, &progress(100), &token).await;
    assert_eq!(achieved["update"], "achieved");
    assert_eq!(achieved["goal"]["status"], "achieved");

    let (status, locked) = post_json_authed(&app, uri, &progress(20), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(locked["update"], "locked");
    assert_eq!(locked["goal"]["progress"], 100);
}

#[tokio::test]
async fn progress_is_clamped() {
    let app = test_app();
    let token = login_as(&app, "admin@ablelyf.test").await;

    let (_, below) = post_json_authed(
        &app,
        "/api/v1/plans/plan-4/goals/goal-7/progress",
        &progress(-15),
        &token,
    )
    .await;
    assert_eq!(below["goal"]["progress"], 0);

    let (_, above) = post_json_authed(
        &app,
        "/api/v1/plans/plan-4/goals/goal-7/progress",
        &progress(250),
        &token,
    )
    .await;
    assert_eq!(above["goal"]["progress"], 100);
    assert_eq!(above["update"], "achieved");
}

#[tokio::test]
async fn caregiver_cannot_edit_goals() {
    let app = test_app();
    let token = login_as(&app, "caregiver@ablelyf.test").await;

    let (status, _) = post_json_authed(
        &app,
        "/api/v1/plans/plan-1/goals/goal-1/progress",
        &progress(90),
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn other_therapists_plan_is_not_found() {
    let app = test_app();
    let token = login_as(&app, "therapist@ablelyf.test").await;

    let (status, _) = post_json_authed(
        &app,
        "/api/v1/plans/plan-3/goals/goal-6/progress",
        &progress(10),
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_goal_is_not_found() {
    let app = test_app();
    let token = login_as(&app, "therapist@ablelyf.test").await;

    let (status, _) = post_json_authed(
        &app,
        "/api/v1/plans/plan-1/goals/goal-99/progress",
        &progress(10),
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
