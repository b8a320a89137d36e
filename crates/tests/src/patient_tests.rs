use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{get, get_authed, login_as, test_app};

fn ids(response: &Value) -> Vec<&str> {
    response
        .as_array()
        .expect("Expected JSON array")
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect()
}

#[tokio::test]
async fn list_patients_requires_authentication() {
    let app = test_app();

    let (status, _) = get(&app, "/api/v1/patients").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_patients_per_role() {
    let app = test_app();
    let cases = [
        ("therapist@ablelyf.test", vec!["patient-1", "patient-2"]),
        ("m.chen@ablelyf.test", vec!["patient-3", "patient-4"]),
        ("r.wilson@ablelyf.test", vec!["patient-2"]),
        ("teacher@ablelyf.test", vec!["patient-1", "patient-2", "patient-4"]),
        ("hr@ablelyf.test", vec!["patient-1", "patient-2", "patient-3", "patient-4"]),
    ];

    for (email, expected) in cases {
        let token = login_as(&app, email).await;
        let (status, response) = get_authed(&app, "/api/v1/patients", &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&response), expected, "patients for {email}");
    }
}

#[tokio::test]
async fn search_matches_name_or_condition() {
    let app = test_app();
    let token = login_as(&app, "admin@ablelyf.test").await;

    let (_, by_name) = get_authed(&app, "/api/v1/patients?q=emma", &token).await;
    let (_, by_condition) = get_authed(&app, "/api/v1/patients?q=adhd", &token).await;

    assert_eq!(ids(&by_name), vec!["patient-1"]);
    assert_eq!(ids(&by_condition), vec!["patient-2"]);
}

#[tokio::test]
async fn condition_filter_is_exact() {
    let app = test_app();
    let token = login_as(&app, "admin@ablelyf.test").await;

    let (status, response) = get_authed(
        &app,
        "/api/v1/patients?condition=Autism%20Spectrum%20Disorder",
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&response), vec!["patient-1", "patient-4"]);
}

#[tokio::test]
async fn get_patient_in_scope() {
    let app = test_app();
    let token = login_as(&app, "teacher@ablelyf.test").await;

    let (status, response) = get_authed(&app, "/api/v1/patients/patient-4", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["name"], "Liam Garcia");
}

#[tokio::test]
async fn get_patient_out_of_scope_is_not_found() {
    let app = test_app();
    // patient-3 has no teacher.
    let token = login_as(&app, "teacher@ablelyf.test").await;

    let (status, _) = get_authed(&app, "/api/v1/patients/patient-3", &token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
