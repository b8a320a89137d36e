use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{get, get_authed, login_as, test_app};

async fn dashboard_for(email: &str) -> Value {
    let app = test_app();
    let token = login_as(&app, email).await;
    let (status, response) = get_authed(&app, "/api/v1/dashboard", &token).await;
    assert_eq!(status, StatusCode::OK, "Dashboard for {email} failed: {:?}", response);
    assert_eq!(response["kind"], "role");
    response
}

fn patient_ids(dashboard: &Value) -> Vec<&str> {
    dashboard["patients"]
        .as_array()
        .expect("patients array")
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect()
}

fn stat<'a>(dashboard: &'a Value, label: &str) -> &'a Value {
    dashboard["stats"]
        .as_array()
        .expect("stats array")
        .iter()
        .find(|s| s["label"] == label)
        .map(|s| &s["value"])
        .unwrap_or_else(|| panic!("no stat {label}"))
}

#[tokio::test]
async fn dashboard_requires_authentication() {
    let app = test_app();

    let (status, _) = get(&app, "/api/v1/dashboard").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn therapist_sees_own_caseload() {
    let dashboard = dashboard_for("therapist@ablelyf.test").await;

    assert_eq!(dashboard["role"], "therapist");
    assert_eq!(dashboard["title"], "Welcome back, Sarah");
    assert_eq!(patient_ids(&dashboard), vec!["patient-1", "patient-2"]);
    assert_eq!(stat(&dashboard, "My patients"), "2");
    assert_eq!(stat(&dashboard, "Open alerts"), "2");
}

#[tokio::test]
async fn caregiver_sees_one_child() {
    let dashboard = dashboard_for("caregiver@ablelyf.test").await;

    assert_eq!(dashboard["role"], "caregiver");
    assert_eq!(patient_ids(&dashboard), vec!["patient-1"]);
    assert_eq!(stat(&dashboard, "Child"), "Emma Thompson");
}

#[tokio::test]
async fn caregiver_with_two_linked_patients_sees_only_the_first() {
    let dashboard = dashboard_for("m.garcia@ablelyf.test").await;

    assert_eq!(patient_ids(&dashboard), vec!["patient-3"]);
}

#[tokio::test]
async fn teacher_sees_assigned_students() {
    let dashboard = dashboard_for("teacher@ablelyf.test").await;

    assert_eq!(dashboard["role"], "teacher");
    assert_eq!(
        patient_ids(&dashboard),
        vec!["patient-1", "patient-2", "patient-4"]
    );
    assert_eq!(stat(&dashboard, "Students"), "3");
}

#[tokio::test]
async fn hr_sees_caseload_distribution() {
    let dashboard = dashboard_for("hr@ablelyf.test").await;

    assert_eq!(dashboard["role"], "hr");
    assert_eq!(patient_ids(&dashboard).len(), 4);
    let caseloads = dashboard["caseloads"].as_array().unwrap();
    assert_eq!(caseloads.len(), 2);
    assert!(caseloads.iter().all(|c| c["patients"] == 2));
    assert!(caseloads.iter().any(|c| c["therapist_name"] == "Sarah Johnson"));
    assert_eq!(stat(&dashboard, "Avg. caseload"), "2.0");
}

#[tokio::test]
async fn admin_sees_only_high_severity_alerts() {
    let dashboard = dashboard_for("admin@ablelyf.test").await;

    assert_eq!(dashboard["role"], "admin");
    let alerts = dashboard["alerts"].as_array().unwrap();
    assert!(!alerts.is_empty());
    assert!(alerts.iter().all(|a| a["severity"] == "high"));
    // Open ones first.
    assert_eq!(alerts[0]["resolved"], false);
}
