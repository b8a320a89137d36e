pub mod alerts;
pub mod auth;
pub mod dashboard;
pub mod patients;
pub mod plans;

use axum::{
    routing::{get, post},
    Router,
};
use shared_types::AppError;

use crate::auth::extractors::AuthRequired;
use crate::store::{AppState, CareScope, Store};

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        // Dashboard
        .route("/dashboard", get(dashboard::get_dashboard))
        // Alerts
        .route("/alerts", get(alerts::list_alerts))
        .route("/alerts/{id}/resolve", post(alerts::resolve_alert))
        // Patients
        .route("/patients", get(patients::list_patients))
        .route("/patients/{id}", get(patients::get_patient))
        // Therapy plans
        .route("/plans", get(plans::list_plans))
        .route(
            "/plans/{plan_id}/goals/{goal_id}/progress",
            post(plans::record_goal_progress),
        )
}

/// Build the REST API router, versioned under `/api/v1`.
pub fn api_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// The caller's care scope. Unknown role claims are forbidden.
pub(crate) async fn scope_for(store: &Store, auth: &AuthRequired) -> Result<CareScope, AppError> {
    let role = auth.role()?;
    Ok(store.scope_for(role, auth.0.sub).await)
}
