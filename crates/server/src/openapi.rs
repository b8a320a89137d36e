use axum::Router;
use shared_types::{
    // Accounts
    AppError, AppErrorKind, AuthResponse, LoginRequest, MessageResponse, RegisterRequest,
    SessionUser,
    // Care records
    Alert, AlertType, Goal, GoalProgressRequest, GoalProgressResult, GoalStatus, GoalUpdate,
    Patient, PlanStatus, ResolveOutcome, Severity, TherapyPlan,
    // Dashboard
    Caseload, DashboardView, PlanSummary, ProgressPoint, RoleDashboard, StaffMember, StatTile,
    Tone,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::health;
use crate::rest;
use crate::store::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        rest::auth::login,
        rest::auth::register,
        rest::auth::logout,
        rest::auth::me,
        // Dashboard
        rest::dashboard::get_dashboard,
        // Alerts
        rest::alerts::list_alerts,
        rest::alerts::resolve_alert,
        // Patients
        rest::patients::list_patients,
        rest::patients::get_patient,
        // Therapy plans
        rest::plans::list_plans,
        rest::plans::record_goal_progress,
        // Health
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind, AuthResponse, LoginRequest, MessageResponse, RegisterRequest,
        SessionUser,
        Alert, AlertType, Severity, ResolveOutcome,
        Patient, TherapyPlan, PlanStatus, Goal, GoalStatus, GoalUpdate, GoalProgressRequest,
        GoalProgressResult,
        DashboardView, RoleDashboard, StatTile, Tone, PlanSummary, Caseload, StaffMember,
        ProgressPoint,
        health::HealthResponse,
    )),
    tags(
        (name = "auth", description = "Sign-in, registration and session endpoints"),
        (name = "dashboard", description = "Role dashboards"),
        (name = "alerts", description = "Patient alerts"),
        (name = "patients", description = "Patients visible to the caller"),
        (name = "plans", description = "Therapy plans and goal progress"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "AbleLyf API",
        description = "Role-based therapy coordination API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the API docs at `/docs`
/// and the REST API at `/api/*`.
///
/// The auth middleware is layered by the caller so it also covers the
/// server function routes.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
