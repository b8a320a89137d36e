use axum::{
    extract::{Path, State},
    Json,
};
use shared_types::{AppError, GoalProgressRequest, GoalProgressResult, TherapyPlan};

use super::scope_for;
use crate::auth::extractors::AuthRequired;
use crate::store::SharedStore;

/// Therapy plans of the caller's patients.
#[utoipa::path(
    get,
    path = "/api/v1/plans",
    responses(
        (status = 200, description = "Visible plans", body = Vec<TherapyPlan>),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "plans"
)]
#[tracing::instrument(skip(store, auth))]
pub async fn list_plans(
    State(store): State<SharedStore>,
    auth: AuthRequired,
) -> Result<Json<Vec<TherapyPlan>>, AppError> {
    let scope = scope_for(&store, &auth).await?;
    Ok(Json(store.plans(&scope).await))
}

/// Report progress on a goal. Values are clamped to 0..=100; achieved goals
/// are locked.
#[utoipa::path(
    post,
    path = "/api/v1/plans/{plan_id}/goals/{goal_id}/progress",
    params(
        ("plan_id" = String, Path, description = "Therapy plan ID"),
        ("goal_id" = String, Path, description = "Goal ID")
    ),
    request_body = GoalProgressRequest,
    responses(
        (status = 200, description = "Goal after the update", body = GoalProgressResult),
        (status = 403, description = "Caller may not edit this plan", body = AppError),
        (status = 404, description = "No such plan or goal", body = AppError)
    ),
    tag = "plans"
)]
#[tracing::instrument(skip(store, auth, payload))]
pub async fn record_goal_progress(
    State(store): State<SharedStore>,
    auth: AuthRequired,
    Path((plan_id, goal_id)): Path<(String, String)>,
    Json(payload): Json<GoalProgressRequest>,
) -> Result<Json<GoalProgressResult>, AppError> {
    let scope = scope_for(&store, &auth).await?;
    let (goal, update) = store
        .record_goal_progress(&scope, &plan_id, &goal_id, payload.progress)
        .await?;
    Ok(Json(GoalProgressResult {
        plan_id,
        goal,
        update,
    }))
}
