use axum::{
    extract::{Path, State},
    Json,
};
use shared_types::{Alert, AppError, ResolveOutcome};

use super::scope_for;
use crate::auth::extractors::AuthRequired;
use crate::store::SharedStore;

/// Alerts of the caller's patients, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/alerts",
    responses(
        (status = 200, description = "Visible alerts", body = Vec<Alert>),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "alerts"
)]
#[tracing::instrument(skip(store, auth))]
pub async fn list_alerts(
    State(store): State<SharedStore>,
    auth: AuthRequired,
) -> Result<Json<Vec<Alert>>, AppError> {
    let scope = scope_for(&store, &auth).await?;
    Ok(Json(store.alerts(&scope).await))
}

/// Resolve an alert. Always 200: the outcome says whether anything changed.
#[utoipa::path(
    post,
    path = "/api/v1/alerts/{id}/resolve",
    params(("id" = String, Path, description = "Alert ID")),
    responses(
        (status = 200, description = "Resolve outcome", body = ResolveOutcome),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "alerts"
)]
#[tracing::instrument(skip(store, auth))]
pub async fn resolve_alert(
    State(store): State<SharedStore>,
    auth: AuthRequired,
    Path(id): Path<String>,
) -> Result<Json<ResolveOutcome>, AppError> {
    let scope = scope_for(&store, &auth).await?;
    let outcome = store.resolve_alert(&scope, &id).await;
    tracing::info!(alert_id = %id, ?outcome, "Resolve alert");
    Ok(Json(outcome))
}
