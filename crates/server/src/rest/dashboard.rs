use axum::{extract::State, Json};
use shared_types::{AppError, DashboardView};

use crate::auth::extractors::AuthRequired;
use crate::identity;
use crate::store::SharedStore;

/// The caller's role dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Role dashboard, or the unknown-role fallback", body = DashboardView),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "dashboard"
)]
#[tracing::instrument(skip(store, auth))]
pub async fn get_dashboard(
    State(store): State<SharedStore>,
    auth: AuthRequired,
) -> Result<Json<DashboardView>, AppError> {
    let user = identity::current_user(&store, &auth.0)
        .await
        .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;
    let data = store.dashboard_data().await;
    Ok(Json(shared_types::compose(&user.role, &user, &data)))
}
