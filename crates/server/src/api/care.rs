use dioxus::prelude::*;
use shared_types::{
    Assessment, CalendarEvent, DashboardView, GoalProgressResult, LearningModule, Patient,
    ResolveOutcome, TherapyPlan,
};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, AppResultExt};

#[cfg(feature = "server")]
use crate::store::get_store;

#[cfg(feature = "server")]
use super::auth::*;

/// The signed-in user's role dashboard.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_dashboard() -> Result<DashboardView, ServerFnError> {
    use shared_types::AppError;

    let claims = require_auth()?;
    let store = get_store();
    let user = crate::identity::current_user(store, &claims)
        .await
        .ok_or_else(|| AppError::unauthorized("Account no longer exists").into_server_fn_error())?;

    let data = store.dashboard_data().await;
    Ok(shared_types::compose(&user.role, &user, &data))
}

/// Patients visible to the caller. Search and condition filters run client-side.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_patients() -> Result<Vec<Patient>, ServerFnError> {
    let scope = require_scope().await?;
    Ok(get_store().patients(&scope).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_therapy_plans() -> Result<Vec<TherapyPlan>, ServerFnError> {
    let scope = require_scope().await?;
    Ok(get_store().plans(&scope).await)
}

/// Assessments of visible patients, earliest first.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_assessments() -> Result<Vec<Assessment>, ServerFnError> {
    let scope = require_scope().await?;
    Ok(get_store().assessments(&scope).await)
}

/// Modules written for the caller's role.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_learning_modules() -> Result<Vec<LearningModule>, ServerFnError> {
    let (_, role) = require_role()?;
    Ok(get_store().learning_modules(role).await)
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_calendar_events() -> Result<Vec<CalendarEvent>, ServerFnError> {
    let scope = require_scope().await?;
    Ok(get_store().calendar_events(&scope).await)
}

/// Mark an alert resolved. Unknown or already-resolved alerts are not errors.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn resolve_alert(alert_id: String) -> Result<ResolveOutcome, ServerFnError> {
    let scope = require_scope().await?;
    let outcome = get_store().resolve_alert(&scope, &alert_id).await;
    tracing::info!(alert_id, ?outcome, "Resolve alert");
    Ok(outcome)
}

/// Report progress on a therapy goal.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn record_goal_progress(
    plan_id: String,
    goal_id: String,
    progress: i32,
) -> Result<GoalProgressResult, ServerFnError> {
    let scope = require_scope().await?;
    let (goal, update) = get_store()
        .record_goal_progress(&scope, &plan_id, &goal_id, progress)
        .await
        .or_server_fn_error()?;
    tracing::info!(plan_id, goal_id, ?update, "Goal progress recorded");
    Ok(GoalProgressResult {
        plan_id,
        goal,
        update,
    })
}
