use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared_types::{AppError, Patient};

use super::scope_for;
use crate::auth::extractors::AuthRequired;
use crate::store::SharedStore;

#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct PatientListParams {
    /// Case-insensitive match on name or condition.
    pub q: Option<String>,
    /// Exact condition (case-insensitive).
    pub condition: Option<String>,
}

impl PatientListParams {
    fn matches(&self, patient: &Patient) -> bool {
        self.q.as_deref().is_none_or(|q| patient.matches_query(q))
            && self
                .condition
                .as_deref()
                .is_none_or(|c| patient.has_condition(c))
    }
}

/// Patients visible to the caller, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/v1/patients",
    params(PatientListParams),
    responses(
        (status = 200, description = "Visible patients", body = Vec<Patient>),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "patients"
)]
#[tracing::instrument(skip(store, auth))]
pub async fn list_patients(
    State(store): State<SharedStore>,
    auth: AuthRequired,
    Query(params): Query<PatientListParams>,
) -> Result<Json<Vec<Patient>>, AppError> {
    let scope = scope_for(&store, &auth).await?;
    let patients = store
        .patients(&scope)
        .await
        .into_iter()
        .filter(|p| params.matches(p))
        .collect();
    Ok(Json(patients))
}

/// One patient. Patients outside the caller's scope are reported as not found.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}",
    params(("id" = String, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Patient", body = Patient),
        (status = 404, description = "No such patient", body = AppError)
    ),
    tag = "patients"
)]
#[tracing::instrument(skip(store, auth))]
pub async fn get_patient(
    State(store): State<SharedStore>,
    auth: AuthRequired,
    Path(id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    let scope = scope_for(&store, &auth).await?;
    store
        .patients(&scope)
        .await
        .into_iter()
        .find(|p| p.id == id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("Patient not found"))
}
