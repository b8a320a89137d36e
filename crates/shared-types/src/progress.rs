use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point in a patient's progress series for a developmental domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProgressRecord {
    pub patient_id: String,
    pub date: NaiveDate,
    /// e.g. "communication", "motor", "social".
    pub domain: String,
    /// 0..=100
    pub score: u8,
}

/// Averaged score for one date across the records it was built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub score: u8,
}
