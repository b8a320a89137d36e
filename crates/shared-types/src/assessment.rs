use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl AssessmentStatus {
    pub const ALL: [AssessmentStatus; 3] = [
        AssessmentStatus::Scheduled,
        AssessmentStatus::InProgress,
        AssessmentStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::Scheduled => "scheduled",
            AssessmentStatus::InProgress => "in-progress",
            AssessmentStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssessmentStatus::Scheduled => "Scheduled",
            AssessmentStatus::InProgress => "In progress",
            AssessmentStatus::Completed => "Completed",
        }
    }
}

/// A standardized evaluation of a patient (e.g. a communication screening).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Assessment {
    pub id: String,
    pub patient_id: String,
    pub title: String,
    /// Instrument or category, e.g. "Speech & Language".
    pub kind: String,
    pub scheduled_for: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    pub status: AssessmentStatus,
}

/// Keep assessments matching `status`; `None` keeps everything.
pub fn filter_by_status(
    assessments: &[Assessment],
    status: Option<AssessmentStatus>,
) -> Vec<Assessment> {
    assessments
        .iter()
        .filter(|a| status.is_none_or(|s| a.status == s))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(id: &str, status: AssessmentStatus) -> Assessment {
        Assessment {
            id: id.into(),
            patient_id: "patient-1".into(),
            title: "Sensory profile".into(),
            kind: "Occupational".into(),
            scheduled_for: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            score: None,
            status,
        }
    }

    #[test]
    fn filter_keeps_matching_status() {
        let list = vec![
            assessment("a", AssessmentStatus::Scheduled),
            assessment("b", AssessmentStatus::Completed),
        ];
        let done = filter_by_status(&list, Some(AssessmentStatus::Completed));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, "b");
        assert_eq!(filter_by_status(&list, None).len(), 2);
    }

    #[test]
    fn status_parses_its_own_keys() {
        for status in AssessmentStatus::ALL {
            assert_eq!(AssessmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AssessmentStatus::parse("cancelled"), None);
    }
}
