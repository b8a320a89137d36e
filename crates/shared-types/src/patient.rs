use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A patient (or student) receiving therapy. Read-only reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub conditions: Vec<String>,
    pub diagnosis_date: NaiveDate,
    pub therapist_id: i64,
    pub caregiver_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Patient {
    /// Case-insensitive match on name or any condition.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self
                .conditions
                .iter()
                .any(|c| c.to_lowercase().contains(&query))
    }

    pub fn has_condition(&self, condition: &str) -> bool {
        self.conditions
            .iter()
            .any(|c| c.eq_ignore_ascii_case(condition))
    }

    /// Initials for avatar placeholders.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

/// Distinct conditions across a patient list, sorted, for filter dropdowns.
pub fn distinct_conditions(patients: &[Patient]) -> Vec<String> {
    let mut all: Vec<String> = patients
        .iter()
        .flat_map(|p| p.conditions.iter().cloned())
        .collect();
    all.sort();
    all.dedup();
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient() -> Patient {
        Patient {
            id: "patient-1".into(),
            name: "Emma Thompson".into(),
            age: 8,
            conditions: vec!["Autism Spectrum Disorder".into(), "ADHD".into()],
            diagnosis_date: NaiveDate::from_ymd_opt(2021, 3, 15).unwrap(),
            therapist_id: 1,
            caregiver_id: 2,
            teacher_id: Some(3),
            avatar_url: None,
        }
    }

    #[test]
    fn query_matches_name_and_condition() {
        let p = patient();
        assert!(p.matches_query("emma"));
        assert!(p.matches_query("adhd"));
        assert!(p.matches_query("  "));
        assert!(!p.matches_query("dyslexia"));
    }

    #[test]
    fn has_condition_ignores_case() {
        assert!(patient().has_condition("adhd"));
        assert!(!patient().has_condition("autism"));
    }

    #[test]
    fn initials_use_first_two_words() {
        assert_eq!(patient().initials(), "ET");
    }

    #[test]
    fn distinct_conditions_are_sorted_and_unique() {
        let mut other = patient();
        other.conditions = vec!["ADHD".into(), "Cerebral Palsy".into()];
        assert_eq!(
            distinct_conditions(&[patient(), other]),
            vec!["ADHD", "Autism Spectrum Disorder", "Cerebral Palsy"]
        );
    }
}
