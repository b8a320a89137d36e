//! Derived values computed from the entity collections.
//!
//! Nothing here is stored; pages and the dashboard call these instead of
//! recomputing counts and averages inline.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::alert::{Alert, Severity};
use crate::patient::Patient;
use crate::plan::{GoalStatus, TherapyPlan};
use crate::progress::{ProgressPoint, ProgressRecord};

/// Mean goal progress of a plan, rounded. A plan without goals is 0.
pub fn plan_progress(plan: &TherapyPlan) -> u8 {
    if plan.goals.is_empty() {
        return 0;
    }
    let total: u32 = plan.goals.iter().map(|g| u32::from(g.progress)).sum();
    let mean = (total as f64 / plan.goals.len() as f64).round();
    mean.clamp(0.0, 100.0) as u8
}

pub fn achieved_goal_count(plan: &TherapyPlan) -> usize {
    plan.goals
        .iter()
        .filter(|g| g.status == GoalStatus::Achieved)
        .count()
}

pub fn unresolved_alert_count(alerts: &[Alert]) -> usize {
    alerts.iter().filter(|a| !a.resolved).count()
}

/// Open alert counts per severity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AlertCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl AlertCounts {
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

pub fn open_alert_counts(alerts: &[Alert]) -> AlertCounts {
    alerts
        .iter()
        .filter(|a| !a.resolved)
        .fold(AlertCounts::default(), |mut counts, a| {
            match a.severity {
                Severity::Low => counts.low += 1,
                Severity::Medium => counts.medium += 1,
                Severity::High => counts.high += 1,
            }
            counts
        })
}

/// Keep only items belonging to one of `patients`.
pub fn for_patients<'a, T>(
    items: &'a [T],
    patients: &[&Patient],
    patient_id: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    let ids: HashSet<&str> = patients.iter().map(|p| p.id.as_str()).collect();
    items
        .iter()
        .filter(|item| ids.contains(patient_id(*item)))
        .collect()
}

/// Per-date mean score across the given records, oldest first.
pub fn progress_series(records: &[&ProgressRecord]) -> Vec<ProgressPoint> {
    let mut by_date: BTreeMap<_, (u32, u32)> = BTreeMap::new();
    for record in records {
        let entry = by_date.entry(record.date).or_insert((0, 0));
        entry.0 += u32::from(record.score);
        entry.1 += 1;
    }
    by_date
        .into_iter()
        .map(|(date, (sum, n))| ProgressPoint {
            date,
            score: (sum as f64 / n as f64).round() as u8,
        })
        .collect()
}

/// Mean of the latest score per patient and domain. `None` without data.
pub fn average_latest_score(records: &[&ProgressRecord]) -> Option<u8> {
    let mut latest: BTreeMap<(&str, &str), &ProgressRecord> = BTreeMap::new();
    for &record in records {
        let key = (record.patient_id.as_str(), record.domain.as_str());
        match latest.get(&key) {
            Some(existing) if existing.date >= record.date => {}
            _ => {
                latest.insert(key, record);
            }
        }
    }
    if latest.is_empty() {
        return None;
    }
    let sum: u32 = latest.values().map(|r| u32::from(r.score)).sum();
    Some((sum as f64 / latest.len() as f64).round() as u8)
}

/// Patient count per therapist id, ascending by id.
pub fn caseload_by_therapist(patients: &[&Patient]) -> BTreeMap<i64, usize> {
    let mut caseload = BTreeMap::new();
    for patient in patients {
        *caseload.entry(patient.therapist_id).or_insert(0) += 1;
    }
    caseload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertType;
    use crate::plan::{Goal, PlanStatus};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
    }

    fn plan(progress: &[u8]) -> TherapyPlan {
        TherapyPlan {
            id: "plan-1".into(),
            patient_id: "patient-1".into(),
            title: "Communication".into(),
            start_date: date(1),
            end_date: None,
            goals: progress
                .iter()
                .enumerate()
                .map(|(i, p)| Goal {
                    id: format!("goal-{i}"),
                    title: "Goal".into(),
                    description: String::new(),
                    progress: *p,
                    status: if *p == 100 {
                        GoalStatus::Achieved
                    } else {
                        GoalStatus::InProgress
                    },
                })
                .collect(),
            status: PlanStatus::Active,
        }
    }

    fn alert(severity: Severity, resolved: bool) -> Alert {
        Alert {
            id: "a".into(),
            patient_id: "patient-1".into(),
            kind: AlertType::Medical,
            severity,
            message: String::new(),
            timestamp: "2025-02-01T08:00:00Z".parse().unwrap(),
            resolved,
        }
    }

    fn record(patient: &str, domain: &str, day: u32, score: u8) -> ProgressRecord {
        ProgressRecord {
            patient_id: patient.into(),
            date: date(day),
            domain: domain.into(),
            score,
        }
    }

    #[test]
    fn plan_progress_is_mean_of_goals() {
        assert_eq!(plan_progress(&plan(&[20, 40, 90])), 50);
        assert_eq!(plan_progress(&plan(&[33, 34])), 34);
        assert_eq!(plan_progress(&plan(&[])), 0);
    }

    #[test]
    fn achieved_goals_are_counted() {
        assert_eq!(achieved_goal_count(&plan(&[100, 50, 100])), 2);
    }

    #[test]
    fn open_counts_skip_resolved() {
        let alerts = vec![
            alert(Severity::High, false),
            alert(Severity::High, true),
            alert(Severity::Low, false),
        ];
        let counts = open_alert_counts(&alerts);
        assert_eq!(counts, AlertCounts { low: 1, medium: 0, high: 1 });
        assert_eq!(counts.total(), unresolved_alert_count(&alerts));
    }

    #[test]
    fn series_averages_per_date() {
        let records = [
            record("p1", "motor", 2, 40),
            record("p2", "motor", 2, 60),
            record("p1", "motor", 1, 30),
        ];
        let refs: Vec<_> = records.iter().collect();
        let series = progress_series(&refs);
        assert_eq!(
            series,
            vec![
                ProgressPoint { date: date(1), score: 30 },
                ProgressPoint { date: date(2), score: 50 },
            ]
        );
    }

    #[test]
    fn latest_score_ignores_older_records() {
        let records = [
            record("p1", "motor", 1, 10),
            record("p1", "motor", 5, 70),
            record("p1", "social", 3, 50),
        ];
        let refs: Vec<_> = records.iter().collect();
        assert_eq!(average_latest_score(&refs), Some(60));
        assert_eq!(average_latest_score(&[]), None);
    }
}
