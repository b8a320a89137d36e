use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Draft,
    Active,
    Completed,
}

impl PlanStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "Draft",
            PlanStatus::Active => "Active",
            PlanStatus::Completed => "Completed",
        }
    }
}

/// Goal status. Ordered so that transitions can only move forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    NotStarted,
    InProgress,
    Achieved,
}

impl GoalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "Not started",
            GoalStatus::InProgress => "In progress",
            GoalStatus::Achieved => "Achieved",
        }
    }

    fn for_progress(progress: u8) -> Self {
        match progress {
            0 => GoalStatus::NotStarted,
            100 => GoalStatus::Achieved,
            _ => GoalStatus::InProgress,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: String,
    /// 0..=100
    pub progress: u8,
    pub status: GoalStatus,
}

/// What happened to a goal after a progress report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum GoalUpdate {
    Updated,
    Achieved,
    /// The goal was already achieved; nothing changed.
    Locked,
}

impl Goal {
    /// Record a new progress value, clamped to 0..=100.
    ///
    /// Status never moves backwards, and an achieved goal ignores further
    /// reports.
    pub fn record_progress(&mut self, value: i32) -> GoalUpdate {
        if self.status == GoalStatus::Achieved {
            return GoalUpdate::Locked;
        }
        let progress = value.clamp(0, 100) as u8;
        self.progress = progress;
        self.status = self.status.max(GoalStatus::for_progress(progress));
        if self.status == GoalStatus::Achieved {
            GoalUpdate::Achieved
        } else {
            GoalUpdate::Updated
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TherapyPlan {
    pub id: String,
    pub patient_id: String,
    pub title: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub goals: Vec<Goal>,
    pub status: PlanStatus,
}

impl TherapyPlan {
    pub fn goal_mut(&mut self, goal_id: &str) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| g.id == goal_id)
    }
}

/// Goal progress report body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GoalProgressRequest {
    pub progress: i32,
}

/// Goal state after a progress report, returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GoalProgressResult {
    pub plan_id: String,
    pub goal: Goal,
    pub update: GoalUpdate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(progress: u8, status: GoalStatus) -> Goal {
        Goal {
            id: "goal-1".into(),
            title: "Initiate peer greetings".into(),
            description: "Greets two peers unprompted each morning".into(),
            progress,
            status,
        }
    }

    #[test]
    fn progress_is_clamped() {
        let mut g = goal(10, GoalStatus::InProgress);
        g.record_progress(-40);
        assert_eq!(g.progress, 0);
        g.record_progress(250);
        assert_eq!(g.progress, 100);
    }

    #[test]
    fn reaching_100_achieves() {
        let mut g = goal(80, GoalStatus::InProgress);
        assert_eq!(g.record_progress(100), GoalUpdate::Achieved);
        assert_eq!(g.status, GoalStatus::Achieved);
    }

    #[test]
    fn status_never_moves_backwards() {
        let mut g = goal(40, GoalStatus::InProgress);
        assert_eq!(g.record_progress(0), GoalUpdate::Updated);
        assert_eq!(g.progress, 0);
        assert_eq!(g.status, GoalStatus::InProgress);
    }

    #[test]
    fn achieved_goal_is_locked() {
        let mut g = goal(100, GoalStatus::Achieved);
        assert_eq!(g.record_progress(20), GoalUpdate::Locked);
        assert_eq!(g.progress, 100);
        assert_eq!(g.status, GoalStatus::Achieved);
    }

    #[test]
    fn first_report_starts_goal() {
        let mut g = goal(0, GoalStatus::NotStarted);
        g.record_progress(5);
        assert_eq!(g.status, GoalStatus::InProgress);
    }

    #[test]
    fn goal_status_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&GoalStatus::NotStarted).unwrap(),
            "\"not-started\""
        );
    }
}
