//! Shared formatting utilities for the UI layer.

use chrono::{DateTime, NaiveDate, Utc};
use shared_types::{AssessmentStatus, GoalStatus, PlanStatus, Severity, Tone};
use shared_ui::{BadgeVariant, StatAccent};

/// "Jan 20, 2026"
pub fn format_date_human(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Day heading for the calendar: "Tuesday, Jan 20".
pub fn format_day_heading(date: NaiveDate) -> String {
    date.format("%A, %b %-d").to_string()
}

/// Coarse age of a timestamp relative to `now`: "just now", "5m ago",
/// "3h ago", "2d ago". Future timestamps read as "just now".
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

/// "45 min", "1 h", "1 h 30 min"
pub fn format_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}

pub fn severity_badge(severity: Severity) -> BadgeVariant {
    match severity {
        Severity::High => BadgeVariant::Destructive,
        Severity::Medium => BadgeVariant::Warning,
        Severity::Low => BadgeVariant::Secondary,
    }
}

pub fn plan_status_badge(status: PlanStatus) -> BadgeVariant {
    match status {
        PlanStatus::Active => BadgeVariant::Primary,
        PlanStatus::Completed => BadgeVariant::Success,
        PlanStatus::Draft => BadgeVariant::Outline,
    }
}

pub fn goal_status_badge(status: GoalStatus) -> BadgeVariant {
    match status {
        GoalStatus::Achieved => BadgeVariant::Success,
        GoalStatus::InProgress => BadgeVariant::Primary,
        GoalStatus::NotStarted => BadgeVariant::Outline,
    }
}

pub fn assessment_status_badge(status: AssessmentStatus) -> BadgeVariant {
    match status {
        AssessmentStatus::Completed => BadgeVariant::Success,
        AssessmentStatus::Scheduled => BadgeVariant::Primary,
        AssessmentStatus::InProgress => BadgeVariant::Warning,
    }
}

pub fn tone_accent(tone: Tone) -> StatAccent {
    match tone {
        Tone::Neutral => StatAccent::Neutral,
        Tone::Positive => StatAccent::Positive,
        Tone::Warning => StatAccent::Warning,
        Tone::Critical => StatAccent::Critical,
    }
}
