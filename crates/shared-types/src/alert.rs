use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Behavioral,
    Sensory,
    Medical,
    Emergency,
}

impl AlertType {
    pub fn label(&self) -> &'static str {
        match self {
            AlertType::Behavioral => "Behavioral",
            AlertType::Sensory => "Sensory",
            AlertType::Medical => "Medical",
            AlertType::Emergency => "Emergency",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// A patient alert raised by staff or a caregiver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Alert {
    pub id: String,
    pub patient_id: String,
    #[serde(rename = "type")]
    pub kind: AlertType,
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub resolved: bool,
}

impl Alert {
    /// Mark resolved. Returns `false` if it already was.
    pub fn resolve(&mut self) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        true
    }
}

/// Result of a resolve request. None of these are errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ResolveOutcome {
    Resolved,
    AlreadyResolved,
    NotFound,
}

impl ResolveOutcome {
    /// Whether the UI should confirm with a toast.
    pub fn should_notify(&self) -> bool {
        matches!(self, ResolveOutcome::Resolved)
    }
}

/// Resolve the alert with `id` in place. Unknown ids leave the slice untouched.
pub fn resolve_alert(alerts: &mut [Alert], id: &str) -> ResolveOutcome {
    match alerts.iter_mut().find(|a| a.id == id) {
        Some(alert) => {
            if alert.resolve() {
                ResolveOutcome::Resolved
            } else {
                ResolveOutcome::AlreadyResolved
            }
        }
        None => ResolveOutcome::NotFound,
    }
}
