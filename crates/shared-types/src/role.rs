use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role controlling dashboard composition and data visibility.
///
/// - `Therapist`: sees the patients on their own caseload.
/// - `Caregiver`: sees exactly one linked patient.
/// - `Teacher`: sees the students assigned to their classroom.
/// - `Hr`: staffing view over every patient and therapist caseload.
/// - `Admin`: every patient, high-severity alerts only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Therapist,
    Caregiver,
    Teacher,
    Hr,
    Admin,
}

impl Role {
    /// Every role in display order.
    pub const ALL: [Role; 5] = [
        Role::Therapist,
        Role::Caregiver,
        Role::Teacher,
        Role::Hr,
        Role::Admin,
    ];

    /// Roles a visitor may pick when registering. Admin and HR accounts
    /// are provisioned by an operator.
    pub const SELF_SERVICE: [Role; 3] = [Role::Therapist, Role::Caregiver, Role::Teacher];

    pub fn is_self_service(&self) -> bool {
        Self::SELF_SERVICE.contains(self)
    }

    /// Parse a role claim. Unknown values yield `None` so callers can
    /// render a fallback instead of guessing.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "therapist" => Some(Role::Therapist),
            "caregiver" => Some(Role::Caregiver),
            "teacher" => Some(Role::Teacher),
            "hr" => Some(Role::Hr),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Lowercase key used in tokens and config.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Therapist => "therapist",
            Role::Caregiver => "caregiver",
            Role::Teacher => "teacher",
            Role::Hr => "hr",
            Role::Admin => "admin",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Therapist => "Therapist",
            Role::Caregiver => "Caregiver",
            Role::Teacher => "Teacher",
            Role::Hr => "HR",
            Role::Admin => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
