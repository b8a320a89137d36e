pub mod error;
pub mod feature_flags;
pub mod models;
pub mod role;

// Care domain
pub mod alert;
pub mod assessment;
pub mod learning;
pub mod patient;
pub mod plan;
pub mod progress;
pub mod schedule;

// Derived views and client-side rules
pub mod dashboard;
pub mod guard;
pub mod insights;
pub mod media;
pub mod projections;

pub use error::*;
pub use feature_flags::*;
pub use models::*;
pub use role::*;

pub use alert::*;
pub use assessment::*;
pub use learning::*;
pub use patient::*;
pub use plan::*;
pub use progress::*;
pub use schedule::*;

pub use dashboard::{
    compose, patient_count, visible_patients, Caseload, DashboardData, DashboardView,
    PlanSummary, RoleDashboard, StaffMember, StatTile, Tone,
};
// guard, insights, media and projections are used through their module
// paths (shared_types::guard::protected, ...).
