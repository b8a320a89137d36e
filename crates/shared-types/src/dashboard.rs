//! Role-specific dashboard composition.
//!
//! Each role maps to a compose function in [`COMPOSERS`]. Every composer is
//! a pure projection over [`DashboardData`]: it filters the shared
//! collections down to what the role may see and arranges them into the same
//! [`RoleDashboard`] shape. Adding a role means adding one table entry.

use serde::{Deserialize, Serialize};

use crate::alert::{Alert, Severity};
use crate::models::SessionUser;
use crate::patient::Patient;
use crate::plan::{PlanStatus, TherapyPlan};
use crate::progress::{ProgressPoint, ProgressRecord};
use crate::projections::{
    achieved_goal_count, average_latest_score, caseload_by_therapist, for_patients,
    open_alert_counts, plan_progress, progress_series,
};
use crate::role::Role;

/// A staff member referenced by patients (therapist, teacher, caregiver).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StaffMember {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

/// Everything a composer may read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardData {
    pub patients: Vec<Patient>,
    pub progress: Vec<ProgressRecord>,
    pub alerts: Vec<Alert>,
    pub plans: Vec<TherapyPlan>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
}

/// Visual emphasis of a stat tile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Positive,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatTile {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub tone: Tone,
}

impl StatTile {
    fn new(label: &str, value: impl ToString, tone: Tone) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            hint: None,
            tone,
        }
    }

    fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PlanSummary {
    pub id: String,
    pub title: String,
    pub patient_name: String,
    pub status: PlanStatus,
    /// Mean goal progress, derived.
    pub progress: u8,
    pub achieved_goals: usize,
    pub total_goals: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Caseload {
    pub therapist_id: i64,
    pub therapist_name: String,
    pub patients: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoleDashboard {
    pub role: Role,
    pub title: String,
    pub subtitle: String,
    pub stats: Vec<StatTile>,
    pub patients: Vec<Patient>,
    /// Newest first, open alerts before resolved ones.
    pub alerts: Vec<Alert>,
    pub plans: Vec<PlanSummary>,
    pub progress: Vec<ProgressPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caseloads: Vec<Caseload>,
}

/// What the dashboard page renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardView {
    Role(RoleDashboard),
    /// The session carries a role claim this build does not know.
    UnknownRole { role: String },
}

pub type ComposeFn = fn(&SessionUser, &DashboardData) -> RoleDashboard;

/// Role → composer lookup.
pub const COMPOSERS: &[(Role, ComposeFn)] = &[
    (Role::Therapist, compose_therapist),
    (Role::Caregiver, compose_caregiver),
    (Role::Teacher, compose_teacher),
    (Role::Hr, compose_hr),
    (Role::Admin, compose_admin),
];

/// Build the dashboard for `role`. Unknown roles get the fallback view.
pub fn compose(role: &str, user: &SessionUser, data: &DashboardData) -> DashboardView {
    let composer = Role::parse(role)
        .and_then(|r| COMPOSERS.iter().find(|(known, _)| *known == r))
        .map(|(_, f)| *f);
    match composer {
        Some(f) => DashboardView::Role(f(user, data)),
        None => DashboardView::UnknownRole {
            role: role.to_string(),
        },
    }
}

/// Patients a role may see.
///
/// Therapists and teachers see the patients assigned to them, a caregiver
/// sees exactly one linked patient, HR and admins see everyone.
pub fn visible_patients<'a>(role: Role, user_id: i64, patients: &'a [Patient]) -> Vec<&'a Patient> {
    match role {
        Role::Therapist => patients
            .iter()
            .filter(|p| p.therapist_id == user_id)
            .collect(),
        Role::Caregiver => patients
            .iter()
            .find(|p| p.caregiver_id == user_id)
            .into_iter()
            .collect(),
        Role::Teacher => patients
            .iter()
            .filter(|p| p.teacher_id == Some(user_id))
            .collect(),
        Role::Hr | Role::Admin => patients.iter().collect(),
    }
}

/// Number of patients visible to `user`. Unknown roles see none.
pub fn patient_count(user: &SessionUser, patients: &[Patient]) -> usize {
    user.role()
        .map(|role| visible_patients(role, user.id, patients).len())
        .unwrap_or(0)
}

/// Collections narrowed to a set of patients.
struct Slice<'a> {
    patients: Vec<&'a Patient>,
    alerts: Vec<&'a Alert>,
    plans: Vec<&'a TherapyPlan>,
    progress: Vec<&'a ProgressRecord>,
}

impl<'a> Slice<'a> {
    fn new(role: Role, user: &SessionUser, data: &'a DashboardData) -> Self {
        let patients = visible_patients(role, user.id, &data.patients);
        let alerts = for_patients(&data.alerts, &patients, |a| a.patient_id.as_str());
        let plans = for_patients(&data.plans, &patients, |p| p.patient_id.as_str());
        let progress = for_patients(&data.progress, &patients, |r| r.patient_id.as_str());
        Self {
            patients,
            alerts,
            plans,
            progress,
        }
    }

    fn open_alerts(&self) -> usize {
        self.alerts.iter().filter(|a| !a.resolved).count()
    }

    fn active_plans(&self) -> usize {
        self.plans
            .iter()
            .filter(|p| p.status == PlanStatus::Active)
            .count()
    }

    fn average_progress(&self) -> String {
        average_latest_score(&self.progress)
            .map(|s| format!("{s}%"))
            .unwrap_or_else(|| "n/a".to_string())
    }

    fn into_dashboard(
        self,
        role: Role,
        title: String,
        subtitle: String,
        stats: Vec<StatTile>,
    ) -> RoleDashboard {
        let plans = self
            .plans
            .iter()
            .map(|plan| summarize_plan(plan, &self.patients))
            .collect();
        RoleDashboard {
            role,
            title,
            subtitle,
            stats,
            progress: progress_series(&self.progress),
            patients: self.patients.into_iter().cloned().collect(),
            alerts: sorted_alerts(self.alerts),
            plans,
            caseloads: Vec::new(),
        }
    }
}

fn summarize_plan(plan: &TherapyPlan, patients: &[&Patient]) -> PlanSummary {
    let patient_name = patients
        .iter()
        .find(|p| p.id == plan.patient_id)
        .map(|p| p.name.clone())
        .unwrap_or_default();
    PlanSummary {
        id: plan.id.clone(),
        title: plan.title.clone(),
        patient_name,
        status: plan.status,
        progress: plan_progress(plan),
        achieved_goals: achieved_goal_count(plan),
        total_goals: plan.goals.len(),
    }
}

fn sorted_alerts(alerts: Vec<&Alert>) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = alerts.into_iter().cloned().collect();
    alerts.sort_by(|a, b| {
        a.resolved
            .cmp(&b.resolved)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    });
    alerts
}

fn alert_tone(open: usize) -> Tone {
    if open == 0 {
        Tone::Positive
    } else {
        Tone::Warning
    }
}

fn compose_therapist(user: &SessionUser, data: &DashboardData) -> RoleDashboard {
    let slice = Slice::new(Role::Therapist, user, data);
    let open = slice.open_alerts();
    let stats = vec![
        StatTile::new("My patients", slice.patients.len(), Tone::Neutral),
        StatTile::new("Open alerts", open, alert_tone(open)),
        StatTile::new("Active plans", slice.active_plans(), Tone::Neutral),
        StatTile::new("Avg. progress", slice.average_progress(), Tone::Positive)
            .hint("Latest score per domain"),
    ];
    let title = format!("Welcome back, {}", user.first_name());
    slice.into_dashboard(
        Role::Therapist,
        title,
        "Your caseload at a glance".into(),
        stats,
    )
}

fn compose_caregiver(user: &SessionUser, data: &DashboardData) -> RoleDashboard {
    let slice = Slice::new(Role::Caregiver, user, data);
    let open = slice.open_alerts();
    let child = slice
        .patients
        .first()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "No linked patient".to_string());
    let plan_mean = if slice.plans.is_empty() {
        "n/a".to_string()
    } else {
        let total: u32 = slice.plans.iter().map(|p| u32::from(plan_progress(p))).sum();
        format!("{}%", total / slice.plans.len() as u32)
    };
    let achieved: usize = slice.plans.iter().map(|p| achieved_goal_count(p)).sum();
    let stats = vec![
        StatTile::new("Child", child.clone(), Tone::Neutral),
        StatTile::new("Plan progress", plan_mean, Tone::Positive),
        StatTile::new("Goals achieved", achieved, Tone::Positive),
        StatTile::new("Open alerts", open, alert_tone(open)),
    ];
    slice.into_dashboard(
        Role::Caregiver,
        format!("Hello, {}", user.first_name()),
        format!("How {child} is doing"),
        stats,
    )
}

fn compose_teacher(user: &SessionUser, data: &DashboardData) -> RoleDashboard {
    let slice = Slice::new(Role::Teacher, user, data);
    let open = slice.open_alerts();
    let stats = vec![
        StatTile::new("Students", slice.patients.len(), Tone::Neutral),
        StatTile::new("Open alerts", open, alert_tone(open)),
        StatTile::new("Support plans", slice.active_plans(), Tone::Neutral),
        StatTile::new("Avg. progress", slice.average_progress(), Tone::Positive),
    ];
    slice.into_dashboard(
        Role::Teacher,
        format!("Good day, {}", user.first_name()),
        "Students with active support plans".into(),
        stats,
    )
}

fn compose_hr(user: &SessionUser, data: &DashboardData) -> RoleDashboard {
    let slice = Slice::new(Role::Hr, user, data);
    let caseloads: Vec<Caseload> = caseload_by_therapist(&slice.patients)
        .into_iter()
        .map(|(therapist_id, patients)| Caseload {
            therapist_id,
            therapist_name: staff_name(&data.staff, therapist_id),
            patients,
        })
        .collect();
    let therapists = caseloads.len();
    let average = if therapists == 0 {
        0.0
    } else {
        slice.patients.len() as f64 / therapists as f64
    };
    let heaviest = caseloads.iter().map(|c| c.patients).max().unwrap_or(0);
    let stats = vec![
        StatTile::new("Patients", slice.patients.len(), Tone::Neutral),
        StatTile::new("Therapists", therapists, Tone::Neutral),
        StatTile::new("Avg. caseload", format!("{average:.1}"), Tone::Neutral),
        StatTile::new(
            "Largest caseload",
            heaviest,
            if heaviest > 8 { Tone::Warning } else { Tone::Positive },
        ),
    ];
    let mut dashboard = slice.into_dashboard(
        Role::Hr,
        "Staffing overview".into(),
        "Caseload distribution across therapists".into(),
        stats,
    );
    dashboard.caseloads = caseloads;
    dashboard
}

fn compose_admin(user: &SessionUser, data: &DashboardData) -> RoleDashboard {
    let mut slice = Slice::new(Role::Admin, user, data);
    let counts = open_alert_counts(&data.alerts);
    slice.alerts.retain(|a| a.severity == Severity::High);
    let stats = vec![
        StatTile::new("Patients", slice.patients.len(), Tone::Neutral),
        StatTile::new(
            "High-severity alerts",
            counts.high,
            if counts.high == 0 { Tone::Positive } else { Tone::Critical },
        )
        .hint(format!("{} open in total", counts.total())),
        StatTile::new("Active plans", slice.active_plans(), Tone::Neutral),
        StatTile::new("Avg. progress", slice.average_progress(), Tone::Positive),
    ];
    slice.into_dashboard(
        Role::Admin,
        "Administration".into(),
        "Organization-wide overview".into(),
        stats,
    )
}

fn staff_name(staff: &[StaffMember], id: i64) -> String {
    staff
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| format!("Therapist #{id}"))
}
