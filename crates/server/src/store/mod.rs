//! In-memory data store.
//!
//! Every collection sits behind a `tokio::sync::RwLock`. Readers take
//! snapshots; the only writers are the named methods below, so alert and
//! goal transitions always go through their forward-only rules.

mod seed;

pub use seed::DEMO_PASSWORD;

use axum::extract::FromRef;
use chrono::{DateTime, Utc};
use shared_types::{
    Alert, AppError, Assessment, CalendarEvent, DashboardData, FeatureFlags, Goal, GoalUpdate,
    LearningModule, Patient, ProgressRecord, ResolveOutcome, Role, SessionUser, StaffMember,
    TherapyPlan,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};
use tokio::sync::RwLock;

/// A registered account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

impl UserRecord {
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.as_str().to_string(),
        }
    }
}

/// Fields needed to create an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
struct RefreshTokenRecord {
    user_id: i64,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CareRecords {
    pub patients: Vec<Patient>,
    pub progress: Vec<ProgressRecord>,
    pub alerts: Vec<Alert>,
    pub plans: Vec<TherapyPlan>,
    pub assessments: Vec<Assessment>,
    pub modules: Vec<LearningModule>,
    pub events: Vec<CalendarEvent>,
}

/// Patient ids a signed-in user may see.
pub struct CareScope {
    role: Role,
    user_id: i64,
    patient_ids: HashSet<String>,
}

impl CareScope {
    pub fn new(role: Role, user_id: i64, patients: &[Patient]) -> Self {
        let patient_ids = shared_types::visible_patients(role, user_id, patients)
            .into_iter()
            .map(|p| p.id.clone())
            .collect();
        Self {
            role,
            user_id,
            patient_ids,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn covers(&self, patient_id: &str) -> bool {
        self.patient_ids.contains(patient_id)
    }

    /// HR and admins see the whole calendar; everyone else sees events
    /// they take part in plus shared ones.
    pub fn sees_event(&self, event: &CalendarEvent) -> bool {
        matches!(self.role, Role::Hr | Role::Admin) || event.involves(self.user_id)
    }

    /// Therapists edit plans of their own patients; admins edit any plan.
    pub fn can_edit_plan(&self, plan: &TherapyPlan) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Therapist => self.covers(&plan.patient_id),
            _ => false,
        }
    }
}

pub struct Store {
    users: RwLock<Vec<UserRecord>>,
    care: RwLock<CareRecords>,
    refresh_tokens: RwLock<HashMap<String, RefreshTokenRecord>>,
}

pub type SharedStore = Arc<Store>;

/// Shared application state passed to Axum handlers via `State`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: SharedStore,
    pub flags: FeatureFlags,
}

impl AppState {
    pub fn new(store: SharedStore, flags: FeatureFlags) -> Self {
        Self { store, flags }
    }
}

static STORE: OnceLock<SharedStore> = OnceLock::new();

/// The process-wide store used by server functions, seeded on first use.
/// REST handlers receive the same `Arc` through `AppState`.
pub fn get_store() -> &'static SharedStore {
    STORE.get_or_init(|| Arc::new(Store::seeded()))
}

impl Store {
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), CareRecords::default())
    }

    /// Demo accounts (one or more per role) and their care records.
    pub fn seeded() -> Self {
        let (users, care) = seed::demo_data();
        tracing::info!(
            users = users.len(),
            patients = care.patients.len(),
            "Seeded in-memory store"
        );
        Self::from_parts(users, care)
    }

    fn from_parts(users: Vec<UserRecord>, care: CareRecords) -> Self {
        Self {
            users: RwLock::new(users),
            care: RwLock::new(care),
            refresh_tokens: RwLock::new(HashMap::new()),
        }
    }

    // ── Users ───────────────────────────────────────────────────────

    pub async fn find_user(&self, id: i64) -> Option<UserRecord> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    /// Case-insensitive email lookup.
    pub async fn find_user_by_email(&self, email: &str) -> Option<UserRecord> {
        let email = email.trim();
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Insert an account. Emails are unique regardless of case.
    pub async fn insert_user(&self, new: NewUser) -> Result<UserRecord, AppError> {
        let mut users = self.users.write().await;
        let email = new.email.trim().to_lowercase();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(AppError::conflict("An account with this email already exists"));
        }
        let record = UserRecord {
            id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            name: new.name.trim().to_string(),
            email,
            role: new.role,
            password_hash: new.password_hash,
        };
        users.push(record.clone());
        Ok(record)
    }

    /// Change a user's role. Returns the updated record.
    pub async fn set_role(&self, id: i64, role: Role) -> Option<UserRecord> {
        let mut users = self.users.write().await;
        let user = users.iter_mut().find(|u| u.id == id)?;
        user.role = role;
        Some(user.clone())
    }

    pub async fn staff(&self) -> Vec<StaffMember> {
        self.users
            .read()
            .await
            .iter()
            .map(|u| StaffMember {
                id: u.id,
                name: u.name.clone(),
                role: u.role,
            })
            .collect()
    }

    // ── Refresh tokens ──────────────────────────────────────────────

    /// Remember a refresh token by its hash, dropping any that have expired.
    pub async fn store_refresh_token(&self, token_hash: String, user_id: i64, expires_at: DateTime<Utc>) {
        let now = Utc::now();
        let mut tokens = self.refresh_tokens.write().await;
        tokens.retain(|_, record| record.expires_at > now);
        tokens.insert(token_hash, RefreshTokenRecord { user_id, expires_at });
    }

    /// Consume a refresh token: succeeds once for a live token belonging to
    /// `user_id`. A matching record is removed whether or not it was live.
    pub async fn consume_refresh_token(&self, token_hash: &str, user_id: i64) -> bool {
        let mut tokens = self.refresh_tokens.write().await;
        if !tokens
            .get(token_hash)
            .is_some_and(|record| record.user_id == user_id)
        {
            return false;
        }
        tokens
            .remove(token_hash)
            .is_some_and(|record| record.expires_at > Utc::now())
    }

    /// Drop every refresh token of a user. Returns how many were live.
    pub async fn revoke_user_tokens(&self, user_id: i64) -> usize {
        let now = Utc::now();
        let mut tokens = self.refresh_tokens.write().await;
        let mut revoked = 0;
        tokens.retain(|_, record| {
            if record.user_id != user_id {
                return true;
            }
            if record.expires_at > now {
                revoked += 1;
            }
            false
        });
        revoked
    }

    // ── Care records ────────────────────────────────────────────────

    pub async fn scope_for(&self, role: Role, user_id: i64) -> CareScope {
        CareScope::new(role, user_id, &self.care.read().await.patients)
    }

    /// Snapshot of everything the dashboard composers read.
    pub async fn dashboard_data(&self) -> DashboardData {
        let staff = self.staff().await;
        let care = self.care.read().await;
        DashboardData {
            patients: care.patients.clone(),
            progress: care.progress.clone(),
            alerts: care.alerts.clone(),
            plans: care.plans.clone(),
            staff,
        }
    }

    pub async fn patients(&self, scope: &CareScope) -> Vec<Patient> {
        self.care
            .read()
            .await
            .patients
            .iter()
            .filter(|p| scope.covers(&p.id))
            .cloned()
            .collect()
    }

    pub async fn plans(&self, scope: &CareScope) -> Vec<TherapyPlan> {
        self.care
            .read()
            .await
            .plans
            .iter()
            .filter(|p| scope.covers(&p.patient_id))
            .cloned()
            .collect()
    }

    pub async fn alerts(&self, scope: &CareScope) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self
            .care
            .read()
            .await
            .alerts
            .iter()
            .filter(|a| scope.covers(&a.patient_id))
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        alerts
    }

    pub async fn assessments(&self, scope: &CareScope) -> Vec<Assessment> {
        let mut assessments: Vec<Assessment> = self
            .care
            .read()
            .await
            .assessments
            .iter()
            .filter(|a| scope.covers(&a.patient_id))
            .cloned()
            .collect();
        assessments.sort_by_key(|a| a.scheduled_for);
        assessments
    }

    pub async fn learning_modules(&self, role: Role) -> Vec<LearningModule> {
        shared_types::modules_for(&self.care.read().await.modules, role)
    }

    pub async fn calendar_events(&self, scope: &CareScope) -> Vec<CalendarEvent> {
        let mut events: Vec<CalendarEvent> = self
            .care
            .read()
            .await
            .events
            .iter()
            .filter(|e| scope.sees_event(e))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.date, e.start_time));
        events
    }

    /// Resolve an alert the caller can see. Alerts outside the scope are
    /// reported as `NotFound`, exactly like unknown ids.
    pub async fn resolve_alert(&self, scope: &CareScope, alert_id: &str) -> ResolveOutcome {
        let mut care = self.care.write().await;
        let visible = care
            .alerts
            .iter()
            .any(|a| a.id == alert_id && scope.covers(&a.patient_id));
        if !visible {
            return ResolveOutcome::NotFound;
        }
        shared_types::resolve_alert(&mut care.alerts, alert_id)
    }

    /// Record progress on one goal of a plan.
    pub async fn record_goal_progress(
        &self,
        scope: &CareScope,
        plan_id: &str,
        goal_id: &str,
        progress: i32,
    ) -> Result<(Goal, GoalUpdate), AppError> {
        let mut care = self.care.write().await;
        let plan = care
            .plans
            .iter_mut()
            .find(|p| p.id == plan_id && scope.covers(&p.patient_id))
            .ok_or_else(|| AppError::not_found("Therapy plan not found"))?;
        if !scope.can_edit_plan(plan) {
            return Err(AppError::forbidden("Only the assigned therapist can update goals"));
        }
        let goal = plan
            .goal_mut(goal_id)
            .ok_or_else(|| AppError::not_found("Goal not found"))?;
        let update = goal.record_progress(progress);
        Ok((goal.clone(), update))
    }
}
