//! Route access rules.
//!
//! The client router consults these on every render, so a change in
//! session state (for example a logout) flips the outcome without
//! rebuilding the route tree.

use crate::models::SessionUser;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/dashboard";

/// Snapshot of the identity state the guards decide on.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub current_user: Option<SessionUser>,
    /// True until the startup session restore has finished.
    pub is_loading: bool,
}

impl SessionState {
    pub fn loading() -> Self {
        Self {
            current_user: None,
            is_loading: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            current_user: None,
            is_loading: false,
        }
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            current_user: Some(user),
            is_loading: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// Only for visitors without a session (login, register).
    GuestOnly,
    Protected,
}

/// Outcome of a guard check for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Loading,
    Render,
    Redirect(&'static str),
}

/// First-match path table. Anything not listed is Not Found.
pub const ROUTE_TABLE: &[(&str, RouteAccess)] = &[
    ("/", RouteAccess::Public),
    ("/login", RouteAccess::GuestOnly),
    ("/register", RouteAccess::GuestOnly),
    ("/dashboard", RouteAccess::Protected),
    ("/video-session", RouteAccess::Protected),
    ("/patients", RouteAccess::Protected),
    ("/therapy-plans", RouteAccess::Protected),
    ("/assessments", RouteAccess::Protected),
    ("/learning-modules", RouteAccess::Protected),
    ("/calendar", RouteAccess::Protected),
];

/// Guard for views that need a signed-in user.
///
/// Never redirects while the session is still loading.
pub fn protected(session: &SessionState) -> GuardOutcome {
    if session.is_loading {
        GuardOutcome::Loading
    } else if session.current_user.is_some() {
        GuardOutcome::Render
    } else {
        GuardOutcome::Redirect(LOGIN_PATH)
    }
}

/// Inverse guard for login/register: signed-in users go to the dashboard.
pub fn guest_only(session: &SessionState) -> GuardOutcome {
    if session.is_loading {
        GuardOutcome::Loading
    } else if session.current_user.is_some() {
        GuardOutcome::Redirect(HOME_PATH)
    } else {
        GuardOutcome::Render
    }
}

pub fn access_for(path: &str) -> Option<RouteAccess> {
    let path = normalize(path);
    ROUTE_TABLE
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, access)| *access)
}

/// Full navigation decision for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Loading,
    Render,
    Redirect(&'static str),
    NotFound,
}

impl From<GuardOutcome> for Navigation {
    fn from(outcome: GuardOutcome) -> Self {
        match outcome {
            GuardOutcome::Loading => Navigation::Loading,
            GuardOutcome::Render => Navigation::Render,
            GuardOutcome::Redirect(to) => Navigation::Redirect(to),
        }
    }
}

/// What the router does when `path` is visited with `session`.
pub fn resolve_navigation(path: &str, session: &SessionState) -> Navigation {
    match access_for(path) {
        None => Navigation::NotFound,
        Some(RouteAccess::Public) => Navigation::Render,
        Some(RouteAccess::GuestOnly) => guest_only(session).into(),
        Some(RouteAccess::Protected) => protected(session).into(),
    }
}

/// Drop query, fragment and a trailing slash.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> SessionUser {
        SessionUser {
            id: 1,
            name: "Sarah Johnson".into(),
            email: "therapist@ablelyf.test".into(),
            role: role.into(),
        }
    }

    fn protected_paths() -> impl Iterator<Item = &'static str> {
        ROUTE_TABLE
            .iter()
            .filter(|(_, a)| *a == RouteAccess::Protected)
            .map(|(p, _)| *p)
    }

    #[test]
    fn loading_never_redirects() {
        let mut loading_with_user = SessionState::signed_in(user("therapist"));
        loading_with_user.is_loading = true;
        for session in [SessionState::loading(), loading_with_user] {
            for (path, _) in ROUTE_TABLE.iter().filter(|(_, a)| *a != RouteAccess::Public) {
                assert_eq!(
                    resolve_navigation(path, &session),
                    Navigation::Loading,
                    "{path}"
                );
            }
        }
    }

    #[test]
    fn signed_out_visitor_is_sent_to_login() {
        let session = SessionState::signed_out();
        assert_eq!(
            resolve_navigation("/patients", &session),
            Navigation::Redirect("/login")
        );
        for path in protected_paths() {
            assert_eq!(
                resolve_navigation(path, &session),
                Navigation::Redirect(LOGIN_PATH),
                "{path}"
            );
        }
    }

    #[test]
    fn signed_in_user_cannot_reach_login_or_register() {
        let session = SessionState::signed_in(user("caregiver"));
        assert_eq!(
            resolve_navigation("/login", &session),
            Navigation::Redirect("/dashboard")
        );
        assert_eq!(
            resolve_navigation("/register", &session),
            Navigation::Redirect("/dashboard")
        );
    }

    #[test]
    fn logout_flips_protected_route_to_redirect() {
        let mut session = SessionState::signed_in(user("teacher"));
        assert_eq!(resolve_navigation("/dashboard", &session), Navigation::Render);
        session.current_user = None;
        assert_eq!(
            resolve_navigation("/dashboard", &session),
            Navigation::Redirect(LOGIN_PATH)
        );
    }

    #[test]
    fn landing_is_public_in_every_state() {
        for session in [
            SessionState::loading(),
            SessionState::signed_out(),
            SessionState::signed_in(user("hr")),
        ] {
            assert_eq!(resolve_navigation("/", &session), Navigation::Render);
        }
    }

    #[test]
    fn unknown_paths_are_not_found() {
        let session = SessionState::signed_in(user("admin"));
        assert_eq!(resolve_navigation("/billing", &session), Navigation::NotFound);
        assert_eq!(
            resolve_navigation("/patients/extra", &session),
            Navigation::NotFound
        );
    }

    #[test]
    fn query_and_trailing_slash_are_ignored() {
        let session = SessionState::signed_out();
        assert_eq!(
            resolve_navigation("/patients/?q=emma", &session),
            Navigation::Redirect(LOGIN_PATH)
        );
        assert_eq!(access_for("/calendar#today"), Some(RouteAccess::Protected));
    }
}
