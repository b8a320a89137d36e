use dioxus::prelude::*;
use std::future::Future;
use shared_types::guard::SessionState;
use shared_types::{AppError, Role, SessionUser};

/// Client-side session state.
///
/// Components read the signals; only the methods below write them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<SessionUser>>,
    pub is_loading: Signal<bool>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_user: Signal::new(None),
            is_loading: Signal::new(false),
        }
    }

    /// Mark the startup session check as pending. Guards show a neutral
    /// loading state until [`finish_restore`](Self::finish_restore).
    pub fn begin_restore(&mut self) {
        self.is_loading.set(true);
    }

    pub fn finish_restore(&mut self, user: Option<SessionUser>) {
        self.current_user.set(user);
        self.is_loading.set(false);
    }

    pub fn set_user(&mut self, user: SessionUser) {
        self.current_user.set(Some(user));
        self.is_loading.set(false);
    }

    pub fn clear_auth(&mut self) {
        self.current_user.set(None);
        self.is_loading.set(false);
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    /// Snapshot for the route guards.
    pub fn session(&self) -> SessionState {
        SessionState {
            current_user: self.current_user.read().clone(),
            is_loading: *self.is_loading.read(),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user.read().as_ref().and_then(|u| u.role())
    }

    /// Sign out locally when a server call reports the session is gone.
    /// Returns whether it did.
    pub fn expire_on(&mut self, err: &ServerFnError) -> bool {
        let expired = AppError::from_server_error(&err.to_string())
            .is_some_and(|e| e.is_auth_failure());
        if expired {
            self.clear_auth();
        }
        expired
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// `use_resource` for a server call made on behalf of the signed-in user.
/// An expired session signs the user out; other failures are logged and
/// left in the resource for the page to render.
pub fn use_session_resource<T, F>(
    mut fetch: impl FnMut() -> F + 'static,
) -> Resource<Result<T, ServerFnError>>
where
    T: 'static,
    F: Future<Output = Result<T, ServerFnError>> + 'static,
{
    let mut auth = use_auth();
    use_resource(move || {
        let call = fetch();
        async move {
            let result = call.await;
            if let Err(e) = &result {
                if !auth.expire_on(e) {
                    tracing::warn!(%e, "Server call failed");
                }
            }
            result
        }
    })
}
