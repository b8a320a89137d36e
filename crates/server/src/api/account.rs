use dioxus::prelude::*;
use shared_types::{FeatureFlags, SessionUser};

#[cfg(feature = "server")]
use crate::error_convert::AppResultExt;

#[cfg(feature = "server")]
use crate::store::get_store;

/// Get the current feature flags. No auth required; flags are not sensitive.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// Sign in with email and password. Sets HTTP-only auth cookies on success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(email: String, password: String) -> Result<SessionUser, ServerFnError> {
    use crate::auth::cookies;
    use shared_types::LoginRequest;

    let req = LoginRequest { email, password };
    let session = crate::identity::login(get_store(), &req)
        .await
        .or_server_fn_error()?;

    cookies::schedule_auth_cookies(&session.access_token, &session.refresh_token);
    Ok(session.user)
}

/// Create an account and sign it in. Sets HTTP-only auth cookies on success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn register(
    name: String,
    email: String,
    password: String,
    role: String,
) -> Result<SessionUser, ServerFnError> {
    use crate::auth::cookies;
    use shared_types::RegisterRequest;

    let req = RegisterRequest {
        name,
        email,
        password,
        role,
    };
    let session = crate::identity::register(get_store(), crate::config::feature_flags(), &req)
        .await
        .or_server_fn_error()?;

    cookies::schedule_auth_cookies(&session.access_token, &session.refresh_token);
    Ok(session.user)
}

/// Restore the session from cookies. `None` means signed out.
///
/// Reads the Claims the auth middleware placed in request extensions (it has
/// already handled transparent refresh), falling back to cookie parsing.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_current_user() -> Result<Option<SessionUser>, ServerFnError> {
    use crate::auth::cookies;

    let Ok(claims) = super::auth::require_auth() else {
        return Ok(None);
    };

    let user = crate::identity::current_user(get_store(), &claims).await;
    if user.is_none() {
        // The account behind the token is gone; drop the stale cookies so the
        // client does not keep presenting them.
        cookies::schedule_clear_cookies();
        tracing::warn!(user_id = claims.sub, "Token references a missing user, clearing cookies");
    }
    Ok(user)
}

/// Revoke the caller's refresh tokens and clear the auth cookies.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    use crate::auth::cookies;

    if let Ok(claims) = super::auth::require_auth() {
        crate::identity::end_session(get_store(), claims.sub).await;
    }

    cookies::schedule_clear_cookies();
    Ok(())
}
