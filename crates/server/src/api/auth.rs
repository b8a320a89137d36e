// Server-only auth helpers for server functions.
// These are shared across all api/* modules.

use dioxus::prelude::*;
use shared_types::{AppError, Role};

use crate::auth::jwt::Claims;
use crate::error_convert::AppErrorExt;
use crate::store::{get_store, CareScope};

/// Extract and validate the caller's identity from the current request.
/// Checks middleware-injected Claims first, falls back to cookie parsing.
pub(crate) fn require_auth() -> Result<Claims, ServerFnError> {
    use crate::auth::{cookies, jwt};

    let ctx = dioxus::fullstack::FullstackContext::current()
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())?;

    let parts = ctx.parts_mut();

    if let Some(claims) = parts.extensions.get::<Claims>() {
        return Ok(claims.clone());
    }

    let headers = parts.headers.clone();
    let token = cookies::extract_access_token(&headers)
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())?;

    jwt::validate_access_token(&token)
        .map_err(|_| AppError::unauthorized("Invalid or expired token").into_server_fn_error())
}

/// Claims whose role this build knows.
pub(crate) fn require_role() -> Result<(Claims, Role), ServerFnError> {
    let claims = require_auth()?;
    let role = Role::parse(&claims.role).ok_or_else(|| {
        AppError::forbidden(format!("Unknown role '{}'", claims.role)).into_server_fn_error()
    })?;
    Ok((claims, role))
}

/// The caller's care scope (which patients they may see).
pub(crate) async fn require_scope() -> Result<CareScope, ServerFnError> {
    let (claims, role) = require_role()?;
    Ok(get_store().scope_for(role, claims.sub).await)
}
