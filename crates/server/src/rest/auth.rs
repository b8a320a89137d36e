use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use shared_types::{
    AppError, AuthResponse, FeatureFlags, LoginRequest, MessageResponse, RegisterRequest,
    SessionUser,
};

use crate::auth::cookies;
use crate::auth::extractors::AuthRequired;
use crate::identity::{self, IssuedSession};
use crate::store::SharedStore;

/// Cookies for browser clients plus the token in the body for API clients.
fn session_response(session: IssuedSession) -> (HeaderMap, Json<AuthResponse>) {
    let mut headers = HeaderMap::new();
    cookies::set_auth_cookies(&mut headers, &session.access_token, &session.refresh_token);
    (
        headers,
        Json(AuthResponse {
            user: session.user,
            access_token: session.access_token,
        }),
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = AppError),
        (status = 422, description = "Malformed request", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(store, payload))]
pub async fn login(
    State(store): State<SharedStore>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), AppError> {
    let session = identity::login(&store, &payload).await?;
    Ok(session_response(session))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 403, description = "Registration disabled", body = AppError),
        (status = 409, description = "Email already registered", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(store, flags, payload))]
pub async fn register(
    State(store): State<SharedStore>,
    State(flags): State<FeatureFlags>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, HeaderMap, Json<AuthResponse>), AppError> {
    let session = identity::register(&store, &flags, &payload).await?;
    let (headers, body) = session_response(session);
    Ok((StatusCode::CREATED, headers, body))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(store, auth))]
pub async fn logout(
    State(store): State<SharedStore>,
    auth: AuthRequired,
) -> (HeaderMap, Json<MessageResponse>) {
    identity::end_session(&store, auth.0.sub).await;
    let mut headers = HeaderMap::new();
    cookies::clear_auth_cookies(&mut headers);
    (headers, Json(MessageResponse::new("Signed out")))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = SessionUser),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(store, auth))]
pub async fn me(
    State(store): State<SharedStore>,
    auth: AuthRequired,
) -> Result<Json<SessionUser>, AppError> {
    identity::current_user(&store, &auth.0)
        .await
        .map(Json)
        .ok_or_else(|| AppError::unauthorized("Account no longer exists"))
}
