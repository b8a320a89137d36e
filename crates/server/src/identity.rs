//! Credential checks and session issuance.
//!
//! Server functions and REST handlers both go through these functions, so
//! a login behaves the same whichever surface it arrives on. Cookie handling
//! stays with the caller.

use shared_types::{AppError, FeatureFlags, LoginRequest, RegisterRequest, Role, SessionUser};

use crate::auth::jwt::{self, Claims};
use crate::auth::{maybe_promote_admin, password};
use crate::error_convert::ValidateRequest;
use crate::store::{NewUser, Store, UserRecord};

/// A freshly issued token pair and the user it belongs to.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub user: SessionUser,
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of a transparent refresh.
#[derive(Debug, Clone)]
pub struct RefreshedSession {
    pub claims: Claims,
    pub access_token: String,
    pub refresh_token: String,
}

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Check an email/password pair.
///
/// Unknown email and wrong password produce the same error.
pub async fn authenticate(store: &Store, req: &LoginRequest) -> Result<UserRecord, AppError> {
    req.validate_request()?;

    let user = store
        .find_user_by_email(&req.email)
        .await
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    let valid = password::verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::internal(e.to_string()))?;
    if !valid {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    Ok(maybe_promote_admin(store, user).await)
}

/// Create an account from a registration form.
pub async fn enroll(
    store: &Store,
    flags: &FeatureFlags,
    req: &RegisterRequest,
) -> Result<UserRecord, AppError> {
    if !flags.self_registration {
        return Err(AppError::forbidden("Registration is disabled"));
    }
    req.validate_request()?;

    let role = Role::parse(&req.role).ok_or_else(|| AppError::bad_request("Choose a valid role"))?;
    if !role.is_self_service() {
        return Err(AppError::forbidden("This role cannot be self-registered"));
    }
    let password_hash =
        password::hash_password(&req.password).map_err(|e| AppError::internal(e.to_string()))?;

    let user = store
        .insert_user(NewUser {
            name: req.name.clone(),
            email: req.email.clone(),
            role,
            password_hash,
        })
        .await?;
    tracing::info!(user_id = user.id, role = %user.role, "Registered new account");

    Ok(maybe_promote_admin(store, user).await)
}

/// Issue an access/refresh pair and remember the refresh token's hash.
pub async fn issue_session(store: &Store, user: &UserRecord) -> Result<IssuedSession, AppError> {
    let role = user.role.as_str();
    let access_token = jwt::create_access_token(user.id, &user.email, role)
        .map_err(|e| AppError::internal(e.to_string()))?;
    let (refresh_token, expires_at) = jwt::create_refresh_token(user.id, &user.email, role)
        .map_err(|e| AppError::internal(e.to_string()))?;

    store
        .store_refresh_token(jwt::hash_token(&refresh_token), user.id, expires_at)
        .await;

    Ok(IssuedSession {
        user: user.session_user(),
        access_token,
        refresh_token,
    })
}

pub async fn login(store: &Store, req: &LoginRequest) -> Result<IssuedSession, AppError> {
    let user = authenticate(store, req).await?;
    tracing::info!(user_id = user.id, role = %user.role, "Signed in");
    issue_session(store, &user).await
}

pub async fn register(
    store: &Store,
    flags: &FeatureFlags,
    req: &RegisterRequest,
) -> Result<IssuedSession, AppError> {
    let user = enroll(store, flags, req).await?;
    issue_session(store, &user).await
}

/// Revoke every refresh token of the user.
pub async fn end_session(store: &Store, user_id: i64) {
    let revoked = store.revoke_user_tokens(user_id).await;
    tracing::info!(user_id, revoked, "Signed out");
}

/// The session user behind validated claims, or `None` if the account is gone.
pub async fn current_user(store: &Store, claims: &Claims) -> Option<SessionUser> {
    store.find_user(claims.sub).await.map(|u| u.session_user())
}

/// Rotate a refresh token. The old token is revoked whether or not the
/// new pair can be issued.
pub async fn refresh_session(store: &Store, refresh_token: &str) -> Option<RefreshedSession> {
    let claims = jwt::validate_refresh_token(refresh_token).ok()?;
    if !store
        .consume_refresh_token(&jwt::hash_token(refresh_token), claims.sub)
        .await
    {
        tracing::debug!(user_id = claims.sub, "Refresh token rejected");
        return None;
    }

    // Role changes since the old token was issued take effect here.
    let user = store.find_user(claims.sub).await?;
    let issued = issue_session(store, &user).await.ok()?;
    let claims = jwt::validate_access_token(&issued.access_token).ok()?;
    Some(RefreshedSession {
        claims,
        access_token: issued.access_token,
        refresh_token: issued.refresh_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DEMO_PASSWORD;
    use shared_types::AppErrorKind;

    fn login_req(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    fn open_registration() -> FeatureFlags {
        FeatureFlags {
            self_registration: true,
            ..FeatureFlags::default()
        }
    }

    fn register_req(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Priya Shah".into(),
            email: email.into(),
            password: "long-enough-pw".into(),
            role: "teacher".into(),
        }
    }

    #[tokio::test]
    async fn demo_login_issues_tokens() {
        let store = Store::seeded();
        let session = login(&store, &login_req("teacher@ablelyf.test", DEMO_PASSWORD))
            .await
            .unwrap();
        assert_eq!(session.user.role, "teacher");
        let claims = jwt::validate_access_token(&session.access_token).unwrap();
        assert_eq!(claims.sub, session.user.id);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let store = Store::seeded();
        let wrong = login(&store, &login_req("teacher@ablelyf.test", "nope"))
            .await
            .unwrap_err();
        let unknown = login(&store, &login_req("ghost@ablelyf.test", DEMO_PASSWORD))
            .await
            .unwrap_err();
        assert_eq!(wrong, unknown);
        assert_eq!(wrong.kind, AppErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn malformed_login_is_a_validation_error() {
        let store = Store::seeded();
        let err = login(&store, &login_req("not-an-email", ""))
            .await
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
    }

    #[tokio::test]
    async fn registration_creates_a_working_account() {
        let store = Store::seeded();
        let session = register(&store, &open_registration(), &register_req("priya@ablelyf.test"))
            .await
            .unwrap();
        assert_eq!(session.user.name, "Priya Shah");
        assert_eq!(session.user.role, "teacher");

        let again = login(&store, &login_req("priya@ablelyf.test", "long-enough-pw"))
            .await
            .unwrap();
        assert_eq!(again.user.id, session.user.id);
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let store = Store::seeded();
        let err = register(&store, &open_registration(), &register_req("hr@ablelyf.test"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
    }

    #[tokio::test]
    async fn registration_respects_the_flag() {
        let store = Store::seeded();
        let err = register(&store, &FeatureFlags::default(), &register_req("new@ablelyf.test"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn refresh_rotates_and_logout_revokes() {
        let store = Store::seeded();
        let session = login(&store, &login_req("hr@ablelyf.test", DEMO_PASSWORD))
            .await
            .unwrap();

        let rotated = refresh_session(&store, &session.refresh_token).await.unwrap();
        assert_eq!(rotated.claims.sub, session.user.id);
        assert!(refresh_session(&store, &session.refresh_token).await.is_none());

        end_session(&store, session.user.id).await;
        assert!(refresh_session(&store, &rotated.refresh_token).await.is_none());
    }

    #[tokio::test]
    async fn access_token_cannot_refresh() {
        let store = Store::seeded();
        let session = login(&store, &login_req("admin@ablelyf.test", DEMO_PASSWORD))
            .await
            .unwrap();
        assert!(refresh_session(&store, &session.access_token).await.is_none());
    }
}
