pub mod cookies;
pub mod extractors;
pub mod jwt;
pub mod middleware;
pub mod password;

use shared_types::Role;

use crate::store::{Store, UserRecord};

/// Check if the given email matches the `ADMIN_EMAIL` env var (case-insensitive).
/// Returns `false` if the env var is empty or unset.
pub fn is_admin_email(email: &str) -> bool {
    match std::env::var("ADMIN_EMAIL") {
        Ok(admin) if !admin.is_empty() => admin.eq_ignore_ascii_case(email),
        _ => false,
    }
}

/// If the email matches `ADMIN_EMAIL`, promote the user to admin.
/// Returns the (possibly updated) record.
pub async fn maybe_promote_admin(store: &Store, user: UserRecord) -> UserRecord {
    if user.role == Role::Admin || !is_admin_email(&user.email) {
        return user;
    }

    match store.set_role(user.id, Role::Admin).await {
        Some(promoted) => {
            tracing::info!(
                user_id = user.id,
                email = %user.email,
                "Auto-promoted user to admin via ADMIN_EMAIL"
            );
            promoted
        }
        None => {
            tracing::warn!(user_id = user.id, "Admin promotion target disappeared");
            user
        }
    }
}
