use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Authenticated user info (safe to send to client).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Raw role claim. Kept as a string so an unrecognised value reaches
    /// the dashboard fallback instead of failing deserialization.
    pub role: String,
}

impl SessionUser {
    /// The parsed role, or `None` for a claim outside the known set.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    /// First name for greetings ("Welcome back, Sarah").
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct LoginRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

/// Register request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct RegisterRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 8, message = "Password must be at least 8 characters"))
    )]
    pub password: String,
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "validate_role", message = "Choose a valid role"))
    )]
    pub role: String,
}

#[cfg(feature = "validation")]
fn validate_role(role: &str) -> Result<(), validator::ValidationError> {
    match Role::parse(role) {
        Some(role) if role.is_self_service() => Ok(()),
        _ => Err(validator::ValidationError::new("role")),
    }
}

/// Body returned by the REST login and register endpoints. Browser clients
/// use the cookies instead; API clients send `access_token` as a Bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthResponse {
    pub user: SessionUser,
    pub access_token: String,
}

/// Simple acknowledgement body for REST endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
