use dioxus::prelude::ServerFnError;
use shared_types::AppError;

/// Convert an AppError into a ServerFnError by serializing as JSON.
/// The client recovers it with `AppError::from_server_error`.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Extension trait for `Result<T, AppError>` in server functions.
pub trait AppResultExt<T> {
    fn or_server_fn_error(self) -> Result<T, ServerFnError>;
}

impl<T> AppResultExt<T> for Result<T, AppError> {
    fn or_server_fn_error(self) -> Result<T, ServerFnError> {
        self.map_err(AppErrorExt::into_server_fn_error)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{AppErrorKind, RegisterRequest};

    #[test]
    fn server_fn_error_carries_the_app_error() {
        let err = AppError::conflict("An account with this email already exists");
        let text = err.clone().into_server_fn_error().to_string();
        assert_eq!(AppError::from_server_error(&text), Some(err));
    }

    #[test]
    fn invalid_register_request_reports_fields() {
        let req = RegisterRequest {
            name: String::new(),
            email: "not-an-email".into(),
            password: "short".into(),
            role: "therapist".into(),
        };
        let err = req.validate_request().unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        for field in ["name", "email", "password"] {
            assert!(err.field_errors.contains_key(field), "{field}");
        }
        assert!(!err.field_errors.contains_key("role"));
    }
}
