use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{AppError, FeatureFlags, Role};
use shared_ui::{
    Button, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, EmptyState,
    Form, FormField, Input, Select,
};
use std::collections::HashMap;

fn role_options() -> Vec<(String, String)> {
    Role::SELF_SERVICE
        .iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect()
}

#[component]
pub fn Register() -> Element {
    let flags: FeatureFlags = use_context();
    let mut auth = use_auth();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(|| Role::Caregiver.as_str().to_string());
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let handle_register = move |_: FormEvent| async move {
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::register(name(), email(), password(), role()).await {
            Ok(user) => auth.set_user(user),
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    if !flags.self_registration {
        return rsx! {
            document::Link { rel: "stylesheet", href: asset!("./auth.css") }
            div { class: "auth-page",
                EmptyState {
                    title: "Registration is closed",
                    message: "Ask your clinic administrator for an account.".to_string(),
                    Link { class: "button", to: Route::Login {}, "Back to sign in" }
                }
            }
        };
    }

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./auth.css") }

        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader {
                    CardTitle { "Create an account" }
                    CardDescription { "Join your child's care team on AbleLyf" }
                }

                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }

                    Form { onsubmit: handle_register,
                        FormField {
                            label: "Full name",
                            html_for: "name",
                            error: field_errors().get("name").cloned(),
                            Input {
                                id: "name",
                                autocomplete: "name",
                                value: name(),
                                on_input: move |e: FormEvent| name.set(e.value()),
                            }
                        }
                        FormField {
                            label: "Email",
                            html_for: "email",
                            error: field_errors().get("email").cloned(),
                            Input {
                                id: "email",
                                input_type: "email",
                                autocomplete: "email",
                                placeholder: "you@example.com",
                                value: email(),
                                on_input: move |e: FormEvent| email.set(e.value()),
                            }
                        }
                        FormField {
                            label: "Password",
                            html_for: "password",
                            error: field_errors().get("password").cloned(),
                            hint: "At least 8 characters".to_string(),
                            Input {
                                id: "password",
                                input_type: "password",
                                autocomplete: "new-password",
                                value: password(),
                                on_input: move |e: FormEvent| password.set(e.value()),
                            }
                        }
                        FormField {
                            label: "Role",
                            html_for: "role",
                            error: field_errors().get("role").cloned(),
                            Select {
                                id: "role",
                                value: role(),
                                options: role_options(),
                                on_change: move |v: String| role.set(v),
                            }
                        }
                        Button {
                            class: "auth-submit",
                            button_type: "submit",
                            loading: loading(),
                            if loading() { "Creating account..." } else { "Create account" }
                        }
                    }
                }

                CardFooter {
                    p { class: "auth-switch",
                        "Already have an account? "
                        Link { to: Route::Login {}, "Sign in" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_self_service_roles_are_offered() {
        let options = role_options();
        assert_eq!(options.len(), Role::SELF_SERVICE.len());
        assert!(options
            .iter()
            .all(|(value, _)| Role::parse(value).is_some_and(|r| r.is_self_service())));
        assert!(!options.iter().any(|(value, _)| value == "admin" || value == "hr"));
    }
}
