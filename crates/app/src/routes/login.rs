use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::AppError;
use shared_ui::{
    Button, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, Form,
    FormField, Input,
};
use std::collections::HashMap;

/// Email and password sign-in. The guest guard moves the user on once the
/// session is set.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let handle_login = move |_: FormEvent| async move {
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::login(email(), password()).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "Signed in");
                auth.set_user(user);
            }
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

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./auth.css") }

        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader {
                    CardTitle { "Sign in" }
                    CardDescription { "Welcome back to AbleLyf" }
                }

                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }

                    Form { onsubmit: handle_login,
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
                            Input {
                                id: "password",
                                input_type: "password",
                                autocomplete: "current-password",
                                value: password(),
                                on_input: move |e: FormEvent| password.set(e.value()),
                            }
                        }
                        Button {
                            class: "auth-submit",
                            button_type: "submit",
                            loading: loading(),
                            if loading() { "Signing in..." } else { "Sign in" }
                        }
                    }
                }

                CardFooter {
                    p { class: "auth-switch",
                        "New to AbleLyf? "
                        Link { to: Route::Register {}, "Create an account" }
                    }
                }
            }
        }
    }
}
