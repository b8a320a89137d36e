use dioxus::prelude::*;

/// Form wrapper that prevents the browser's default submission.
#[component]
pub fn Form(
    #[props(default)] onsubmit: EventHandler<FormEvent>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "form", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            onsubmit: move |evt| {
                evt.prevent_default();
                onsubmit.call(evt);
            },
            ..merged,
            {children}
        }
    }
}

/// Label, control and inline error for a single form field.
///
/// `error` takes precedence over `hint` so only one line shows under the
/// control.
#[component]
pub fn FormField(
    label: String,
    #[props(into)] html_for: String,
    #[props(default)] error: Option<String>,
    #[props(default)] hint: Option<String>,
    children: Element,
) -> Element {
    let invalid = error.is_some();

    rsx! {
        div { class: "form-field", "data-invalid": invalid,
            label { class: "form-field-label", r#for: "{html_for}", "{label}" }
            {children}
            if let Some(err) = error {
                p { class: "form-field-error", role: "alert", "{err}" }
            } else if let Some(hint) = hint {
                p { class: "form-field-hint", "{hint}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_replaces_hint() {
        let html = dioxus_ssr::render_element(rsx! {
            FormField {
                label: "Email",
                html_for: "email",
                error: "Valid email is required".to_string(),
                hint: "We never share it".to_string(),
                input { id: "email" }
            }
        });
        assert!(html.contains("Valid email is required"));
        assert!(!html.contains("We never share it"));
    }

    #[test]
    fn hint_shows_without_error() {
        let html = dioxus_ssr::render_element(rsx! {
            FormField {
                label: "Password",
                html_for: "password",
                hint: "At least 8 characters".to_string(),
                input { id: "password" }
            }
        });
        assert!(html.contains("At least 8 characters"));
        assert!(!html.contains("form-field-error"));
    }
}
