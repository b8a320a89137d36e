use dioxus::prelude::*;

/// Text input bound to a caller-owned value.
#[component]
pub fn Input(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] autocomplete: Option<String>,
    #[props(default = false)] disabled: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "input", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        input {
            r#type: "{input_type}",
            value: value,
            placeholder: placeholder,
            disabled: disabled,
            autocomplete: autocomplete,
            oninput: move |evt| on_input.call(evt),
            ..merged,
        }
    }
}

/// Native select with a blank "all" option, used for list filters.
#[component]
pub fn Select(
    value: String,
    options: Vec<(String, String)>,
    #[props(default)] on_change: EventHandler<String>,
    #[props(default)] all_label: Option<String>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "input select", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        select {
            value: value.clone(),
            onchange: move |evt: FormEvent| on_change.call(evt.value()),
            ..merged,
            if let Some(all) = all_label {
                option { value: "", selected: value.is_empty(), "{all}" }
            }
            for (key, text) in options {
                option { key: "{key}", value: "{key}", selected: key == value, "{text}" }
            }
        }
    }
}
