use dioxus::prelude::*;

/// Horizontal percentage bar. Values outside 0..=100 are clamped.
#[component]
pub fn ProgressBar(
    value: u8,
    #[props(default)] label: Option<String>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let pct = value.min(100);
    let base = vec![Attribute::new("class", "progress", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
            if let Some(label) = label {
                div { class: "progress-label",
                    span { "{label}" }
                    span { class: "progress-value", "{pct}%" }
                }
            }
            div {
                class: "progress-track",
                role: "progressbar",
                "aria-valuemin": "0",
                "aria-valuemax": "100",
                "aria-valuenow": "{pct}",
                div { class: "progress-indicator", style: "width: {pct}%;" }
            }
        }
    }
}
