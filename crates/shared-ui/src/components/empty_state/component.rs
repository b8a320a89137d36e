use dioxus::prelude::*;

/// Placeholder shown when a list has nothing to display.
#[component]
pub fn EmptyState(
    title: String,
    #[props(default)] message: Option<String>,
    #[props(default)] children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "empty-state",
            p { class: "empty-state-title", "{title}" }
            if let Some(message) = message {
                p { class: "empty-state-message", "{message}" }
            }
            {children}
        }
    }
}
