use crate::routes::Route;
use dioxus::prelude::*;
use shared_ui::EmptyState;

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        div { class: "page-centered",
            EmptyState {
                title: "Page not found",
                message: format!("Nothing lives at {path}."),
                Link { class: "button", to: Route::Landing {}, "Back to home" }
            }
        }
    }
}
