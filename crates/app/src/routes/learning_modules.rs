use dioxus::prelude::*;
use shared_types::LearningModule;
use shared_ui::{
    Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, EmptyState,
    PageHeader, ProgressBar, SkeletonRows,
};

use crate::auth::use_session_resource;
use crate::format_helpers::format_minutes;

/// Learning modules written for the viewer's role. The server filters by
/// audience.
#[component]
pub fn LearningModules() -> Element {
    let modules = use_session_resource(server::api::list_learning_modules);

    let body = match &*modules.read() {
        None => rsx! { SkeletonRows { rows: 4 } },
        Some(Err(_)) => rsx! {
            EmptyState { title: "Could not load learning modules" }
        },
        Some(Ok(list)) if list.is_empty() => rsx! {
            EmptyState { title: "No modules for your role yet" }
        },
        Some(Ok(list)) => rsx! {
            div { class: "page-grid",
                for module in list.iter() {
                    ModuleCard { key: "{module.id}", module: module.clone() }
                }
            }
        },
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./pages.css") }
        div { class: "page",
            PageHeader {
                title: "Learning Modules",
                subtitle: "Short courses for your role".to_string(),
            }
            {body}
        }
    }
}

#[component]
fn ModuleCard(module: LearningModule) -> Element {
    rsx! {
        Card { class: "page-card",
            CardHeader {
                div { class: "page-card-head",
                    Badge { variant: BadgeVariant::Secondary, "{module.category}" }
                    span { class: "page-muted", "{format_minutes(module.duration_minutes)}" }
                }
                CardTitle { "{module.title}" }
                CardDescription { "{module.description}" }
            }
            CardContent {
                if module.is_complete() {
                    Badge { variant: BadgeVariant::Success, "Completed" }
                } else {
                    ProgressBar {
                        value: module.completion,
                        label: format!("{}% complete", module.completion),
                    }
                }
            }
        }
    }
}
