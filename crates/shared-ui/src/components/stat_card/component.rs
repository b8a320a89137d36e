use dioxus::prelude::*;

/// Accent of a stat card. Mirrors the badge palette.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StatAccent {
    #[default]
    Neutral,
    Positive,
    Warning,
    Critical,
}

impl StatAccent {
    fn class(&self) -> &'static str {
        match self {
            StatAccent::Neutral => "neutral",
            StatAccent::Positive => "positive",
            StatAccent::Warning => "warning",
            StatAccent::Critical => "critical",
        }
    }
}

/// A single headline number with a label and optional hint.
#[component]
pub fn StatCard(
    label: String,
    value: String,
    #[props(default)] hint: Option<String>,
    #[props(default)] accent: StatAccent,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "stat-card", "data-accent": accent.class(),
            span { class: "stat-card-label", "{label}" }
            span { class: "stat-card-value", "{value}" }
            if let Some(hint) = hint {
                span { class: "stat-card-hint", "{hint}" }
            }
        }
    }
}

/// Responsive grid for a row of stat cards.
#[component]
pub fn StatGrid(children: Element) -> Element {
    rsx! {
        div { class: "stat-grid", {children} }
    }
}
