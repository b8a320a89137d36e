use dioxus::prelude::*;
use shared_types::{group_by_date, CalendarEvent};
use shared_ui::{Badge, BadgeVariant, EmptyState, PageHeader, SkeletonRows};

use crate::auth::use_session_resource;
use crate::format_helpers::format_day_heading;

/// Upcoming sessions, meetings and assessments grouped by day.
#[component]
pub fn Calendar() -> Element {
    let events = use_session_resource(server::api::list_calendar_events);

    let body = match &*events.read() {
        None => rsx! { SkeletonRows { rows: 5 } },
        Some(Err(_)) => rsx! {
            EmptyState { title: "Could not load the calendar" }
        },
        Some(Ok(list)) if list.is_empty() => rsx! {
            EmptyState { title: "Nothing scheduled" }
        },
        Some(Ok(list)) => rsx! {
            for (date, day) in group_by_date(list) {
                section { key: "{date}", class: "calendar-day",
                    h2 { class: "calendar-day-heading", "{format_day_heading(date)}" }
                    ul { class: "calendar-events",
                        for event in day {
                            EventRow { key: "{event.id}", event }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./pages.css") }
        div { class: "page",
            PageHeader { title: "Calendar" }
            {body}
        }
    }
}

#[component]
fn EventRow(event: CalendarEvent) -> Element {
    rsx! {
        li { class: if event.completed { "calendar-event completed" } else { "calendar-event" },
            span { class: "calendar-event-time", "{event.time_range()}" }
            div { class: "calendar-event-body",
                p { class: "calendar-event-title", "{event.title}" }
                if let Some(location) = &event.location {
                    p { class: "page-muted", "{location}" }
                }
            }
            div { class: "calendar-event-tags",
                Badge { variant: BadgeVariant::Outline, "{event.kind.label()}" }
                if event.recurring {
                    Badge { variant: BadgeVariant::Secondary, "Recurring" }
                }
                if event.completed {
                    Badge { variant: BadgeVariant::Success, "Done" }
                }
            }
        }
    }
}
