mod alerts;
mod progress_chart;

use dioxus::prelude::*;
use shared_types::{Caseload, DashboardView, PlanSummary, RoleDashboard};
use shared_ui::{
    Badge, Card, CardContent, CardHeader, CardTitle, EmptyState, PageHeader, ProfileCard,
    ProgressBar, SkeletonRows, StatCard, StatGrid,
};

use crate::auth::use_session_resource;
use crate::format_helpers::{plan_status_badge, tone_accent};
use alerts::AlertList;
use progress_chart::ProgressChart;

/// Role-adaptive dashboard. The server composes the view for the session's
/// role; this page only lays it out.
#[component]
pub fn Dashboard() -> Element {
    let mut view = use_session_resource(server::api::get_dashboard);

    let on_changed = move |_| view.restart();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        match &*view.read() {
            None => rsx! { SkeletonRows { rows: 6 } },
            Some(Err(_)) => rsx! {
                EmptyState {
                    title: "Dashboard unavailable",
                    message: "We could not load your dashboard. Try again shortly.".to_string(),
                }
            },
            Some(Ok(DashboardView::UnknownRole { role })) => rsx! {
                EmptyState {
                    title: "No dashboard for this account",
                    message: format!("The role \"{role}\" has no dashboard yet. Contact your administrator."),
                }
            },
            Some(Ok(DashboardView::Role(board))) => rsx! {
                RoleBoard { board: board.clone(), on_changed }
            },
        }
    }
}

#[component]
fn RoleBoard(board: RoleDashboard, on_changed: EventHandler<()>) -> Element {
    rsx! {
        div { class: "dashboard",
            PageHeader { title: board.title.clone(), subtitle: board.subtitle.clone() }

            StatGrid {
                for tile in board.stats.iter() {
                    StatCard {
                        key: "{tile.label}",
                        label: tile.label.clone(),
                        value: tile.value.clone(),
                        hint: tile.hint.clone(),
                        accent: tone_accent(tile.tone),
                    }
                }
            }

            div { class: "dashboard-grid",
                Card { class: "dashboard-panel",
                    CardHeader { CardTitle { "Alerts" } }
                    CardContent {
                        AlertList {
                            alerts: board.alerts.clone(),
                            patients: board.patients.clone(),
                            on_resolved: move |_| on_changed.call(()),
                        }
                    }
                }

                Card { class: "dashboard-panel",
                    CardHeader { CardTitle { "Progress" } }
                    CardContent { ProgressChart { points: board.progress.clone() } }
                }
            }

            if !board.caseloads.is_empty() {
                CaseloadTable { caseloads: board.caseloads.clone() }
            }

            div { class: "dashboard-grid",
                Card { class: "dashboard-panel",
                    CardHeader { CardTitle { "Therapy plans" } }
                    CardContent {
                        if board.plans.is_empty() {
                            EmptyState { title: "No therapy plans" }
                        }
                        for plan in board.plans.iter() {
                            PlanRow { key: "{plan.id}", plan: plan.clone() }
                        }
                    }
                }

                Card { class: "dashboard-panel",
                    CardHeader { CardTitle { "Patients" } }
                    CardContent {
                        if board.patients.is_empty() {
                            EmptyState { title: "No patients linked to your account" }
                        }
                        div { class: "dashboard-patients",
                            for patient in board.patients.iter() {
                                ProfileCard {
                                    key: "{patient.id}",
                                    name: patient.name.clone(),
                                    subtitle: format!("Age {}", patient.age),
                                    avatar_url: patient.avatar_url.clone(),
                                    tags: patient.conditions.clone(),
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PlanRow(plan: PlanSummary) -> Element {
    rsx! {
        div { class: "dashboard-plan",
            div { class: "dashboard-plan-head",
                div {
                    p { class: "dashboard-plan-title", "{plan.title}" }
                    p { class: "dashboard-muted", "{plan.patient_name}" }
                }
                Badge { variant: plan_status_badge(plan.status), "{plan.status.label()}" }
            }
            ProgressBar {
                value: plan.progress,
                label: format!("{}/{} goals achieved", plan.achieved_goals, plan.total_goals),
            }
        }
    }
}

#[component]
fn CaseloadTable(caseloads: Vec<Caseload>) -> Element {
    rsx! {
        Card { class: "dashboard-panel",
            CardHeader { CardTitle { "Therapist caseloads" } }
            CardContent {
                table { class: "dashboard-table",
                    thead {
                        tr {
                            th { "Therapist" }
                            th { "Patients" }
                        }
                    }
                    tbody {
                        for load in caseloads.iter() {
                            tr { key: "{load.therapist_id}",
                                td { "{load.therapist_name}" }
                                td { "{load.patients}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
