use dioxus::prelude::*;
use shared_types::{filter_by_status, AssessmentStatus, Patient};
use shared_ui::{Badge, Card, CardContent, EmptyState, PageHeader, Select, SkeletonRows};

use crate::auth::use_session_resource;
use crate::format_helpers::{assessment_status_badge, format_date_human};

fn status_options() -> Vec<(String, String)> {
    AssessmentStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect()
}

fn patient_name<'a>(patients: &'a [Patient], patient_id: &str) -> &'a str {
    patients
        .iter()
        .find(|p| p.id == patient_id)
        .map(|p| p.name.as_str())
        .unwrap_or("")
}

#[component]
pub fn Assessments() -> Element {
    let data = use_session_resource(|| async {
        let assessments = server::api::list_assessments().await?;
        let patients = server::api::list_patients().await?;
        Ok((assessments, patients))
    });
    let mut status = use_signal(String::new);

    let body = match &*data.read() {
        None => rsx! { SkeletonRows { rows: 5 } },
        Some(Err(_)) => rsx! {
            EmptyState { title: "Could not load assessments" }
        },
        Some(Ok((all, patients))) => {
            let shown = filter_by_status(all, AssessmentStatus::parse(&status()));
            rsx! {
                div { class: "page-toolbar",
                    Select {
                        value: status(),
                        options: status_options(),
                        all_label: "All statuses".to_string(),
                        on_change: move |s: String| status.set(s),
                    }
                }

                if shown.is_empty() {
                    EmptyState { title: "No assessments with this status" }
                } else {
                    Card {
                        CardContent {
                            table { class: "page-table",
                                thead {
                                    tr {
                                        th { "Assessment" }
                                        th { "Patient" }
                                        th { "Type" }
                                        th { "Date" }
                                        th { "Score" }
                                        th { "Status" }
                                    }
                                }
                                tbody {
                                    for a in shown.iter() {
                                        tr { key: "{a.id}",
                                            td { "{a.title}" }
                                            td { "{patient_name(patients, &a.patient_id)}" }
                                            td { "{a.kind}" }
                                            td { "{format_date_human(a.scheduled_for)}" }
                                            td {
                                                match a.score {
                                                    Some(score) => rsx! { "{score}" },
                                                    None => rsx! { span { class: "page-muted", "n/a" } },
                                                }
                                            }
                                            td {
                                                Badge { variant: assessment_status_badge(a.status), "{a.status.label()}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./pages.css") }
        div { class: "page",
            PageHeader {
                title: "Assessments",
                subtitle: "Scheduled, running and completed evaluations".to_string(),
            }
            {body}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_options_round_trip_through_parse() {
        for (value, _) in status_options() {
            assert!(AssessmentStatus::parse(&value).is_some(), "{value}");
        }
        assert_eq!(AssessmentStatus::parse(""), None);
    }
}
