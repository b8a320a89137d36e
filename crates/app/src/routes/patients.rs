use dioxus::prelude::*;
use shared_types::{distinct_conditions, Patient};
use shared_ui::{EmptyState, PageHeader, ProfileCard, SearchBar, Select, SkeletonRows};

use crate::auth::use_session_resource;
use crate::format_helpers::format_date_human;

/// Patients matching the search text and, when set, the condition filter.
fn filter_patients(patients: &[Patient], query: &str, condition: &str) -> Vec<Patient> {
    patients
        .iter()
        .filter(|p| p.matches_query(query))
        .filter(|p| condition.is_empty() || p.has_condition(condition))
        .cloned()
        .collect()
}

#[component]
pub fn Patients() -> Element {
    let patients = use_session_resource(server::api::list_patients);
    let mut query = use_signal(String::new);
    let mut condition = use_signal(String::new);

    let body = match &*patients.read() {
        None => rsx! { SkeletonRows { rows: 5 } },
        Some(Err(_)) => rsx! {
            EmptyState { title: "Could not load patients" }
        },
        Some(Ok(all)) => {
            let options: Vec<(String, String)> = distinct_conditions(all)
                .into_iter()
                .map(|c| (c.clone(), c))
                .collect();
            let shown = filter_patients(all, &query(), &condition());

            rsx! {
                SearchBar {
                    value: query(),
                    placeholder: "Search by name or condition",
                    on_search: move |q: String| query.set(q),
                    Select {
                        value: condition(),
                        options,
                        all_label: "All conditions".to_string(),
                        on_change: move |c: String| condition.set(c),
                    }
                }

                if shown.is_empty() {
                    EmptyState {
                        title: "No matching patients",
                        message: "Try a different search or condition.".to_string(),
                    }
                }

                div { class: "page-grid",
                    for patient in shown {
                        ProfileCard {
                            key: "{patient.id}",
                            name: patient.name.clone(),
                            subtitle: format!("Age {}", patient.age),
                            avatar_url: patient.avatar_url.clone(),
                            tags: patient.conditions.clone(),
                            p { class: "page-muted",
                                "Diagnosed {format_date_human(patient.diagnosis_date)}"
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
                title: "Patients",
                subtitle: "Children in your care".to_string(),
            }
            {body}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn patient(id: &str, name: &str, conditions: &[&str]) -> Patient {
        Patient {
            id: id.into(),
            name: name.into(),
            age: 7,
            conditions: conditions.iter().map(|c| c.to_string()).collect(),
            diagnosis_date: NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
            therapist_id: 1,
            caregiver_id: 2,
            teacher_id: None,
            avatar_url: None,
        }
    }

    #[test]
    fn search_and_condition_combine() {
        let list = vec![
            patient("patient-1", "Alex Johnson", &["Autism", "ADHD"]),
            patient("patient-2", "Emma Davis", &["ADHD"]),
            patient("patient-3", "Liam Brown", &["Down Syndrome"]),
        ];

        let ids = |v: Vec<Patient>| v.into_iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(filter_patients(&list, "", "")).len(), 3);
        assert_eq!(ids(filter_patients(&list, "", "ADHD")), vec!["patient-1", "patient-2"]);
        assert_eq!(ids(filter_patients(&list, "emma", "ADHD")), vec!["patient-2"]);
        assert!(filter_patients(&list, "emma", "Autism").is_empty());
    }
}
