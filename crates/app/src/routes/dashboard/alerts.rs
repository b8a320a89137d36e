use chrono::Utc;
use dioxus::prelude::*;
use shared_types::{Alert, Patient, ResolveOutcome};
use shared_ui::{use_toast, Badge, BadgeVariant, Button, ButtonVariant, EmptyState, ToastOptions};

use crate::auth::use_auth;
use crate::format_helpers::{format_relative, severity_badge};

fn patient_name(patients: &[Patient], patient_id: &str) -> String {
    patients
        .iter()
        .find(|p| p.id == patient_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Unknown patient".to_string())
}

/// Alert feed with per-alert resolve. `on_resolved` fires after any
/// successful resolve call so the owner can refetch.
#[component]
pub fn AlertList(
    alerts: Vec<Alert>,
    patients: Vec<Patient>,
    on_resolved: EventHandler<ResolveOutcome>,
) -> Element {
    let mut auth = use_auth();
    let toast = use_toast();
    let mut pending = use_signal(|| Option::<String>::None);
    let now = Utc::now();

    if alerts.is_empty() {
        return rsx! {
            EmptyState { title: "No alerts", message: "Everything looks calm.".to_string() }
        };
    }

    let mut resolve = move |alert_id: String| {
        pending.set(Some(alert_id.clone()));
        spawn(async move {
            match server::api::resolve_alert(alert_id.clone()).await {
                Ok(outcome) => {
                    if outcome.should_notify() {
                        toast.success("Alert resolved".to_string(), ToastOptions::new());
                    }
                    tracing::debug!(alert_id, ?outcome, "Alert resolve finished");
                    on_resolved.call(outcome);
                }
                Err(e) => {
                    if !auth.expire_on(&e) {
                        toast.error(
                            shared_types::AppError::friendly_message(&e.to_string()),
                            ToastOptions::new(),
                        );
                    }
                }
            }
            pending.set(None);
        });
    };

    rsx! {
        ul { class: "alert-list",
            for alert in alerts.into_iter() {
                li {
                    key: "{alert.id}",
                    class: if alert.resolved { "alert-item resolved" } else { "alert-item" },
                    div { class: "alert-item-head",
                        Badge { variant: severity_badge(alert.severity), "{alert.severity.as_str()}" }
                        span { class: "alert-kind", "{alert.kind.label()}" }
                        span { class: "dashboard-muted", "{format_relative(alert.timestamp, now)}" }
                    }
                    p { class: "alert-message", "{alert.message}" }
                    div { class: "alert-item-foot",
                        span { class: "dashboard-muted", "{patient_name(&patients, &alert.patient_id)}" }
                        if alert.resolved {
                            Badge { variant: BadgeVariant::Success, "Resolved" }
                        } else {
                            Button {
                                variant: ButtonVariant::Outline,
                                loading: pending().as_deref() == Some(alert.id.as_str()),
                                onclick: {
                                    let id = alert.id.clone();
                                    move |_| resolve(id.clone())
                                },
                                "Resolve"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn unknown_patient_ids_get_a_placeholder() {
        let patients = vec![Patient {
            id: "patient-1".into(),
            name: "Alex Johnson".into(),
            age: 8,
            conditions: vec!["Autism".into()],
            diagnosis_date: NaiveDate::from_ymd_opt(2021, 3, 5).unwrap(),
            therapist_id: 1,
            caregiver_id: 2,
            teacher_id: None,
            avatar_url: None,
        }];
        assert_eq!(patient_name(&patients, "patient-1"), "Alex Johnson");
        assert_eq!(patient_name(&patients, "patient-9"), "Unknown patient");
    }
}
