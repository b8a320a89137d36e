use dioxus::prelude::*;
use shared_types::projections::{achieved_goal_count, plan_progress};
use shared_types::{Goal, GoalUpdate, Patient, Role, TherapyPlan};
use shared_ui::{
    use_toast, Badge, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader,
    CardTitle, EmptyState, Input, PageHeader, ProgressBar, SkeletonRows, ToastOptions,
};

use crate::auth::{use_auth, use_session_resource};
use crate::format_helpers::{format_date_human, goal_status_badge, plan_status_badge};

/// Roles allowed to report goal progress.
fn can_edit_goals(role: Option<Role>) -> bool {
    matches!(role, Some(Role::Therapist | Role::Admin))
}

fn update_message(update: GoalUpdate, goal: &Goal) -> String {
    match update {
        GoalUpdate::Updated => format!("{} is now at {}%", goal.title, goal.progress),
        GoalUpdate::Achieved => format!("{} achieved", goal.title),
        GoalUpdate::Locked => format!("{} was already achieved", goal.title),
    }
}

#[component]
pub fn TherapyPlans() -> Element {
    let auth = use_auth();
    let mut plans = use_session_resource(|| async {
        let plans = server::api::list_therapy_plans().await?;
        let patients = server::api::list_patients().await?;
        Ok((plans, patients))
    });
    let editable = can_edit_goals(auth.role());

    let body = match &*plans.read() {
        None => rsx! { SkeletonRows { rows: 5 } },
        Some(Err(_)) => rsx! {
            EmptyState { title: "Could not load therapy plans" }
        },
        Some(Ok((list, _))) if list.is_empty() => rsx! {
            EmptyState { title: "No therapy plans yet" }
        },
        Some(Ok((list, patients))) => rsx! {
            for plan in list.iter() {
                PlanCard {
                    key: "{plan.id}",
                    plan: plan.clone(),
                    patient_name: patient_name(patients, &plan.patient_id),
                    editable,
                    on_saved: move |_| plans.restart(),
                }
            }
        },
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./pages.css") }
        div { class: "page",
            PageHeader {
                title: "Therapy Plans",
                subtitle: "Goals and progress for each plan".to_string(),
            }
            {body}
        }
    }
}

fn patient_name(patients: &[Patient], patient_id: &str) -> String {
    patients
        .iter()
        .find(|p| p.id == patient_id)
        .map(|p| p.name.clone())
        .unwrap_or_default()
}

#[component]
fn PlanCard(
    plan: TherapyPlan,
    patient_name: String,
    editable: bool,
    on_saved: EventHandler<()>,
) -> Element {
    let progress = plan_progress(&plan);
    let achieved = achieved_goal_count(&plan);
    let window = match plan.end_date {
        Some(end) => format!(
            "{} to {}",
            format_date_human(plan.start_date),
            format_date_human(end)
        ),
        None => format!("Since {}", format_date_human(plan.start_date)),
    };

    rsx! {
        Card { class: "page-card",
            CardHeader {
                div { class: "page-card-head",
                    CardTitle { "{plan.title}" }
                    Badge { variant: plan_status_badge(plan.status), "{plan.status.label()}" }
                }
                CardDescription { "{patient_name} · {window}" }
            }
            CardContent {
                ProgressBar {
                    value: progress,
                    label: format!("Overall {progress}% · {achieved}/{} goals achieved", plan.goals.len()),
                }
                ul { class: "goal-list",
                    for goal in plan.goals.iter() {
                        GoalRow {
                            key: "{goal.id}",
                            plan_id: plan.id.clone(),
                            goal: goal.clone(),
                            editable,
                            on_saved,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn GoalRow(plan_id: String, goal: Goal, editable: bool, on_saved: EventHandler<()>) -> Element {
    let mut auth = use_auth();
    let toast = use_toast();
    let mut draft = use_signal(|| goal.progress.to_string());
    let mut saving = use_signal(|| false);

    let goal_id = goal.id.clone();
    let save = move |_| {
        let plan_id = plan_id.clone();
        let goal_id = goal_id.clone();
        let Ok(value) = draft().trim().parse::<i32>() else {
            toast.error("Enter a number from 0 to 100".to_string(), ToastOptions::new());
            return;
        };
        saving.set(true);
        spawn(async move {
            match server::api::record_goal_progress(plan_id, goal_id, value).await {
                Ok(result) => {
                    draft.set(result.goal.progress.to_string());
                    toast.success(update_message(result.update, &result.goal), ToastOptions::new());
                    on_saved.call(());
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
            saving.set(false);
        });
    };

    rsx! {
        li { class: "goal-row",
            div { class: "goal-row-head",
                div {
                    p { class: "goal-title", "{goal.title}" }
                    p { class: "page-muted", "{goal.description}" }
                }
                Badge { variant: goal_status_badge(goal.status), "{goal.status.label()}" }
            }
            ProgressBar { value: goal.progress, label: format!("{}%", goal.progress) }
            if editable && goal.status != shared_types::GoalStatus::Achieved {
                div { class: "goal-editor",
                    Input {
                        input_type: "number",
                        value: draft(),
                        on_input: move |e: FormEvent| draft.set(e.value()),
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        loading: saving(),
                        onclick: save,
                        "Save"
                    }
                }
            }
        }
    }
}
