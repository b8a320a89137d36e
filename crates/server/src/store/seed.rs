//! Demo accounts and care records loaded into a fresh store.
//!
//! Dates are relative to today so the calendar and alert feed always look
//! current.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use shared_types::{
    Alert, AlertType, Assessment, AssessmentStatus, CalendarEvent, EventKind, Goal, GoalStatus,
    LearningModule, Patient, PlanStatus, ProgressRecord, Role, Severity, TherapyPlan,
};
use std::sync::OnceLock;

use super::{CareRecords, UserRecord};
use crate::auth::password;

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "ablelyf-demo";

const SARAH: i64 = 1;
const MICHAEL: i64 = 2;
const EMILY: i64 = 3;
const ROBERT: i64 = 4;
const MARIA: i64 = 5;
const LISA: i64 = 6;
const JENNIFER: i64 = 7;
const DAVID: i64 = 8;

/// Hashed once per process; argon2 is deliberately slow.
fn demo_password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| match password::hash_password(DEMO_PASSWORD) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!(%e, "Could not hash the demo password, demo logins are disabled");
            String::new()
        }
    })
    .clone()
}

pub(super) fn demo_data() -> (Vec<UserRecord>, CareRecords) {
    let care = CareRecords {
        patients: patients(),
        progress: progress(),
        alerts: alerts(),
        plans: plans(),
        assessments: assessments(),
        modules: learning_modules(),
        events: calendar_events(),
    };
    (users(), care)
}

fn users() -> Vec<UserRecord> {
    let hash = demo_password_hash();
    [
        (SARAH, "Sarah Johnson", "therapist@ablelyf.test", Role::Therapist),
        (MICHAEL, "Michael Chen", "m.chen@ablelyf.test", Role::Therapist),
        (EMILY, "Emily Davis", "caregiver@ablelyf.test", Role::Caregiver),
        (ROBERT, "Robert Wilson", "r.wilson@ablelyf.test", Role::Caregiver),
        (MARIA, "Maria Garcia", "m.garcia@ablelyf.test", Role::Caregiver),
        (LISA, "Lisa Park", "teacher@ablelyf.test", Role::Teacher),
        (JENNIFER, "Jennifer Adams", "hr@ablelyf.test", Role::Hr),
        (DAVID, "David Miller", "admin@ablelyf.test", Role::Admin),
    ]
    .into_iter()
    .map(|(id, name, email, role)| UserRecord {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role,
        password_hash: hash.clone(),
    })
    .collect()
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn patients() -> Vec<Patient> {
    let patient = |id: &str,
                   name: &str,
                   age: u8,
                   conditions: &[&str],
                   diagnosed: NaiveDate,
                   therapist_id: i64,
                   caregiver_id: i64,
                   teacher_id: Option<i64>| Patient {
        id: id.to_string(),
        name: name.to_string(),
        age,
        conditions: strings(conditions),
        diagnosis_date: diagnosed,
        therapist_id,
        caregiver_id,
        teacher_id,
        avatar_url: None,
    };
    vec![
        patient(
            "patient-1",
            "Emma Thompson",
            8,
            &["Autism Spectrum Disorder", "Sensory Processing Disorder"],
            date(2021, 3, 15),
            SARAH,
            EMILY,
            Some(LISA),
        ),
        patient(
            "patient-2",
            "Noah Williams",
            6,
            &["ADHD"],
            date(2022, 1, 10),
            SARAH,
            ROBERT,
            Some(LISA),
        ),
        patient(
            "patient-3",
            "Olivia Brown",
            10,
            &["Down Syndrome", "Speech Delay"],
            date(2016, 6, 2),
            MICHAEL,
            MARIA,
            None,
        ),
        patient(
            "patient-4",
            "Liam Garcia",
            7,
            &["Autism Spectrum Disorder"],
            date(2020, 9, 21),
            MICHAEL,
            MARIA,
            Some(LISA),
        ),
    ]
}

fn progress() -> Vec<ProgressRecord> {
    let series = [
        ("patient-1", "communication", [45, 52, 58, 64]),
        ("patient-1", "social", [30, 36, 41, 47]),
        ("patient-2", "attention", [38, 40, 49, 55]),
        ("patient-3", "communication", [50, 55, 57, 63]),
        ("patient-4", "motor", [60, 62, 67, 72]),
    ];
    series
        .into_iter()
        .flat_map(|(patient_id, domain, scores)| {
            scores.into_iter().enumerate().map(move |(i, score)| ProgressRecord {
                patient_id: patient_id.to_string(),
                date: days_from_today(-28 * (3 - i as i64)),
                domain: domain.to_string(),
                score,
            })
        })
        .collect()
}

fn alerts() -> Vec<Alert> {
    let now = Utc::now();
    let alert = |id: &str,
                 patient_id: &str,
                 kind: AlertType,
                 severity: Severity,
                 message: &str,
                 hours_ago: i64,
                 resolved: bool| Alert {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        kind,
        severity,
        message: message.to_string(),
        timestamp: now - Duration::hours(hours_ago),
        resolved,
    };
    vec![
        alert(
            "alert-1",
            "patient-1",
            AlertType::Sensory,
            Severity::Medium,
            "Overwhelmed by noise during lunch, needed a quiet room",
            3,
            false,
        ),
        alert(
            "alert-2",
            "patient-1",
            AlertType::Behavioral,
            Severity::High,
            "Prolonged meltdown at school pickup",
            20,
            false,
        ),
        alert(
            "alert-3",
            "patient-2",
            AlertType::Behavioral,
            Severity::Low,
            "Difficulty transitioning between activities",
            30,
            true,
        ),
        alert(
            "alert-4",
            "patient-3",
            AlertType::Medical,
            Severity::High,
            "Missed morning medication",
            6,
            false,
        ),
        alert(
            "alert-5",
            "patient-4",
            AlertType::Emergency,
            Severity::High,
            "Left the classroom unsupervised",
            50,
            true,
        ),
        alert(
            "alert-6",
            "patient-4",
            AlertType::Sensory,
            Severity::Low,
            "Covering ears during assembly",
            2,
            false,
        ),
    ]
}

fn goal(id: &str, title: &str, description: &str, progress: u8) -> Goal {
    let status = match progress {
        0 => GoalStatus::NotStarted,
        100 => GoalStatus::Achieved,
        _ => GoalStatus::InProgress,
    };
    Goal {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        progress,
        status,
    }
}

fn plans() -> Vec<TherapyPlan> {
    vec![
        TherapyPlan {
            id: "plan-1".into(),
            patient_id: "patient-1".into(),
            title: "Communication & Sensory Regulation".into(),
            start_date: days_from_today(-90),
            end_date: Some(days_from_today(90)),
            goals: vec![
                goal(
                    "goal-1",
                    "Request breaks verbally",
                    "Uses a phrase to ask for a break in 4 of 5 opportunities",
                    65,
                ),
                goal(
                    "goal-2",
                    "Tolerate classroom noise",
                    "Stays in group activities for 15 minutes with headphones",
                    40,
                ),
                goal(
                    "goal-3",
                    "Greet peers",
                    "Greets two peers unprompted each morning",
                    100,
                ),
            ],
            status: PlanStatus::Active,
        },
        TherapyPlan {
            id: "plan-2".into(),
            patient_id: "patient-2".into(),
            title: "Attention & Task Completion".into(),
            start_date: days_from_today(-30),
            end_date: None,
            goals: vec![
                goal(
                    "goal-4",
                    "Finish seated tasks",
                    "Completes a 10 minute table task with one prompt",
                    30,
                ),
                goal(
                    "goal-5",
                    "Use a visual schedule",
                    "Checks the schedule independently at each transition",
                    0,
                ),
            ],
            status: PlanStatus::Active,
        },
        TherapyPlan {
            id: "plan-3".into(),
            patient_id: "patient-3".into(),
            title: "Expressive Language".into(),
            start_date: days_from_today(-200),
            end_date: Some(days_from_today(-10)),
            goals: vec![goal(
                "goal-6",
                "Two-word phrases",
                "Combines two words to request items",
                100,
            )],
            status: PlanStatus::Completed,
        },
        TherapyPlan {
            id: "plan-4".into(),
            patient_id: "patient-4".into(),
            title: "Fine Motor Skills".into(),
            start_date: days_from_today(7),
            end_date: None,
            goals: vec![goal(
                "goal-7",
                "Pencil grip",
                "Holds a pencil with a tripod grasp for a full worksheet",
                0,
            )],
            status: PlanStatus::Draft,
        },
    ]
}

fn assessments() -> Vec<Assessment> {
    let assessment = |id: &str,
                      patient_id: &str,
                      title: &str,
                      kind: &str,
                      days: i64,
                      score: Option<u8>,
                      status: AssessmentStatus| Assessment {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        title: title.to_string(),
        kind: kind.to_string(),
        scheduled_for: days_from_today(days),
        score,
        status,
    };
    vec![
        assessment(
            "assessment-1",
            "patient-1",
            "Sensory Profile",
            "Sensory",
            -21,
            Some(68),
            AssessmentStatus::Completed,
        ),
        assessment(
            "assessment-2",
            "patient-1",
            "Social Communication Screening",
            "Speech & Language",
            5,
            None,
            AssessmentStatus::Scheduled,
        ),
        assessment(
            "assessment-3",
            "patient-2",
            "Attention Rating Scale",
            "Behavioral",
            0,
            None,
            AssessmentStatus::InProgress,
        ),
        assessment(
            "assessment-4",
            "patient-3",
            "Expressive Vocabulary Test",
            "Speech & Language",
            -45,
            Some(74),
            AssessmentStatus::Completed,
        ),
        assessment(
            "assessment-5",
            "patient-4",
            "Motor Skills Battery",
            "Occupational",
            12,
            None,
            AssessmentStatus::Scheduled,
        ),
    ]
}

fn learning_modules() -> Vec<LearningModule> {
    let module = |id: &str,
                  title: &str,
                  category: &str,
                  description: &str,
                  minutes: u32,
                  audience: &[Role],
                  completion: u8| LearningModule {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        duration_minutes: minutes,
        audience: audience.to_vec(),
        completion,
    };
    vec![
        module(
            "module-1",
            "Understanding Sensory Needs",
            "Sensory",
            "Recognising sensory overload and building a calm-down plan",
            30,
            &[Role::Caregiver, Role::Teacher, Role::Therapist],
            100,
        ),
        module(
            "module-2",
            "Visual Supports in the Classroom",
            "Education",
            "Schedules, first-then boards and choice cards",
            45,
            &[Role::Teacher],
            40,
        ),
        module(
            "module-3",
            "Positive Behaviour Support at Home",
            "Behavior",
            "Routines and reinforcement that carry over from therapy",
            25,
            &[Role::Caregiver],
            0,
        ),
        module(
            "module-4",
            "Writing Measurable Goals",
            "Clinical",
            "Turning observations into goals with clear criteria",
            60,
            &[Role::Therapist],
            75,
        ),
        module(
            "module-5",
            "Onboarding Therapy Staff",
            "Operations",
            "Credential checks, caseload assignment and supervision",
            40,
            &[Role::Hr],
            10,
        ),
    ]
}

fn calendar_events() -> Vec<CalendarEvent> {
    let event = |id: &str,
                 title: &str,
                 days: i64,
                 start: Option<NaiveTime>,
                 end: Option<NaiveTime>,
                 kind: EventKind,
                 location: Option<&str>,
                 participants: &[i64]| CalendarEvent {
        id: id.to_string(),
        title: title.to_string(),
        date: days_from_today(days),
        start_time: start,
        end_time: end,
        kind,
        location: location.map(str::to_string),
        participants: participants.to_vec(),
        recurring: false,
        completed: days < 0,
    };
    let mut events = vec![
        event(
            "event-1",
            "Speech session with Emma",
            0,
            at(9, 0),
            at(10, 0),
            EventKind::Session,
            Some("Room 2"),
            &[SARAH, EMILY],
        ),
        event(
            "event-2",
            "Noah attention check-in",
            0,
            at(13, 30),
            at(14, 0),
            EventKind::Session,
            Some("Video"),
            &[SARAH, ROBERT],
        ),
        event(
            "event-3",
            "Social Communication Screening",
            5,
            at(10, 0),
            at(11, 30),
            EventKind::Assessment,
            Some("Clinic"),
            &[SARAH, EMILY],
        ),
        event(
            "event-4",
            "IEP review for Liam",
            2,
            at(15, 0),
            at(16, 0),
            EventKind::Meeting,
            Some("Lincoln Elementary"),
            &[MICHAEL, MARIA, LISA],
        ),
        event(
            "event-5",
            "Staff training day",
            9,
            None,
            None,
            EventKind::Training,
            Some("Main office"),
            &[],
        ),
        event(
            "event-6",
            "Olivia language session",
            -1,
            at(11, 0),
            at(12, 0),
            EventKind::Session,
            Some("Room 1"),
            &[MICHAEL, MARIA],
        ),
    ];
    if let Some(weekly) = events.iter_mut().find(|e| e.id == "event-2") {
        weekly.recurring = true;
    }
    events
}
