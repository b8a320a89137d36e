use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Session,
    Assessment,
    Meeting,
    Training,
    Other,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Session => "Therapy session",
            EventKind::Assessment => "Assessment",
            EventKind::Meeting => "Meeting",
            EventKind::Training => "Training",
            EventKind::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// User ids taking part. Empty means visible to every staff role.
    #[serde(default)]
    pub participants: Vec<i64>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub completed: bool,
}

impl CalendarEvent {
    /// Display range such as "09:00 - 10:00", or "All day" without a start.
    pub fn time_range(&self) -> String {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
            }
            (Some(start), None) => start.format("%H:%M").to_string(),
            _ => "All day".to_string(),
        }
    }

    pub fn involves(&self, user_id: i64) -> bool {
        self.participants.is_empty() || self.participants.contains(&user_id)
    }
}

/// Group events by date, each day sorted by start time (all-day first).
pub fn group_by_date(events: &[CalendarEvent]) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
    let mut days: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();
    for event in events {
        days.entry(event.date).or_default().push(event.clone());
    }
    for day in days.values_mut() {
        day.sort_by_key(|e| e.start_time);
    }
    days
}
