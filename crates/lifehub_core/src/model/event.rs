//! Calendar event record.
//!
//! # Invariants
//! - `end` is expected to be at or after `start`; the store does not enforce
//!   it, [`Event::has_valid_window`] lets callers check.

use crate::model::entity::{new_record_id, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Minutes before `start`.
    #[serde(default)]
    pub reminders: Vec<u32>,
}

impl Event {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            description: None,
            start,
            end,
            all_day: false,
            category: "personal".to_string(),
            color: "#3B82F6".to_string(),
            location: None,
            reminders: Vec::new(),
        }
    }

    pub fn has_valid_window(&self) -> bool {
        self.end >= self.start
    }

    /// Whether the event overlaps the UTC calendar day of `day`.
    pub fn occurs_on(&self, day: chrono::NaiveDate) -> bool {
        let start_day = self.start.date_naive();
        let end_day = self.end.date_naive().max(start_day);
        start_day <= day && day <= end_day
    }
}

impl_entity!(Event, Event, events, start);
