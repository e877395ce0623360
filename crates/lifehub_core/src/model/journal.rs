use crate::model::entity::{new_record_id, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MOOD_MIN: u8 = 1;
pub const MOOD_MAX: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: RecordId,
    pub date: DateTime<Utc>,
    /// 1 (worst) to 10 (best).
    pub mood: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default)]
    pub gratitude: Vec<String>,
}

impl JournalEntry {
    /// Creates an entry dated now; `mood` is clamped into range.
    pub fn new(mood: u8, content: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            date: Utc::now(),
            mood: mood.clamp(MOOD_MIN, MOOD_MAX),
            title: None,
            content: content.into(),
            tags: Vec::new(),
            weather: None,
            gratitude: Vec::new(),
        }
    }
}

impl_entity!(JournalEntry, JournalEntry, journal_entries, date);
