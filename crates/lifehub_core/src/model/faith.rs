//! Religious-practice logging: prayers and bible readings.

use crate::model::entity::{new_record_id, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prayer {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub answered: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Prayer {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            content: content.into(),
            category: "personal".to_string(),
            date: Utc::now(),
            answered: false,
            tags: Vec::new(),
        }
    }

    /// Returns a replacement with `answered` flipped.
    pub fn toggled_answered(&self) -> Self {
        Self {
            answered: !self.answered,
            ..self.clone()
        }
    }
}

impl_entity!(Prayer, Prayer, prayers, date);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BibleReading {
    pub id: RecordId,
    pub book: String,
    pub chapter: u32,
    /// Free-form range such as `1-12`.
    #[serde(default)]
    pub verses: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

impl BibleReading {
    pub fn new(book: impl Into<String>, chapter: u32) -> Self {
        Self {
            id: new_record_id(),
            book: book.into(),
            chapter,
            verses: String::new(),
            date: Utc::now(),
            notes: String::new(),
            plan: None,
        }
    }
}

impl_entity!(BibleReading, BibleReading, bible_readings, date);
