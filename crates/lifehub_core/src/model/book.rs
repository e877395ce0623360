use crate::model::entity::{new_record_id, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Reading,
    Completed,
    Paused,
    #[default]
    Wishlist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub status: BookStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
    /// 1..=5 stars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Creation time, used as the load order column.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, total_pages: u32) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            author: author.into(),
            total_pages,
            current_page: 0,
            status: BookStatus::Wishlist,
            start_date: None,
            end_date: None,
            notes: String::new(),
            rating: None,
            created_at: Utc::now(),
        }
    }

    /// Returns a replacement at `page`, clamped to `total_pages`.
    ///
    /// Reaching the last page marks the book completed and stamps
    /// `end_date`.
    pub fn with_progress(&self, page: u32, now: DateTime<Utc>) -> Self {
        let finished = page >= self.total_pages;
        Self {
            current_page: page.min(self.total_pages),
            status: if finished {
                BookStatus::Completed
            } else {
                self.status
            },
            end_date: if finished { Some(now) } else { self.end_date },
            ..self.clone()
        }
    }

    /// Returns a replacement moved to `status`.
    ///
    /// `reading` stamps `start_date` once. `completed` stamps `end_date` and
    /// jumps to the last page; every other status clears `end_date`.
    pub fn with_status(&self, status: BookStatus, now: DateTime<Utc>) -> Self {
        let completed = status == BookStatus::Completed;
        Self {
            status,
            start_date: match (status, self.start_date) {
                (BookStatus::Reading, None) => Some(now),
                (_, existing) => existing,
            },
            end_date: completed.then_some(now),
            current_page: if completed {
                self.total_pages
            } else {
                self.current_page
            },
            ..self.clone()
        }
    }
}

impl_entity!(Book, Book, books, created_at);
