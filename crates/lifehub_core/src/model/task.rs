//! Task record.
//!
//! # Invariants
//! - `project_id` is a loose reference; nothing checks the project exists.
//! - `updated_at` is refreshed by helpers that produce a replacement record.

use crate::model::entity::{new_record_id, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Priority shared by tasks and goals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<RecordId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates an open, medium-priority task with a generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(new_record_id(), title)
    }

    /// Creates a task with a caller-provided id (import paths, tests).
    pub fn with_id(id: impl Into<RecordId>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            completed: false,
            priority: Priority::default(),
            due_date: None,
            tags: Vec::new(),
            project_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a replacement record with `completed` flipped.
    pub fn toggled(&self, now: DateTime<Utc>) -> Self {
        Self {
            completed: !self.completed,
            updated_at: now,
            ..self.clone()
        }
    }
}

impl_entity!(Task, Task, tasks, created_at);
