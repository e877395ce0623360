//! Project record.
//!
//! A project embeds copies of its tasks rather than referencing the task
//! collection; the two are never reconciled.

use crate::model::entity::{new_record_id, RecordId};
use crate::model::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle shared by projects and goals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    #[default]
    Active,
    Completed,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_project_color")]
    pub color: String,
    /// Stored percentage; views recompute it from `tasks`.
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: ActivityStatus,
}

fn default_project_color() -> String {
    "#3B82F6".to_string()
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            description: None,
            color: default_project_color(),
            progress: 0,
            tasks: Vec::new(),
            created_at: Utc::now(),
            deadline: None,
            status: ActivityStatus::Active,
        }
    }
}

impl_entity!(Project, Project, projects, created_at);
