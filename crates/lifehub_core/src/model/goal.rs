//! Goal record with embedded milestones.
//!
//! # Invariants
//! - Milestones live only inside their goal; they have no collection of
//!   their own and are replaced together with the goal.

use crate::model::entity::{new_record_id, RecordId};
use crate::model::project::ActivityStatus;
use crate::model::task::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Academic,
    Professional,
    #[default]
    Personal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
}

impl Milestone {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            completed: false,
            due_date: None,
            completed_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: GoalType,
    pub target_date: DateTime<Utc>,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: ActivityStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(title: impl Into<String>, target_date: DateTime<Utc>) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            description: String::new(),
            kind: GoalType::Personal,
            target_date,
            progress: 0,
            milestones: Vec::new(),
            priority: Priority::Medium,
            status: ActivityStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// Returns a replacement with `status` set. Progress is left as is.
    pub fn with_status(&self, status: ActivityStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

impl_entity!(Goal, Goal, goals, created_at);
