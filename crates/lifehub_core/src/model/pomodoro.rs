use crate::model::entity::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Phase of the pomodoro cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionType {
    #[default]
    Work,
    Break,
    LongBreak,
}

impl SessionType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
            Self::LongBreak => "long break",
        }
    }
}

/// A finished (or abandoned) timer phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSession {
    pub id: RecordId,
    /// Planned phase length in minutes.
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: SessionType,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<RecordId>,
}

impl_entity!(
    PomodoroSession,
    PomodoroSession,
    pomodoro_sessions,
    start_time
);
