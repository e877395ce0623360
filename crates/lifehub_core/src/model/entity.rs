//! Entity identity, kind catalog and the tagged record union.
//!
//! # Responsibility
//! - Name every entity kind the store manages, with its storage name and
//!   load ordering.
//! - Bridge concrete entity structs to the generic reducer and repository
//!   through the [`Entity`] trait.
//!
//! # Invariants
//! - `EntityKind::ALL` lists each kind exactly once, in module order.
//! - `Record::kind()` always matches the `Entity::KIND` of its payload.
//! - Record ids are opaque; imported ids of any shape are kept verbatim.

use crate::model::academic::AcademicCourse;
use crate::model::book::Book;
use crate::model::event::Event;
use crate::model::faith::{BibleReading, Prayer};
use crate::model::finance::FinancialTransaction;
use crate::model::goal::Goal;
use crate::model::journal::JournalEntry;
use crate::model::note::Note;
use crate::model::pomodoro::PomodoroSession;
use crate::model::project::Project;
use crate::model::task::Task;
use crate::store::state::Collections;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque record identifier.
///
/// Generated ids are UUID v4 text, but any string is accepted so that
/// backups produced by other clients (timestamp ids) load unchanged.
pub type RecordId = String;

/// Generates a fresh record identifier.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4().to_string()
}

/// Sort direction used when loading a collection from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

/// Every entity kind managed by the central store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Task,
    Project,
    Note,
    Event,
    Transaction,
    Book,
    Goal,
    JournalEntry,
    Prayer,
    BibleReading,
    AcademicCourse,
    PomodoroSession,
}

impl EntityKind {
    pub const ALL: [EntityKind; 12] = [
        EntityKind::Task,
        EntityKind::Project,
        EntityKind::Note,
        EntityKind::Event,
        EntityKind::Transaction,
        EntityKind::Book,
        EntityKind::Goal,
        EntityKind::JournalEntry,
        EntityKind::Prayer,
        EntityKind::BibleReading,
        EntityKind::AcademicCourse,
        EntityKind::PomodoroSession,
    ];

    /// Stable storage name, also used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Project => "project",
            Self::Note => "note",
            Self::Event => "event",
            Self::Transaction => "financial_transaction",
            Self::Book => "book",
            Self::Goal => "goal",
            Self::JournalEntry => "journal_entry",
            Self::Prayer => "prayer",
            Self::BibleReading => "bible_reading",
            Self::AcademicCourse => "academic_course",
            Self::PomodoroSession => "pomodoro_session",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Direction of the timestamp column a collection is loaded by.
    ///
    /// Calendar events read chronologically; everything else newest first.
    pub fn order_direction(self) -> OrderDirection {
        match self {
            Self::Event => OrderDirection::Ascending,
            _ => OrderDirection::Descending,
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown entity kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEntityKind(pub String);

impl Display for UnknownEntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown entity kind `{}`", self.0)
    }
}

impl Error for UnknownEntityKind {}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    /// Accepts storage names plus dashed and short aliases (`journal`,
    /// `bible`, `course`, `pomodoro`, `transaction`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let singular = if let Some(stem) = normalized.strip_suffix("ies") {
            format!("{stem}y")
        } else {
            normalized.trim_end_matches('s').to_string()
        };
        let alias = |name: &str| match name {
            "transaction" | "finance" | "financial_transaction" => Some(Self::Transaction),
            "journal" | "journal_entry" => Some(Self::JournalEntry),
            "bible" | "bible_reading" => Some(Self::BibleReading),
            "course" | "academic" | "academic_course" => Some(Self::AcademicCourse),
            "pomodoro" | "pomodoro_session" => Some(Self::PomodoroSession),
            other => Self::parse(other),
        };
        alias(&normalized)
            .or_else(|| alias(&singular))
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}

/// Contract shared by every concrete entity record.
///
/// Lets the reducer and repository handle all kinds through one generic
/// path instead of one hand-written arm per kind and verb.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Value of the column this kind is ordered by when loaded.
    fn order_timestamp(&self) -> DateTime<Utc>;

    fn collection(collections: &Collections) -> &Vec<Self>;

    fn collection_mut(collections: &mut Collections) -> &mut Vec<Self>;

    fn into_record(self) -> Record;
}

/// Tagged union over every entity kind, carried by actions and writes.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Task(Task),
    Project(Project),
    Note(Note),
    Event(Event),
    Transaction(FinancialTransaction),
    Book(Book),
    Goal(Goal),
    JournalEntry(JournalEntry),
    Prayer(Prayer),
    BibleReading(BibleReading),
    AcademicCourse(AcademicCourse),
    PomodoroSession(PomodoroSession),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Task(_) => EntityKind::Task,
            Self::Project(_) => EntityKind::Project,
            Self::Note(_) => EntityKind::Note,
            Self::Event(_) => EntityKind::Event,
            Self::Transaction(_) => EntityKind::Transaction,
            Self::Book(_) => EntityKind::Book,
            Self::Goal(_) => EntityKind::Goal,
            Self::JournalEntry(_) => EntityKind::JournalEntry,
            Self::Prayer(_) => EntityKind::Prayer,
            Self::BibleReading(_) => EntityKind::BibleReading,
            Self::AcademicCourse(_) => EntityKind::AcademicCourse,
            Self::PomodoroSession(_) => EntityKind::PomodoroSession,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Task(record) => record.id(),
            Self::Project(record) => record.id(),
            Self::Note(record) => record.id(),
            Self::Event(record) => record.id(),
            Self::Transaction(record) => record.id(),
            Self::Book(record) => record.id(),
            Self::Goal(record) => record.id(),
            Self::JournalEntry(record) => record.id(),
            Self::Prayer(record) => record.id(),
            Self::BibleReading(record) => record.id(),
            Self::AcademicCourse(record) => record.id(),
            Self::PomodoroSession(record) => record.id(),
        }
    }

    pub fn order_timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Task(record) => record.order_timestamp(),
            Self::Project(record) => record.order_timestamp(),
            Self::Note(record) => record.order_timestamp(),
            Self::Event(record) => record.order_timestamp(),
            Self::Transaction(record) => record.order_timestamp(),
            Self::Book(record) => record.order_timestamp(),
            Self::Goal(record) => record.order_timestamp(),
            Self::JournalEntry(record) => record.order_timestamp(),
            Self::Prayer(record) => record.order_timestamp(),
            Self::BibleReading(record) => record.order_timestamp(),
            Self::AcademicCourse(record) => record.order_timestamp(),
            Self::PomodoroSession(record) => record.order_timestamp(),
        }
    }

    /// Serializes the payload as the JSON object stored by repositories.
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Self::Task(record) => serde_json::to_string(record),
            Self::Project(record) => serde_json::to_string(record),
            Self::Note(record) => serde_json::to_string(record),
            Self::Event(record) => serde_json::to_string(record),
            Self::Transaction(record) => serde_json::to_string(record),
            Self::Book(record) => serde_json::to_string(record),
            Self::Goal(record) => serde_json::to_string(record),
            Self::JournalEntry(record) => serde_json::to_string(record),
            Self::Prayer(record) => serde_json::to_string(record),
            Self::BibleReading(record) => serde_json::to_string(record),
            Self::AcademicCourse(record) => serde_json::to_string(record),
            Self::PomodoroSession(record) => serde_json::to_string(record),
        }
    }

    /// Decodes a stored JSON payload for the given kind.
    pub fn from_json(kind: EntityKind, payload: &str) -> serde_json::Result<Self> {
        Ok(match kind {
            EntityKind::Task => Self::Task(serde_json::from_str(payload)?),
            EntityKind::Project => Self::Project(serde_json::from_str(payload)?),
            EntityKind::Note => Self::Note(serde_json::from_str(payload)?),
            EntityKind::Event => Self::Event(serde_json::from_str(payload)?),
            EntityKind::Transaction => Self::Transaction(serde_json::from_str(payload)?),
            EntityKind::Book => Self::Book(serde_json::from_str(payload)?),
            EntityKind::Goal => Self::Goal(serde_json::from_str(payload)?),
            EntityKind::JournalEntry => Self::JournalEntry(serde_json::from_str(payload)?),
            EntityKind::Prayer => Self::Prayer(serde_json::from_str(payload)?),
            EntityKind::BibleReading => Self::BibleReading(serde_json::from_str(payload)?),
            EntityKind::AcademicCourse => Self::AcademicCourse(serde_json::from_str(payload)?),
            EntityKind::PomodoroSession => Self::PomodoroSession(serde_json::from_str(payload)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityKind, OrderDirection};

    #[test]
    fn storage_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn from_str_accepts_plurals_and_aliases() {
        assert_eq!("tasks".parse::<EntityKind>().unwrap(), EntityKind::Task);
        assert_eq!(
            "Journal".parse::<EntityKind>().unwrap(),
            EntityKind::JournalEntry
        );
        assert_eq!(
            "bible-reading".parse::<EntityKind>().unwrap(),
            EntityKind::BibleReading
        );
        assert_eq!(
            "journal_entries".parse::<EntityKind>().unwrap(),
            EntityKind::JournalEntry
        );
        assert_eq!(
            "transactions".parse::<EntityKind>().unwrap(),
            EntityKind::Transaction
        );
        assert!("widgets".parse::<EntityKind>().is_err());
    }

    #[test]
    fn only_events_load_ascending() {
        for kind in EntityKind::ALL {
            let expected = if kind == EntityKind::Event {
                OrderDirection::Ascending
            } else {
                OrderDirection::Descending
            };
            assert_eq!(kind.order_direction(), expected);
        }
    }
}
