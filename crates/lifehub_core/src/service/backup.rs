//! JSON backup export/import and the clear-all reset.
//!
//! # Invariants
//! - Export writes camelCase keys so documents stay readable by older
//!   web exports and vice versa.
//! - Import never partially applies: a document either parses into a
//!   complete [`StatePatch`] or is rejected.
//! - Import and clear only touch local state. Callers that want storage to
//!   follow an import submit [`import_writes`] themselves.

use crate::model::academic::AcademicCourse;
use crate::model::book::Book;
use crate::model::entity::EntityKind;
use crate::model::event::Event;
use crate::model::faith::{BibleReading, Prayer};
use crate::model::finance::FinancialTransaction;
use crate::model::goal::Goal;
use crate::model::journal::JournalEntry;
use crate::model::note::Note;
use crate::model::project::Project;
use crate::model::task::Task;
use crate::model::ui::{Module, Theme};
use crate::store::action::RemoteWrite;
use crate::store::state::{AppState, Collections, StatePatch};
use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum BackupError {
    /// Document is not JSON or does not match the backup shape.
    InvalidJson(serde_json::Error),
    Encode(serde_json::Error),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => {
                write!(f, "invalid JSON format, please check your data: {err}")
            }
            Self::Encode(err) => write!(f, "failed to encode backup: {err}"),
            Self::Io { path, source } => write!(f, "backup file `{}`: {source}", path.display()),
        }
    }
}

impl Error for BackupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) | Self::Encode(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupDocument<'a> {
    tasks: &'a [Task],
    projects: &'a [Project],
    notes: &'a [Note],
    events: &'a [Event],
    financial_transactions: &'a [FinancialTransaction],
    books: &'a [Book],
    goals: &'a [Goal],
    journal_entries: &'a [JournalEntry],
    prayers: &'a [Prayer],
    bible_readings: &'a [BibleReading],
    academic_courses: &'a [AcademicCourse],
    available_themes: &'a [Theme],
    current_theme: &'a Theme,
    modules: &'a [Module],
}

/// Serializes the exportable part of `state` as pretty-printed JSON.
///
/// Pomodoro history and session fields (user, active module, sidebar) are
/// not part of a backup.
pub fn export_backup(state: &AppState) -> Result<String, BackupError> {
    let c = &state.collections;
    let document = BackupDocument {
        tasks: &c.tasks,
        projects: &c.projects,
        notes: &c.notes,
        events: &c.events,
        financial_transactions: &c.financial_transactions,
        books: &c.books,
        goals: &c.goals,
        journal_entries: &c.journal_entries,
        prayers: &c.prayers,
        bible_readings: &c.bible_readings,
        academic_courses: &c.academic_courses,
        available_themes: &state.available_themes,
        current_theme: &state.current_theme,
        modules: &state.modules,
    };
    serde_json::to_string_pretty(&document).map_err(BackupError::Encode)
}

/// Parses a backup document into a load patch.
///
/// Keys absent from the document stay `None` and leave state untouched.
pub fn parse_backup(json: &str) -> Result<StatePatch, BackupError> {
    match serde_json::from_str::<StatePatch>(json) {
        Ok(patch) => {
            info!(
                "event=backup_parse module=backup status=ok empty={}",
                patch.is_empty()
            );
            Ok(patch)
        }
        Err(err) => {
            warn!(
                "event=backup_parse module=backup status=error line={} column={}",
                err.line(),
                err.column()
            );
            Err(BackupError::InvalidJson(err))
        }
    }
}

/// `productivity-app-backup-YYYY-MM-DD.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("productivity-app-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Patch emptying every data collection while keeping themes and modules.
pub fn clear_all_patch() -> StatePatch {
    StatePatch::empty_collections()
}

/// Writes [`export_backup`] output to `path`.
pub fn write_backup(state: &AppState, path: &Path) -> Result<(), BackupError> {
    let json = export_backup(state)?;
    std::fs::write(path, json).map_err(|source| BackupError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "event=backup_export module=backup status=ok path={}",
        path.display()
    );
    Ok(())
}

/// Reads and parses a backup file.
pub fn read_backup(path: &Path) -> Result<StatePatch, BackupError> {
    let json = std::fs::read_to_string(path).map_err(|source| BackupError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_backup(&json)
}

/// Writes that bring storage in line with an applied import.
///
/// Only `replaced` kinds (see [`StatePatch::replaced_kinds`]) are
/// considered. For each, records held in `before` but missing from `after`
/// are deleted first, then every record in `after` is updated when `before`
/// had it and inserted otherwise.
pub fn import_writes(
    before: &Collections,
    replaced: &[EntityKind],
    after: &Collections,
) -> Vec<RemoteWrite> {
    let mut writes = Vec::new();
    for &kind in replaced {
        let loaded = after.records(kind);
        writes.extend(
            before
                .records(kind)
                .into_iter()
                .filter(|old| !after.contains(kind, old.id()))
                .map(|old| RemoteWrite::Delete {
                    kind,
                    id: old.id().to_string(),
                }),
        );
        writes.extend(loaded.into_iter().map(|record| {
            if before.contains(kind, record.id()) {
                RemoteWrite::Update(record)
            } else {
                RemoteWrite::Insert(record)
            }
        }));
    }
    writes
}
