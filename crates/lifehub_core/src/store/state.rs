//! Store snapshot types.
//!
//! # Invariants
//! - Each collection preserves insertion order; loads replace it with the
//!   repository's per-kind ordering.
//! - `StatePatch` fields left as `None` never touch the snapshot.

use crate::model::academic::AcademicCourse;
use crate::model::book::Book;
use crate::model::entity::{Entity, EntityKind, Record};
use crate::model::event::Event;
use crate::model::faith::{BibleReading, Prayer};
use crate::model::finance::FinancialTransaction;
use crate::model::goal::Goal;
use crate::model::journal::JournalEntry;
use crate::model::note::Note;
use crate::model::pomodoro::PomodoroSession;
use crate::model::project::Project;
use crate::model::task::Task;
use crate::model::ui::{default_modules, default_themes, Module, Theme, User};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ACTIVE_MODULE: &str = "dashboard";

/// One ordered collection per entity kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collections {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub financial_transactions: Vec<FinancialTransaction>,
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub journal_entries: Vec<JournalEntry>,
    #[serde(default)]
    pub prayers: Vec<Prayer>,
    #[serde(default)]
    pub bible_readings: Vec<BibleReading>,
    #[serde(default)]
    pub academic_courses: Vec<AcademicCourse>,
    #[serde(default)]
    pub pomodoro_sessions: Vec<PomodoroSession>,
}

impl Collections {
    pub fn len_of(&self, kind: EntityKind) -> usize {
        with_entity_type!(kind, T => T::collection(self).len())
    }

    pub fn total_len(&self) -> usize {
        EntityKind::ALL
            .into_iter()
            .map(|kind| self.len_of(kind))
            .sum()
    }

    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        with_entity_type!(kind, T => T::collection(self).iter().any(|item| item.id() == id))
    }

    pub fn get(&self, kind: EntityKind, id: &str) -> Option<Record> {
        with_entity_type!(kind, T => T::collection(self)
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .map(Entity::into_record))
    }

    /// Clones one collection into tagged records, in stored order.
    pub fn records(&self, kind: EntityKind) -> Vec<Record> {
        with_entity_type!(kind, T => T::collection(self)
            .iter()
            .cloned()
            .map(Entity::into_record)
            .collect())
    }

    /// Appends `record` to the end of its collection.
    pub fn push_record(&mut self, record: Record) {
        with_record!(record, item => push_entity(self, item))
    }
}

fn push_entity<T: Entity>(collections: &mut Collections, item: T) {
    T::collection_mut(collections).push(item);
}

/// Full top-level snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub user: Option<User>,
    pub modules: Vec<Module>,
    pub current_theme: Theme,
    pub available_themes: Vec<Theme>,
    pub collections: Collections,
    pub active_module: String,
    pub sidebar_collapsed: bool,
}

impl Default for AppState {
    fn default() -> Self {
        let available_themes = default_themes();
        Self {
            user: None,
            modules: default_modules(),
            current_theme: available_themes[0].clone(),
            available_themes,
            collections: Collections::default(),
            active_module: DEFAULT_ACTIVE_MODULE.to_string(),
            sidebar_collapsed: false,
        }
    }
}

/// Wholesale replacement for any subset of the snapshot's data fields.
///
/// Shares its wire shape with exported backups, so a parsed backup document
/// is directly a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePatch {
    pub tasks: Option<Vec<Task>>,
    pub projects: Option<Vec<Project>>,
    pub notes: Option<Vec<Note>>,
    pub events: Option<Vec<Event>>,
    pub financial_transactions: Option<Vec<FinancialTransaction>>,
    pub books: Option<Vec<Book>>,
    pub goals: Option<Vec<Goal>>,
    pub journal_entries: Option<Vec<JournalEntry>>,
    pub prayers: Option<Vec<Prayer>>,
    pub bible_readings: Option<Vec<BibleReading>>,
    pub academic_courses: Option<Vec<AcademicCourse>>,
    pub pomodoro_sessions: Option<Vec<PomodoroSession>>,
    pub available_themes: Option<Vec<Theme>>,
    pub current_theme: Option<Theme>,
    pub modules: Option<Vec<Module>>,
}

impl StatePatch {
    /// Patch replacing every collection with the given values.
    pub fn from_collections(collections: Collections) -> Self {
        Self {
            tasks: Some(collections.tasks),
            projects: Some(collections.projects),
            notes: Some(collections.notes),
            events: Some(collections.events),
            financial_transactions: Some(collections.financial_transactions),
            books: Some(collections.books),
            goals: Some(collections.goals),
            journal_entries: Some(collections.journal_entries),
            prayers: Some(collections.prayers),
            bible_readings: Some(collections.bible_readings),
            academic_courses: Some(collections.academic_courses),
            pomodoro_sessions: Some(collections.pomodoro_sessions),
            ..Self::default()
        }
    }

    /// Patch emptying every data collection.
    pub fn empty_collections() -> Self {
        Self::from_collections(Collections::default())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Entity kinds whose collection this patch replaces.
    pub fn replaced_kinds(&self) -> Vec<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                EntityKind::Task => self.tasks.is_some(),
                EntityKind::Project => self.projects.is_some(),
                EntityKind::Note => self.notes.is_some(),
                EntityKind::Event => self.events.is_some(),
                EntityKind::Transaction => self.financial_transactions.is_some(),
                EntityKind::Book => self.books.is_some(),
                EntityKind::Goal => self.goals.is_some(),
                EntityKind::JournalEntry => self.journal_entries.is_some(),
                EntityKind::Prayer => self.prayers.is_some(),
                EntityKind::BibleReading => self.bible_readings.is_some(),
                EntityKind::AcademicCourse => self.academic_courses.is_some(),
                EntityKind::PomodoroSession => self.pomodoro_sessions.is_some(),
            })
            .collect()
    }

    /// Applies every present field to `state`.
    pub fn apply_to(self, state: &mut AppState) {
        let collections = &mut state.collections;
        replace_if_some(&mut collections.tasks, self.tasks);
        replace_if_some(&mut collections.projects, self.projects);
        replace_if_some(&mut collections.notes, self.notes);
        replace_if_some(&mut collections.events, self.events);
        replace_if_some(
            &mut collections.financial_transactions,
            self.financial_transactions,
        );
        replace_if_some(&mut collections.books, self.books);
        replace_if_some(&mut collections.goals, self.goals);
        replace_if_some(&mut collections.journal_entries, self.journal_entries);
        replace_if_some(&mut collections.prayers, self.prayers);
        replace_if_some(&mut collections.bible_readings, self.bible_readings);
        replace_if_some(&mut collections.academic_courses, self.academic_courses);
        replace_if_some(&mut collections.pomodoro_sessions, self.pomodoro_sessions);
        replace_if_some(&mut state.available_themes, self.available_themes);
        replace_if_some(&mut state.current_theme, self.current_theme);
        replace_if_some(&mut state.modules, self.modules);
    }
}

fn replace_if_some<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
