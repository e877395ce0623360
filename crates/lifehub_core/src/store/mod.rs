//! Central state container: state snapshot, action catalog, reducer and
//! the remote-sync side channel.
//!
//! # Responsibility
//! - Own the single in-memory snapshot every module reads from.
//! - Apply actions synchronously and hand persistence effects to a
//!   [`RemoteSink`] without waiting on them.
//!
//! # Invariants
//! - The snapshot only changes through [`Store::dispatch`].
//! - Local state is updated before, and independently of, the remote write.
//! - Remote failures never roll back local state.

/// Expands `$body` once per entity kind with `$ty` bound to the concrete
/// record type for `$kind`.
macro_rules! with_entity_type {
    ($kind:expr, $ty:ident => $body:expr) => {{
        use $crate::model::entity::EntityKind as Kind;
        match $kind {
            Kind::Task => {
                type $ty = $crate::model::task::Task;
                $body
            }
            Kind::Project => {
                type $ty = $crate::model::project::Project;
                $body
            }
            Kind::Note => {
                type $ty = $crate::model::note::Note;
                $body
            }
            Kind::Event => {
                type $ty = $crate::model::event::Event;
                $body
            }
            Kind::Transaction => {
                type $ty = $crate::model::finance::FinancialTransaction;
                $body
            }
            Kind::Book => {
                type $ty = $crate::model::book::Book;
                $body
            }
            Kind::Goal => {
                type $ty = $crate::model::goal::Goal;
                $body
            }
            Kind::JournalEntry => {
                type $ty = $crate::model::journal::JournalEntry;
                $body
            }
            Kind::Prayer => {
                type $ty = $crate::model::faith::Prayer;
                $body
            }
            Kind::BibleReading => {
                type $ty = $crate::model::faith::BibleReading;
                $body
            }
            Kind::AcademicCourse => {
                type $ty = $crate::model::academic::AcademicCourse;
                $body
            }
            Kind::PomodoroSession => {
                type $ty = $crate::model::pomodoro::PomodoroSession;
                $body
            }
        }
    }};
}

/// Expands `$body` once per `Record` variant with `$item` bound to the
/// unwrapped entity.
macro_rules! with_record {
    ($record:expr, $item:ident => $body:expr) => {{
        use $crate::model::entity::Record as R;
        match $record {
            R::Task($item) => $body,
            R::Project($item) => $body,
            R::Note($item) => $body,
            R::Event($item) => $body,
            R::Transaction($item) => $body,
            R::Book($item) => $body,
            R::Goal($item) => $body,
            R::JournalEntry($item) => $body,
            R::Prayer($item) => $body,
            R::BibleReading($item) => $body,
            R::AcademicCourse($item) => $body,
            R::PomodoroSession($item) => $body,
        }
    }};
}

pub mod action;
pub mod reducer;
pub mod state;
pub mod sync;

use crate::model::ui::User;
use crate::repo::record_repo::{RecordRepository, RepoResult};
use action::Action;
use log::{debug, info};
use reducer::{reduce, Reduction};
use state::{AppState, StatePatch};
use std::time::Instant;
use sync::RemoteSink;

/// Dispatch front door over the reducer.
pub struct Store<S: RemoteSink> {
    state: AppState,
    sink: S,
}

impl<S: RemoteSink> Store<S> {
    /// Creates a store with the initial state.
    pub fn new(sink: S) -> Self {
        Self::with_state(AppState::default(), sink)
    }

    pub fn with_state(state: AppState, sink: S) -> Self {
        Self { state, sink }
    }

    /// Current snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Applies `action` and forwards its persistence effect, if any.
    ///
    /// # Side effects
    /// - The effect is submitted after the snapshot is replaced; the caller
    ///   never observes the remote outcome.
    pub fn dispatch(&mut self, action: Action) {
        let action_name = action.name();
        let kind = action.kind().map_or("-", |kind| kind.as_str());

        let current = std::mem::take(&mut self.state);
        let Reduction { state, effect } = reduce(current, action);
        self.state = state;

        debug!(
            "event=dispatch module=store status=ok action={} kind={} remote={}",
            action_name,
            kind,
            effect.is_some()
        );

        if let Some(write) = effect {
            self.sink.submit(write);
        }
    }

    /// Replaces every data collection with what `repo` holds.
    ///
    /// # Errors
    /// - Returns repository errors unchanged; state is left untouched on error.
    pub fn hydrate<R: RecordRepository>(&mut self, repo: &R) -> RepoResult<()> {
        let started_at = Instant::now();
        let collections = repo.load_all()?;
        let total = collections.total_len();
        self.dispatch(Action::LoadData(StatePatch::from_collections(collections)));
        info!(
            "event=hydrate module=store status=ok records={} duration_ms={}",
            total,
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    /// Sets the active user, then loads their records.
    pub fn sign_in<R: RecordRepository>(&mut self, user: User, repo: &R) -> RepoResult<()> {
        self.dispatch(Action::SetUser(Some(user)));
        self.hydrate(repo)
    }

    /// Clears the user and the module collections. Pomodoro history stays
    /// in memory and storage is untouched.
    pub fn sign_out(&mut self) {
        let patch = StatePatch {
            pomodoro_sessions: None,
            ..StatePatch::empty_collections()
        };
        self.dispatch(Action::SetUser(None));
        self.dispatch(Action::LoadData(patch));
    }
}
