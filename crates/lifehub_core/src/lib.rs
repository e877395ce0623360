//! Core domain logic for LifeHub.
//! This crate owns the state store, record persistence and every derived
//! figure the modules display.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::entity::{new_record_id, Entity, EntityKind, Record, RecordId};
pub use repo::record_repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
pub use search::{search_all, SearchHit, SearchQuery};
pub use service::backup::{export_backup, parse_backup, BackupError};
pub use service::pomodoro::{PomodoroSettings, PomodoroTimer};
pub use store::action::{Action, RemoteWrite};
pub use store::state::{AppState, Collections, StatePatch};
pub use store::sync::{NullSink, RecordingSink, RemoteSink, SyncError, SyncWorker};
pub use store::Store;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
