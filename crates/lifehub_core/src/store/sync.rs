//! Fire-and-forget persistence of store effects.
//!
//! # Responsibility
//! - Define the [`RemoteSink`] seam the store hands writes to.
//! - Provide a background SQLite writer that applies writes in submission
//!   order and never reports failures back to the dispatcher.
//!
//! # Invariants
//! - `submit` never blocks on the write completing.
//! - Failed writes are logged and counted, then dropped.
//! - Dropping [`SyncWorker`] drains queued writes before the thread exits.

use crate::db::{open_db, DbError};
use crate::repo::record_repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
use crate::store::action::RemoteWrite;
use log::{debug, error, info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

const WORKER_THREAD_NAME: &str = "lifehub-sync";

/// Receiver of persistence effects.
pub trait RemoteSink {
    fn submit(&self, write: RemoteWrite);
}

/// Discards every write. For purely in-memory stores.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RemoteSink for NullSink {
    fn submit(&self, _write: RemoteWrite) {}
}

/// Keeps every submitted write in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    writes: Mutex<Vec<RemoteWrite>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears the recorded writes.
    pub fn take(&self) -> Vec<RemoteWrite> {
        match self.writes.lock() {
            Ok(mut writes) => std::mem::take(&mut *writes),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl RemoteSink for RecordingSink {
    fn submit(&self, write: RemoteWrite) {
        match self.writes.lock() {
            Ok(mut writes) => writes.push(write),
            Err(poisoned) => poisoned.into_inner().push(write),
        }
    }
}

impl<T: RemoteSink + ?Sized> RemoteSink for Arc<T> {
    fn submit(&self, write: RemoteWrite) {
        (**self).submit(write);
    }
}

/// Errors raised while starting the background writer.
#[derive(Debug)]
pub enum SyncError {
    Db(DbError),
    Repo(RepoError),
    Spawn(std::io::Error),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Spawn(err) => write!(f, "failed to spawn sync worker: {err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Spawn(err) => Some(err),
        }
    }
}

impl From<DbError> for SyncError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for SyncError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Counters shared between the worker thread and its handle.
#[derive(Debug, Default)]
pub struct SyncStats {
    applied: AtomicU64,
    failed: AtomicU64,
}

impl SyncStats {
    pub fn applied(&self) -> u64 {
        self.applied.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

enum Job {
    Write(RemoteWrite),
    Flush { ack: Sender<()> },
    Shutdown { ack: Sender<()> },
}

/// Background writer owning its own SQLite connection.
pub struct SyncWorker {
    tx: Sender<Job>,
    stats: Arc<SyncStats>,
    handle: Option<JoinHandle<()>>,
}

impl SyncWorker {
    /// Opens (and migrates) the database at `path` and starts the worker.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SyncError> {
        let conn = open_db(path)?;
        Self::spawn(conn)
    }

    /// Starts the worker on an already-migrated connection.
    ///
    /// # Errors
    /// - Returns `Repo` when the connection schema is not ready.
    /// - Returns `Spawn` when the OS refuses a new thread.
    pub fn spawn(conn: Connection) -> Result<Self, SyncError> {
        SqliteRecordRepository::try_new(&conn)?;

        let (tx, rx) = mpsc::channel::<Job>();
        let stats = Arc::new(SyncStats::default());
        let worker_stats = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || run_worker(conn, rx, worker_stats))
            .map_err(SyncError::Spawn)?;

        info!("event=sync_worker_start module=sync status=ok");
        Ok(Self {
            tx,
            stats,
            handle: Some(handle),
        })
    }

    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Blocks until every write submitted before this call is applied.
    pub fn flush(&self) {
        let (ack, done) = mpsc::channel();
        if self.tx.send(Job::Flush { ack }).is_err() {
            warn!("event=sync_flush module=sync status=error error_code=worker_gone");
            return;
        }
        let _ = done.recv();
    }
}

impl RemoteSink for SyncWorker {
    fn submit(&self, write: RemoteWrite) {
        let op = write.op_name();
        let kind = write.kind();
        if self.tx.send(Job::Write(write)).is_err() {
            self.stats.failed.fetch_add(1, Ordering::Relaxed);
            error!(
                "event=remote_write module=sync status=error op={} kind={} error_code=worker_gone",
                op, kind
            );
        }
    }
}

impl Drop for SyncWorker {
    fn drop(&mut self) {
        let (ack, done) = mpsc::channel();
        if self.tx.send(Job::Shutdown { ack }).is_ok() {
            let _ = done.recv();
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        info!(
            "event=sync_worker_stop module=sync status=ok applied={} failed={}",
            self.stats.applied(),
            self.stats.failed()
        );
    }
}

fn run_worker(conn: Connection, rx: Receiver<Job>, stats: Arc<SyncStats>) {
    let repo = match SqliteRecordRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            error!("event=sync_worker_start module=sync status=error error={err}");
            return;
        }
    };

    while let Ok(job) = rx.recv() {
        match job {
            Job::Write(write) => match apply_write(&repo, &write) {
                Ok(()) => {
                    stats.applied.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        "event=remote_write module=sync status=ok op={} kind={} id={}",
                        write.op_name(),
                        write.kind(),
                        write.id()
                    );
                }
                Err(err) => {
                    stats.failed.fetch_add(1, Ordering::Relaxed);
                    error!(
                        "event=remote_write module=sync status=error op={} kind={} id={} error={}",
                        write.op_name(),
                        write.kind(),
                        write.id(),
                        err
                    );
                }
            },
            Job::Flush { ack } => {
                let _ = ack.send(());
            }
            Job::Shutdown { ack } => {
                let _ = ack.send(());
                break;
            }
        }
    }
}

/// Applies one effect through any repository.
pub fn apply_write<R: RecordRepository>(repo: &R, write: &RemoteWrite) -> RepoResult<()> {
    match write {
        RemoteWrite::Insert(record) => repo.insert(record),
        RemoteWrite::Update(record) => repo.update(record),
        RemoteWrite::Delete { kind, id } => repo.delete(*kind, id),
    }
}
