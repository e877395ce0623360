//! Generic record repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide per-kind select/insert/update/delete keyed by record id.
//! - Load collections ordered by each kind's timestamp column.
//!
//! # Invariants
//! - `(kind, id)` is unique in storage.
//! - Updates replace the full stored payload; nothing is merged.
//! - Read paths reject undecodable payloads instead of skipping them.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::entity::{EntityKind, OrderDirection, Record, RecordId};
use crate::store::state::Collections;
use rusqlite::{params, Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound {
        kind: EntityKind,
        id: RecordId,
    },
    Duplicate {
        kind: EntityKind,
        id: RecordId,
    },
    Serialization(serde_json::Error),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Duplicate { kind, id } => write!(f, "{kind} already exists: {id}"),
            Self::Serialization(err) => write!(f, "failed to encode record: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data-access contract the store hydrates from and syncs to.
pub trait RecordRepository {
    /// Inserts a new record; fails with `Duplicate` when the id is taken.
    fn insert(&self, record: &Record) -> RepoResult<()>;
    /// Replaces a stored record; fails with `NotFound` when absent.
    fn update(&self, record: &Record) -> RepoResult<()>;
    /// Removes a record. Deleting an absent id is not an error.
    fn delete(&self, kind: EntityKind, id: &str) -> RepoResult<()>;
    fn get(&self, kind: EntityKind, id: &str) -> RepoResult<Option<Record>>;
    /// Lists one kind in its load order, ties broken by id.
    fn list(&self, kind: EntityKind) -> RepoResult<Vec<Record>>;

    /// Loads every kind into fresh collections.
    fn load_all(&self) -> RepoResult<Collections> {
        let mut collections = Collections::default();
        for kind in EntityKind::ALL {
            for record in self.list(kind)? {
                collections.push_record(record);
            }
        }
        Ok(collections)
    }
}

/// SQLite-backed record repository over the `records` table.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not the latest.
    /// - `MissingRequiredTable` when `records` is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = schema_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'records'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable("records"));
        }

        Ok(Self { conn })
    }

    /// Number of stored records of one kind.
    pub fn count(&self, kind: EntityKind) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM records WHERE kind = ?1;",
            [kind.as_str()],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn insert(&self, record: &Record) -> RepoResult<()> {
        let payload = record.to_json().map_err(RepoError::Serialization)?;
        let result = self.conn.execute(
            "INSERT INTO records (kind, id, payload, order_ts)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                record.kind().as_str(),
                record.id(),
                payload,
                record.order_timestamp().timestamp_millis(),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::Duplicate {
                    kind: record.kind(),
                    id: record.id().to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(&self, record: &Record) -> RepoResult<()> {
        let payload = record.to_json().map_err(RepoError::Serialization)?;
        let changed = self.conn.execute(
            "UPDATE records
             SET
                payload = ?3,
                order_ts = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE kind = ?1 AND id = ?2;",
            params![
                record.kind().as_str(),
                record.id(),
                payload,
                record.order_timestamp().timestamp_millis(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: record.kind(),
                id: record.id().to_string(),
            });
        }
        Ok(())
    }

    fn delete(&self, kind: EntityKind, id: &str) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM records WHERE kind = ?1 AND id = ?2;",
            params![kind.as_str(), id],
        )?;
        Ok(())
    }

    fn get(&self, kind: EntityKind, id: &str) -> RepoResult<Option<Record>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM records WHERE kind = ?1 AND id = ?2;")?;
        let mut rows = stmt.query(params![kind.as_str(), id])?;
        if let Some(row) = rows.next()? {
            let payload: String = row.get(0)?;
            return decode_payload(kind, id, &payload).map(Some);
        }
        Ok(None)
    }

    fn list(&self, kind: EntityKind) -> RepoResult<Vec<Record>> {
        let sql = match kind.order_direction() {
            OrderDirection::Ascending => {
                "SELECT id, payload FROM records WHERE kind = ?1 ORDER BY order_ts ASC, id ASC;"
            }
            OrderDirection::Descending => {
                "SELECT id, payload FROM records WHERE kind = ?1 ORDER BY order_ts DESC, id ASC;"
            }
        };

        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([kind.as_str()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let payload: String = row.get(1)?;
            records.push(decode_payload(kind, &id, &payload)?);
        }
        Ok(records)
    }
}

fn decode_payload(kind: EntityKind, id: &str, payload: &str) -> RepoResult<Record> {
    let record = Record::from_json(kind, payload).map_err(|err| {
        RepoError::InvalidData(format!("undecodable {kind} payload for id `{id}`: {err}"))
    })?;
    if record.id() != id {
        return Err(RepoError::InvalidData(format!(
            "{kind} payload id `{}` does not match row id `{id}`",
            record.id()
        )));
    }
    Ok(record)
}
