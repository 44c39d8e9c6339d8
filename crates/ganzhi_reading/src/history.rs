//! Reading history: one record per served reading.
//!
//! Records live in a SQLite `readings` table:
//!
//! | column | type |
//! |---|---|
//! | `id` | TEXT PRIMARY KEY (UUID) |
//! | `kind` | TEXT |
//! | `input_data` | TEXT (request JSON) |
//! | `result` | TEXT (response JSON) |
//! | `user_id` | TEXT, nullable |
//! | `created_at` | TEXT (RFC 3339, UTC, nanoseconds) |

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::HistoryError;

/// Default number of records returned by a listing.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Record kind written for Bazi readings.
pub const BAZI_KIND: &str = "bazi";

/// How long a connection waits on a lock held by another connection.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS readings (
    id         TEXT PRIMARY KEY,
    kind       TEXT NOT NULL,
    input_data TEXT NOT NULL,
    result     TEXT NOT NULL,
    user_id    TEXT,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_readings_created_at ON readings(created_at);
CREATE INDEX IF NOT EXISTS idx_readings_user ON readings(user_id, created_at);
";

const INSERT: &str = "INSERT INTO readings (id, kind, input_data, result, user_id, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

// rowid breaks ties between records stamped in the same instant.
const LIST: &str = "SELECT id, kind, input_data, result, user_id, created_at FROM readings
     ORDER BY created_at DESC, rowid DESC LIMIT ?1";

const LIST_FOR_USER: &str = "SELECT id, kind, input_data, result, user_id, created_at FROM readings
     WHERE user_id = ?1
     ORDER BY created_at DESC, rowid DESC LIMIT ?2";

/// A stored reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingRecord {
    pub id: Uuid,
    /// Reading family, `"bazi"` for charts.
    pub kind: String,
    /// The request as JSON text.
    pub input_data: String,
    /// The response as JSON text.
    pub result: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReadingRecord {
    /// Fresh record stamped with a random id and the current time.
    pub fn new(
        kind: impl Into<String>,
        input_data: String,
        result: String,
        user_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            input_data,
            result,
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// Persistence for reading records.
pub trait HistoryStore: Send + Sync {
    fn append(&self, record: &ReadingRecord) -> Result<(), HistoryError>;

    /// Up to `limit` records, newest first.
    fn list(&self, limit: usize) -> Result<Vec<ReadingRecord>, HistoryError>;

    /// Up to `limit` records of one user, newest first.
    fn list_for_user(&self, user_id: &str, limit: usize)
    -> Result<Vec<ReadingRecord>, HistoryError>;
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn newest_first<'a>(
    records: impl DoubleEndedIterator<Item = &'a ReadingRecord>,
    user_id: Option<&str>,
    limit: usize,
) -> Vec<ReadingRecord> {
    records
        .rev()
        .filter(|r| user_id.is_none_or(|u| r.user_id.as_deref() == Some(u)))
        .take(limit)
        .cloned()
        .collect()
}

/// Fixed-width so that text order is time order.
fn timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// A `readings` row before its id and timestamp are parsed.
struct RawRecord {
    id: String,
    kind: String,
    input_data: String,
    result: String,
    user_id: Option<String>,
    created_at: String,
}

impl RawRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            kind: row.get(1)?,
            input_data: row.get(2)?,
            result: row.get(3)?,
            user_id: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn decode(self) -> Result<ReadingRecord, HistoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| HistoryError::Serde(format!("id {:?}: {e}", self.id)))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| HistoryError::Serde(format!("created_at {:?}: {e}", self.created_at)))?
            .with_timezone(&Utc);
        Ok(ReadingRecord {
            id,
            kind: self.kind,
            input_data: self.input_data,
            result: self.result,
            user_id: self.user_id,
            created_at,
        })
    }
}

/// SQLite-backed store.
///
/// Connections to the same file coordinate through SQLite's own locking,
/// so several stores (or processes) may share one database. Rows that
/// fail to decode are skipped with a warning.
#[derive(Debug)]
pub struct SqliteHistoryStore {
    conn: Mutex<Connection>,
}

impl SqliteHistoryStore {
    /// Open or create the database file, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        info!(path = %path.display(), "history database opened");
        Self::init(conn)
    }

    /// Private in-memory database.
    pub fn open_in_memory() -> Result<Self, HistoryError> {
        debug!("opening in-memory history database");
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, HistoryError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn fetch(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<ReadingRecord>, HistoryError> {
        let raw = {
            let conn = lock(&self.conn);
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt
                .query_map(params, RawRecord::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };
        let records = raw
            .into_iter()
            .filter_map(|r| match r.decode() {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "skipping undecodable history row");
                    None
                }
            })
            .collect();
        Ok(records)
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

impl HistoryStore for SqliteHistoryStore {
    fn append(&self, record: &ReadingRecord) -> Result<(), HistoryError> {
        lock(&self.conn).execute(
            INSERT,
            params![
                record.id.to_string(),
                record.kind,
                record.input_data,
                record.result,
                record.user_id,
                timestamp(&record.created_at),
            ],
        )?;
        debug!(id = %record.id, "history record stored");
        Ok(())
    }

    fn list(&self, limit: usize) -> Result<Vec<ReadingRecord>, HistoryError> {
        self.fetch(LIST, params![sql_limit(limit)])
    }

    fn list_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ReadingRecord>, HistoryError> {
        self.fetch(LIST_FOR_USER, params![user_id, sql_limit(limit)])
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: Mutex<Vec<ReadingRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&self, record: &ReadingRecord) -> Result<(), HistoryError> {
        lock(&self.records).push(record.clone());
        Ok(())
    }

    fn list(&self, limit: usize) -> Result<Vec<ReadingRecord>, HistoryError> {
        Ok(newest_first(lock(&self.records).iter(), None, limit))
    }

    fn list_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ReadingRecord>, HistoryError> {
        Ok(newest_first(lock(&self.records).iter(), Some(user_id), limit))
    }
}
