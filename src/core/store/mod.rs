//! SQLite persistence for requests and their dependent records
//!
//! The store is the system of record. Schema creation is an explicit step
//! (`initialize`, surfaced as the `init` command); `open` refuses an
//! uninitialized database rather than creating tables on the fly. Mutating
//! lifecycle operations run inside one transaction via [`Store::with_tx`].

mod codec;
pub(crate) mod queries;
mod schema;

pub use queries::RequestFilter;

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;

use crate::core::error::{DeskError, Result};

/// Current schema version; bumped on any table change
const SCHEMA_VERSION: i32 = 1;

/// SQLite-backed store for the request tables
pub struct Store {
    conn: Connection,
    path: String,
}

impl Store {
    /// Open an existing, initialized database
    pub fn open(path: &Path) -> Result<Self> {
        let store = Self::open_unchecked(path)?;
        store.check_schema()?;
        Ok(store)
    }

    /// Open or create the database file without requiring a schema
    ///
    /// Used by `init`; everything else goes through [`Store::open`].
    pub fn open_unchecked(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            path: path.display().to_string(),
        })
    }

    /// In-memory store with the schema applied
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut store = Self {
            conn,
            path: ":memory:".to_string(),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Database location as given at open
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the schema has been created
    pub fn is_initialized(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn check_schema(&self) -> Result<()> {
        if !self.is_initialized()? {
            return Err(DeskError::Uninitialized(self.path.clone()));
        }
        let version: i32 =
            self.conn
                .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                    row.get(0)
                })?;
        if version != SCHEMA_VERSION {
            return Err(DeskError::SchemaVersion {
                found: version,
                expected: SCHEMA_VERSION,
            });
        }
        Ok(())
    }

    /// Run a closure inside one transaction; committed on Ok, rolled back on
    /// any Err
    pub(crate) fn with_tx<T>(
        &mut self,
        f: impl FnOnce(&rusqlite::Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let tx = self.conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    // Single-read conveniences used by the CLI and reporting layers.

    /// Point lookup by record id
    pub fn get_request(&self, id: &crate::core::identity::RecordId) -> Result<crate::entities::Request> {
        queries::get_request(&self.conn, id)
    }

    /// Lookup by record id or tracking number
    pub fn find_request(&self, key: &str) -> Result<crate::entities::Request> {
        queries::find_request(&self.conn, key)
    }

    /// Filtered listing, newest submissions first
    pub fn list_requests(&self, filter: &RequestFilter) -> Result<Vec<crate::entities::Request>> {
        queries::list_requests(&self.conn, filter)
    }
}

/// Encode a timestamp as fixed-width RFC 3339 UTC text.
///
/// Fixed precision keeps lexicographic order identical to chronological
/// order, which the overdue scan's `due_at < ?` comparison relies on.
pub(crate) fn encode_ts(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Truncate a timestamp to the microsecond precision the store keeps.
///
/// Entity constructors clamp their timestamps through this so the snapshot
/// returned by a mutating operation is value-identical to a later read.
pub(crate) fn trunc_to_micros(dt: DateTime<Utc>) -> DateTime<Utc> {
    let sub_micro_nanos = i64::from(dt.timestamp_subsec_nanos() % 1_000);
    dt - chrono::Duration::nanoseconds(sub_micro_nanos)
}

/// Decode a stored timestamp, reporting the column index on failure
pub(crate) fn decode_ts(idx: usize, s: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

pub(crate) fn decode_ts_opt(
    idx: usize,
    s: Option<String>,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    s.map(|s| decode_ts(idx, s)).transpose()
}

/// Map a unique-constraint failure on one of the named columns to Conflict;
/// all other errors pass through as Storage
pub(crate) fn map_constraint(
    err: rusqlite::Error,
    columns: &[(&'static str, &str)],
) -> DeskError {
    if let rusqlite::Error::SqliteFailure(f, Some(msg)) = &err {
        if f.code == rusqlite::ErrorCode::ConstraintViolation {
            for (field, value) in columns {
                if msg.contains(field) {
                    return DeskError::Conflict {
                        field,
                        value: value.to_string(),
                    };
                }
            }
        }
    }
    DeskError::Storage(err)
}
