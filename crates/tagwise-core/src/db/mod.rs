//! SQLite database module for tagwise
//!
//! Persists the data the recommendation engine reads and implements every
//! store contract on top of it.

mod load;
mod queries;
mod schema;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::error::{Result, TagwiseError};
use crate::map_lookup_err;

pub use load::LoadSummary;
pub use schema::{create_schema, SchemaCreateResult, CURRENT_SCHEMA_VERSION};

/// Database file name inside a store directory
pub const DB_FILE: &str = "tagwise.db";

/// Row counts per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct StoreCounts {
    pub tags: i64,
    pub entities: i64,
    pub associations: i64,
    pub activities: i64,
}

/// SQLite database for tagwise
///
/// The connection sits behind a mutex so the signal calculators can share it
/// across threads.
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create the database inside an existing store directory
    pub fn open(store_dir: &Path) -> Result<Self> {
        if !store_dir.is_dir() {
            return Err(TagwiseError::StoreNotFound {
                path: store_dir.to_path_buf(),
            });
        }

        let db_path = store_dir.join(DB_FILE);
        let conn = Connection::open(&db_path).map_err(|e| {
            TagwiseError::Other(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| TagwiseError::Other(format!("failed to enable WAL mode: {}", e)))?;

        let created = create_schema(&conn)
            .map_err(|e| TagwiseError::Other(format!("failed to create database schema: {}", e)))?;
        if created == SchemaCreateResult::Created {
            tracing::debug!(path = %db_path.display(), "created database schema");
        }

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| map_lookup_err!("sqlite", format!("connection poisoned: {}", e)))
    }

    pub fn counts(&self) -> Result<StoreCounts> {
        let conn = self.conn()?;
        let count = |table: &str| -> Result<i64> {
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
                .map_err(|e| TagwiseError::Other(format!("failed to count {}: {}", table, e)))
        };
        Ok(StoreCounts {
            tags: count("tags")?,
            entities: count("entities")?,
            associations: count("tag_associations")?,
            activities: count("activities")?,
        })
    }

    pub fn get_schema_version(&self) -> Result<i64> {
        self.conn()?
            .query_row(
                "SELECT value FROM store_meta WHERE key = 'schema_version'",
                [],
                |r| {
                    let s: String = r.get(0)?;
                    Ok(s.parse().unwrap_or(0))
                },
            )
            .map_err(|e| TagwiseError::Other(format!("failed to get schema version: {}", e)))
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Checkpoint WAL so the next process sees every loaded row
        if let Ok(conn) = self.conn.get_mut() {
            let _ = conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
        }
    }
}

#[cfg(test)]
mod tests;
