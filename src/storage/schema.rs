//! Database connection management

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Connection manager for the league database
pub struct LeagueDatabase {
    pub(crate) conn: Connection,
}

impl LeagueDatabase {
    /// Open (creating if needed) a database file. The schema is left at
    /// whatever version the file is at; call [`migrate_up`](Self::migrate_up)
    /// to bring it current.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!(path = %path.display(), "Opening league database");
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an empty in-memory database with no migrations applied.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Open an in-memory database migrated to the latest schema.
    pub fn new_in_memory() -> Result<Self> {
        let mut db = Self::open_in_memory()?;
        db.migrate_up(None)?;
        Ok(db)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // Foreign keys are off by default in SQLite and must be enabled per connection
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.ensure_bookkeeping()?;
        Ok(db)
    }

    /// Raw connection, for callers issuing their own queries.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
