//! SQLite-backed database handle
//!
//! The pool is capped at a single connection: every request shares one
//! long-lived handle and SQLite serializes the statements.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use crate::error::StorageError;

pub type DbConn = PooledConnection<SqliteConnectionManager>;

pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open (or create) the database at `url` and make sure the schema exists.
    ///
    /// Accepts a plain file path, a `sqlite://` or `sqlite:` prefixed path,
    /// or `:memory:`.
    pub fn new(url: &str) -> Result<Self, StorageError> {
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);

        if path == ":memory:" {
            return Self::in_memory();
        }

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Self::with_manager(SqliteConnectionManager::file(path))
    }

    /// An isolated in-memory database. Lives as long as the handle.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::with_manager(SqliteConnectionManager::memory())
    }

    fn with_manager(manager: SqliteConnectionManager) -> Result<Self, StorageError> {
        // No idle timeout or max lifetime: recycling the only connection would
        // wipe an in-memory database.
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?;

        let db = Self { pool };
        db.init_tables()?;
        Ok(db)
    }

    /// Check out the shared connection
    pub fn conn(&self) -> Result<DbConn, StorageError> {
        Ok(self.pool.get()?)
    }

    fn init_tables(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS notes (
                note_id INTEGER PRIMARY KEY AUTOINCREMENT,
                note_body TEXT NOT NULL,
                position_x REAL NOT NULL DEFAULT 0,
                position_y REAL NOT NULL DEFAULT 0
            )",
            [],
        )?;
        Ok(())
    }

    /// Round-trip a trivial query to prove the store is reachable
    pub fn ping(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_in_memory_database_is_usable() {
        let db = Database::in_memory().expect("Failed to open database");
        db.ping().expect("ping failed");
    }

    #[test]
    fn test_new_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("notes.db");

        let db = Database::new(db_path.to_str().unwrap()).expect("Failed to open database");
        db.ping().unwrap();
        assert!(db_path.exists());
    }

    #[test]
    fn test_sqlite_url_prefix_is_stripped() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("prefixed.db");
        let url = format!("sqlite://{}", db_path.display());

        Database::new(&url).expect("Failed to open database");
        assert!(db_path.exists());
    }

    #[test]
    fn test_notes_survive_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("notes.db");
        let path = db_path.to_str().unwrap();

        {
            let db = Database::new(path).unwrap();
            db.create_note("persisted").unwrap();
        }

        let db = Database::new(path).unwrap();
        let notes = db.list_notes().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].note_body, "persisted");
    }
}
