//! SQLite database layer shared by the credential store and the activity log
//!
//! Every operation opens its own connection, runs and closes. The handle
//! itself only carries the file location, so it is cheap to clone.

use crate::error::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// How long a connection waits on another process holding the write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open or create the database at the given path and bring the schema up to date
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Self { path };
        db.migrate()?;
        Ok(db)
    }

    /// Fresh connection for a single operation
    pub fn connect(&self) -> Result<Connection> {
        debug!(path = %self.path.display(), "opening database connection");
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    fn migrate(&self) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        tx.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            )",
            [],
        )?;

        let current_version: i32 = tx.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )?;

        if current_version < 1 {
            migrate_v1(&tx)?;
        }

        tx.commit()?;
        debug!(version = SCHEMA_VERSION, "database schema ready");
        Ok(())
    }
}

/// Schema version 1. Table layouts match databases written by earlier
/// releases, hence `IF NOT EXISTS` on every statement.
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            username TEXT PRIMARY KEY,
            password TEXT
        );

        CREATE TABLE IF NOT EXISTS recent_files (
            file_path TEXT,
            action TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_recent_files_created_at ON recent_files(created_at DESC);

        INSERT OR REPLACE INTO schema_version (version) VALUES (1);
        "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn table_names(db: &Database) -> Vec<String> {
        let conn = db.connect().unwrap();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<Vec<String>>>()
            .unwrap()
    }

    #[test]
    fn open_creates_schema_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("users.db");
        let db = Database::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(
            table_names(&db),
            vec!["recent_files", "schema_version", "users"]
        );
    }

    #[test]
    fn reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.db");
        Database::open(&path).unwrap();
        let db = Database::open(&path).unwrap();
        let conn = db.connect().unwrap();
        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[test]
    fn adopts_database_created_without_version_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE users (username TEXT PRIMARY KEY, password TEXT);
                 CREATE TABLE recent_files (file_path TEXT, action TEXT,
                     created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP);
                 INSERT INTO users VALUES ('old', 'abc');",
            )
            .unwrap();
        }
        let db = Database::open(&path).unwrap();
        let conn = db.connect().unwrap();
        let name: String = conn
            .query_row("SELECT username FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "old");
    }
}
