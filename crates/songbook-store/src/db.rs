//! Database connection management
//!
//! Opening and configuring the single long-lived SQLite connection that
//! callers pass into every mapper operation.

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
///
/// ## Errors
///
/// - `StoreUnavailable`: the file cannot be opened or created
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening sqlite database");
    let conn = Connection::open(path).map_err(|e| from_rusqlite("open", e))?;
    configure(&conn)?;
    Ok(conn)
}

/// Open an in-memory SQLite database (for testing)
///
/// ## Errors
///
/// - `Persistence`: SQLite could not allocate or configure the database
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(|e| from_rusqlite("open", e))?;
    configure(&conn)?;
    Ok(conn)
}

/// Configure a connection with the settings every Songbook connection uses
///
/// ## Errors
///
/// - `StoreUnavailable`: the journal mode cannot be switched (locked or read-only file)
/// - `Persistence`: any other SQLite failure
pub fn configure(conn: &Connection) -> Result<()> {
    // In-memory databases answer "memory" and stay that way
    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(|e| from_rusqlite("configure", e))?;
    tracing::debug!(journal_mode = %mode, "sqlite connection configured");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use songbook_core::ExErrorKind;

    #[test]
    fn test_open_in_memory_keeps_memory_journal() {
        let conn = open_in_memory().unwrap();
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "memory");
    }

    #[test]
    fn test_open_file_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open(dir.path().join("music.db")).unwrap();
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_open_missing_directory_is_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("music.db");

        let err = open(path).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::StoreUnavailable);
        assert_eq!(err.op(), Some("open"));
    }
}
