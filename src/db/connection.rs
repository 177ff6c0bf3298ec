use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::Connection;

use super::SqliteStore;
use crate::error::{StoreContext, StoreError};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".abc-tunes";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "tunes.sqlite";

/// Open (creating if needed) the tune database at `path` and make sure the
/// `tunes` table exists.
pub fn open_store(path: &Path) -> Result<SqliteStore, StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::DataDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(path).store_context("failed to open SQLite database")?;
    ensure_schema(&conn)?;
    tracing::debug!(db = %path.display(), "opened tune store");
    Ok(SqliteStore::new(conn))
}

/// Throwaway database that lives as long as the returned store.
pub fn open_in_memory() -> Result<SqliteStore, StoreError> {
    let conn = Connection::open_in_memory().store_context("failed to open in-memory database")?;
    ensure_schema(&conn)?;
    Ok(SqliteStore::new(conn))
}

/// Create the `tunes` table if it is missing. The column order is what
/// downstream readers rely on.
pub fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tunes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_number INTEGER NOT NULL,
            file_name TEXT NOT NULL,
            ref_number TEXT NOT NULL,
            title TEXT NOT NULL DEFAULT '',
            tune_type TEXT NOT NULL DEFAULT '',
            meter TEXT NOT NULL DEFAULT '',
            key TEXT NOT NULL DEFAULT '',
            abc_text TEXT NOT NULL DEFAULT ''
        )",
        [],
    )
    .store_context("failed to create tunes table")?;
    Ok(())
}

/// Resolve the default database location inside the user's home.
pub fn default_db_path() -> Option<PathBuf> {
    let base_dirs = BaseDirs::new()?;
    Some(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
