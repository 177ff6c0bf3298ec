use rusqlite::{params, Connection};

use super::TuneStore;
use crate::error::{StoreContext, StoreError};
use crate::models::{StoredTune, TuneRecord};

/// `TuneStore` backed by the SQLite `tunes` table.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub(crate) fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl TuneStore for SqliteStore {
    fn clear(&mut self) -> Result<(), StoreError> {
        clear_tunes(&self.conn)
    }

    fn insert(&mut self, record: &TuneRecord) -> Result<i64, StoreError> {
        insert_tune(&self.conn, record)
    }

    fn scan_all(&self) -> Result<Vec<StoredTune>, StoreError> {
        fetch_all_tunes(&self.conn)
    }

    /// Clear and refill inside one transaction. If any statement fails the
    /// transaction is dropped and the previous rows survive.
    fn replace_all(&mut self, records: &[TuneRecord]) -> Result<usize, StoreError> {
        let tx = self
            .conn
            .transaction()
            .store_context("failed to begin load transaction")?;
        clear_tunes(&tx)?;
        for record in records {
            insert_tune(&tx, record)?;
        }
        tx.commit().store_context("failed to commit load transaction")?;
        Ok(records.len())
    }
}

/// Delete every tune row.
pub fn clear_tunes(conn: &Connection) -> Result<(), StoreError> {
    conn.execute("DELETE FROM tunes", [])
        .store_context("failed to clear tunes")?;
    Ok(())
}

/// Insert one tune and return its new id.
pub fn insert_tune(conn: &Connection, record: &TuneRecord) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO tunes (book_number, file_name, ref_number, title, tune_type, meter, key, abc_text)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.book_number,
            record.file_name,
            record.ref_number,
            record.title,
            record.tune_type,
            record.meter,
            record.key,
            record.abc_text,
        ],
    )
    .store_context("failed to insert tune")?;

    Ok(conn.last_insert_rowid())
}

/// Read the whole table back in id order.
pub fn fetch_all_tunes(conn: &Connection) -> Result<Vec<StoredTune>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, book_number, file_name, ref_number, title, tune_type, meter, key, abc_text
             FROM tunes
             ORDER BY id",
        )
        .store_context("failed to prepare tune query")?;

    let tunes = stmt
        .query_map([], |row| {
            Ok(StoredTune {
                id: row.get(0)?,
                record: TuneRecord {
                    book_number: row.get(1)?,
                    file_name: row.get(2)?,
                    ref_number: row.get(3)?,
                    title: row.get(4)?,
                    tune_type: row.get(5)?,
                    meter: row.get(6)?,
                    key: row.get(7)?,
                    abc_text: row.get(8)?,
                },
            })
        })
        .store_context("failed to load tunes")?
        .collect::<Result<Vec<_>, _>>()
        .store_context("failed to collect tunes")?;

    Ok(tunes)
}
