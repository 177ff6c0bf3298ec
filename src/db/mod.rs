//! Persistence module split across logical submodules.

mod connection;
mod memory;
mod tunes;

pub use connection::{default_db_path, ensure_schema, open_in_memory, open_store};
pub use memory::MemoryStore;
pub use tunes::{clear_tunes, fetch_all_tunes, insert_tune, SqliteStore};

use crate::error::StoreError;
use crate::models::{StoredTune, TuneRecord};

/// The three operations a load needs from a backing store.
pub trait TuneStore {
    /// Delete every stored tune.
    fn clear(&mut self) -> Result<(), StoreError>;

    /// Append one tune, returning the id the store assigned to it.
    fn insert(&mut self, record: &TuneRecord) -> Result<i64, StoreError>;

    /// Full snapshot in insertion order.
    fn scan_all(&self) -> Result<Vec<StoredTune>, StoreError>;

    /// Replace the store contents with `records`. Clearing always happens
    /// before the first insert; stores that can do better override this to
    /// make the swap atomic.
    fn replace_all(&mut self, records: &[TuneRecord]) -> Result<usize, StoreError> {
        self.clear()?;
        for record in records {
            self.insert(record)?;
        }
        Ok(records.len())
    }
}
