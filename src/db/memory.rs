use super::TuneStore;
use crate::error::StoreError;
use crate::models::{StoredTune, TuneRecord};

/// Vector-backed store. Ids keep counting up across clears, like the SQLite
/// autoincrement column.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<StoredTune>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TuneStore for MemoryStore {
    fn clear(&mut self) -> Result<(), StoreError> {
        self.rows.clear();
        Ok(())
    }

    fn insert(&mut self, record: &TuneRecord) -> Result<i64, StoreError> {
        self.next_id += 1;
        self.rows.push(StoredTune {
            id: self.next_id,
            record: record.clone(),
        });
        Ok(self.next_id)
    }

    fn scan_all(&self) -> Result<Vec<StoredTune>, StoreError> {
        Ok(self.rows.clone())
    }
}
