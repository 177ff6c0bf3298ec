//! Domain models that mirror the `tunes` table. They stay plain data holders
//! so discovery, extraction and persistence can hand them to each other
//! without any behaviour attached.

use std::path::PathBuf;

/// One tune pulled out of an ABC source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TuneRecord {
    /// Numeric name of the book directory the file sits in.
    pub book_number: u32,
    /// Base name of the source file, not the full path.
    pub file_name: String,
    /// Raw text after `X:`. Kept as a string because reference numbers found
    /// in real collections are not always numeric.
    pub ref_number: String,
    /// Value of the `T:` header, empty when the tune has none.
    pub title: String,
    /// Value of the `R:` (rhythm) header.
    pub tune_type: String,
    /// Value of the `M:` header, e.g. `6/8`.
    pub meter: String,
    /// Value of the `K:` header, e.g. `Ador`.
    pub key: String,
    /// Every non-header line of the tune, newline-joined in file order.
    pub abc_text: String,
}

/// A persisted tune together with the surrogate id the store assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTune {
    pub id: i64,
    pub record: TuneRecord,
}

/// A source file found during discovery. Lives only for the duration of a
/// load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuneFileDescriptor {
    pub book_number: u32,
    pub absolute_path: PathBuf,
    pub file_name: String,
}
