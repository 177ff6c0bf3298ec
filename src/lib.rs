//! Core library surface for the ABC tune loader.
//!
//! The pipeline runs leaf-first: `discovery` finds source files in numbered
//! book directories, `extractor` splits each file into tunes, and `loader`
//! swaps the result into a `db::TuneStore`.
pub mod config;
pub mod db;
pub mod discovery;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod models;

/// Convenience re-exports for the persistence layer.
pub use db::{open_in_memory, open_store, MemoryStore, SqliteStore, TuneStore};

pub use config::LoaderConfig;
pub use discovery::discover_tune_files;
pub use error::{DiscoveryError, ExtractError, LoadError, StoreError};
pub use extractor::{extract_file, extract_tunes};
pub use loader::{load_all_tunes, LoadReport, SkippedFile, TuneLibrary};

/// The domain types other layers pass around.
pub use models::{StoredTune, TuneFileDescriptor, TuneRecord};
