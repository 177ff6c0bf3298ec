//! Full reload of the tune store from a book tree.
//!
//! Discovery and extraction run first, entirely in memory, so a missing root
//! aborts before anything is deleted. Only then is the store cleared and
//! refilled. Files that cannot be read are skipped and listed in the report.

use std::fmt;
use std::path::PathBuf;

use crate::config::LoaderConfig;
use crate::db::TuneStore;
use crate::discovery::discover_tune_files;
use crate::error::{LoadError, StoreError};
use crate::extractor::extract_file;
use crate::models::{StoredTune, TuneRecord};

/// A source file left out of a load, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub files_scanned: usize,
    pub tunes_loaded: usize,
    pub skipped: Vec<SkippedFile>,
}

impl LoadReport {
    /// True when every discovered file made it into the store.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loaded {} tunes from {} files",
            self.tunes_loaded,
            self.files_scanned.saturating_sub(self.skipped.len())
        )?;
        if !self.skipped.is_empty() {
            write!(f, "; skipped {} files:", self.skipped.len())?;
            for skipped in &self.skipped {
                write!(f, "\n  {}: {}", skipped.path.display(), skipped.reason)?;
            }
        }
        Ok(())
    }
}

/// Read every tune under `config.root` and replace the store contents with
/// them.
pub fn load_all_tunes<S: TuneStore + ?Sized>(
    store: &mut S,
    config: &LoaderConfig,
) -> Result<LoadReport, LoadError> {
    let files = discover_tune_files(&config.root, &config.extension)?;

    let mut report = LoadReport {
        files_scanned: files.len(),
        ..LoadReport::default()
    };
    let mut records: Vec<TuneRecord> = Vec::new();

    for file in &files {
        match extract_file(file) {
            Ok(tunes) => records.extend(tunes),
            Err(err) => {
                let reason = error_chain(&err);
                tracing::warn!(file = %err.path().display(), %reason, "skipping unreadable file");
                report.skipped.push(SkippedFile {
                    path: err.path().to_path_buf(),
                    reason,
                });
            }
        }
    }

    report.tunes_loaded = store.replace_all(&records)?;
    tracing::info!(
        tunes = report.tunes_loaded,
        files = report.files_scanned,
        skipped = report.skipped.len(),
        "tune load finished"
    );
    Ok(report)
}

/// Render an error and its sources on one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Owns the store for the lifetime of the process and is handed to whatever
/// needs to reload or read the tune set.
#[derive(Debug)]
pub struct TuneLibrary<S: TuneStore> {
    store: S,
}

impl<S: TuneStore> TuneLibrary<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn reload(&mut self, config: &LoaderConfig) -> Result<LoadReport, LoadError> {
        load_all_tunes(&mut self.store, config)
    }

    pub fn snapshot(&self) -> Result<Vec<StoredTune>, StoreError> {
        self.store.scan_all()
    }
}
