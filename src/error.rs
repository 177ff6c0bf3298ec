//! Error types for each stage of a load. Discovery and store failures abort
//! the whole load, extraction failures only cost the file they came from.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Walking the book tree failed. Raised before the store is touched.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("tune root not found: {0}")]
    NotFound(PathBuf),

    #[error("tune root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to walk {path}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// One source file could not be read in full.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl ExtractError {
    pub fn path(&self) -> &Path {
        match self {
            ExtractError::Io { path, .. } | ExtractError::Decode { path, .. } => path,
        }
    }
}

/// The backing store rejected a read or write.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{context}")]
    Sqlite {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create data directory {path}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Attach a short description to a rusqlite failure, the same way the
/// persistence layer would use `anyhow::Context`.
pub(crate) trait StoreContext<T> {
    fn store_context(self, context: &'static str) -> Result<T, StoreError>;
}

impl<T> StoreContext<T> for Result<T, rusqlite::Error> {
    fn store_context(self, context: &'static str) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Sqlite { context, source })
    }
}

/// Fatal outcome of a whole load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("tune discovery failed")]
    Discovery(#[from] DiscoveryError),

    #[error("store write failed, no new tunes were committed")]
    Store(#[from] StoreError),
}
