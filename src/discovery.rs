//! Locate ABC source files inside numbered book directories.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::DiscoveryError;
use crate::models::TuneFileDescriptor;

/// Walk `root` and return every file with the given extension whose immediate
/// parent is a digit-named directory below the root. The directory name
/// becomes the book number. Entries are visited in file-name order.
pub fn discover_tune_files(
    root: &Path,
    extension: &str,
) -> Result<Vec<TuneFileDescriptor>, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .min_depth(2)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| DiscoveryError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        if !is_source_candidate(&entry) || !has_extension(entry.path(), extension) {
            continue;
        }

        let Some(book_number) = entry.path().parent().and_then(book_number_of) else {
            continue;
        };

        files.push(TuneFileDescriptor {
            book_number,
            absolute_path: entry.path().to_path_buf(),
            file_name: entry.file_name().to_string_lossy().into_owned(),
        });
    }

    tracing::debug!(
        root = %root.display(),
        count = files.len(),
        "discovered tune files"
    );
    Ok(files)
}

/// Parse a directory's base name as a book number. Only non-empty, all-digit
/// names count.
fn book_number_of(dir: &Path) -> Option<u32> {
    let name = dir.file_name()?.to_str()?;
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match name.parse() {
        Ok(number) => Some(number),
        Err(_) => {
            tracing::warn!(dir = %dir.display(), "book number out of range, skipping");
            None
        }
    }
}

/// Regular files, plus symlinks that do not point at a directory. A dangling
/// link is kept so the failed read shows up in the load report.
fn is_source_candidate(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink() && !entry.path().is_dir()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
