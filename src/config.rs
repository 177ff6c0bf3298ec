//! Load settings shared by the library and the command-line front end.

use std::path::PathBuf;

/// Root directory scanned when none is given.
pub const DEFAULT_ROOT: &str = "abc_books";
/// Extension of ABC source files, compared without regard to ASCII case.
pub const DEFAULT_EXTENSION: &str = "abc";

/// Where to look for tunes during a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub root: PathBuf,
    pub extension: String,
}

impl LoaderConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_drops_leading_dot() {
        let config = LoaderConfig::new("books").with_extension(".ABC");
        assert_eq!(config.extension, "ABC");
        assert_eq!(LoaderConfig::default().root, PathBuf::from(DEFAULT_ROOT));
    }
}
