//! Filesystem access used by the locator and the file renderer.
//!
//! All disk access goes through the [`FileSystem`] trait so a site can be
//! pointed at an instrumented or in-memory implementation. [`OsFileSystem`]
//! is the real thing: glob expansion via the `glob` crate, reads via `std::fs`.

use std::path::{Path, PathBuf};

/// Filesystem operations needed to resolve and read templates.
pub trait FileSystem: Send + Sync {
    /// Expands a glob pattern into matching paths.
    ///
    /// Results are in the order the implementation produces them; for
    /// [`OsFileSystem`] that is alphabetical within each directory.
    /// An invalid pattern yields no matches.
    fn glob(&self, pattern: &str) -> Vec<PathBuf>;

    /// Returns true if `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Reads the whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// [`FileSystem`] backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn glob(&self, pattern: &str) -> Vec<PathBuf> {
        match glob::glob(pattern) {
            Ok(paths) => paths.filter_map(Result::ok).collect(),
            Err(err) => {
                tracing::debug!(pattern, error = %err, "invalid glob pattern");
                Vec::new()
            }
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Escapes glob metacharacters in a path so it matches only itself.
pub fn escape_glob(path: &Path) -> String {
    glob::Pattern::escape(&path.to_string_lossy())
}
