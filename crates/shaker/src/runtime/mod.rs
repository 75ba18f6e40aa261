//! Platform runtime abstraction
//!
//! The scan and the pipeline never touch the filesystem directly; they go
//! through a [`Runtime`] so tests can substitute an in-memory tree.

pub mod native;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File or directory not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Other runtime error
    #[error("Runtime error: {0}")]
    Other(String),
}

/// Platform runtime trait
///
/// Directory listings skip hidden entries (names starting with `.`). Their
/// order is unspecified; the scanner sorts everything it keeps.
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file from the filesystem
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Write a file to the filesystem, creating parent directories.
    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Names of the immediate, non-hidden subdirectories of `path`.
    async fn list_dirs(&self, path: &Path) -> RuntimeResult<Vec<String>>;

    /// All non-hidden files below `path` (recursively) whose extension is
    /// one of `extensions`.
    async fn walk_files(&self, path: &Path, extensions: &[&str]) -> RuntimeResult<Vec<PathBuf>>;

    /// Read a file as UTF-8 text.
    async fn read_to_string(&self, path: &Path) -> RuntimeResult<String> {
        let bytes = self.read_file(path).await?;
        String::from_utf8(bytes)
            .map_err(|e| RuntimeError::Io(format!("{} is not valid UTF-8: {}", path.display(), e)))
    }
}

pub use native::NativeRuntime;
