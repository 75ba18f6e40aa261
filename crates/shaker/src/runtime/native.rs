//! Native Runtime Implementation
//!
//! Blocking `std::fs` and `walkdir` calls run on tokio's blocking pool via
//! `spawn_blocking`.

// NativeRuntime is platform-specific and wraps std::fs by design
#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::task;
use walkdir::{DirEntry, WalkDir};

use super::{Runtime, RuntimeError, RuntimeResult};

/// Native filesystem Runtime implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn not_found_or_io(path: &Path, action: &str, e: std::io::Error) -> RuntimeError {
    if e.kind() == std::io::ErrorKind::NotFound {
        RuntimeError::FileNotFound(path.to_path_buf())
    } else {
        RuntimeError::Io(format!("Failed to {} {}: {}", action, path.display(), e))
    }
}

fn join_error(e: task::JoinError) -> RuntimeError {
    RuntimeError::Other(format!("Task join error: {}", e))
}

#[async_trait]
impl Runtime for NativeRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        let path = path.to_path_buf();

        task::spawn_blocking(move || {
            std::fs::read(&path).map_err(|e| not_found_or_io(&path, "read", e))
        })
        .await
        .map_err(join_error)?
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        let path = path.to_path_buf();
        let content = content.to_vec();

        task::spawn_blocking(move || {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| not_found_or_io(parent, "create directory", e))?;
            }
            std::fs::write(&path, content).map_err(|e| not_found_or_io(&path, "write", e))
        })
        .await
        .map_err(join_error)?
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn list_dirs(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        let path = path.to_path_buf();

        task::spawn_blocking(move || {
            let entries =
                std::fs::read_dir(&path).map_err(|e| not_found_or_io(&path, "read directory", e))?;

            let mut dirs = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|e| {
                    RuntimeError::Io(format!("Failed to read directory entry: {}", e))
                })?;
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if let Some(name) = entry.file_name().to_str() {
                    if is_dir && !name.starts_with('.') {
                        dirs.push(name.to_string());
                    }
                }
            }

            dirs.sort();
            Ok(dirs)
        })
        .await
        .map_err(join_error)?
    }

    async fn walk_files(&self, path: &Path, extensions: &[&str]) -> RuntimeResult<Vec<PathBuf>> {
        let root = path.to_path_buf();
        let extensions: Vec<String> = extensions.iter().map(|e| e.to_string()).collect();

        task::spawn_blocking(move || {
            if !root.is_dir() {
                return Err(RuntimeError::FileNotFound(root));
            }

            let mut files = Vec::new();
            let walker = WalkDir::new(&root)
                .follow_links(false)
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

            for entry in walker {
                let entry = entry.map_err(|e| {
                    RuntimeError::Io(format!("Failed to walk {}: {}", root.display(), e))
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let keep = entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext));
                if keep {
                    files.push(entry.into_path());
                }
            }

            files.sort();
            Ok(files)
        })
        .await
        .map_err(join_error)?
    }
}
