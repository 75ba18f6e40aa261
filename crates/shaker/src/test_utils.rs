//! Test utilities for shaker.
//!
//! [`MemoryRuntime`] holds an application tree in memory so pipeline tests
//! do not need a temporary directory. Directories exist implicitly: a path is
//! a directory when some file lives below it.
//!
//! Listings come back in insertion order, not sorted, which makes it easy to
//! check that nothing downstream depends on traversal order.

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::path::{Component, Path, PathBuf};

use crate::runtime::{Runtime, RuntimeError, RuntimeResult};

/// In-memory [`Runtime`].
///
/// ```ignore
/// use shaker::test_utils::MemoryRuntime;
///
/// let runtime = MemoryRuntime::new("/app")
///     .with_file("mojits/Header/assets/common/header.css", "")
///     .with_file("mojits/Header/binders/index.js", "YUI.add('index', function () {});");
/// ```
#[derive(Debug, Default)]
pub struct MemoryRuntime {
    root: PathBuf,
    files: RwLock<IndexMap<PathBuf, Vec<u8>>>,
    failing: Vec<PathBuf>,
}

impl MemoryRuntime {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Add a file at `path`, relative to the root.
    pub fn with_file(self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.files
            .write()
            .insert(self.root.join(path), content.as_ref().to_vec());
        self
    }

    /// Every operation on a path below `path` (relative to the root) fails
    /// with an I/O error.
    pub fn failing_under(mut self, path: &str) -> Self {
        self.failing.push(self.root.join(path));
        self
    }

    /// Snapshot of a file's content, for assertions on written output.
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().get(path).cloned()
    }

    fn check(&self, path: &Path) -> RuntimeResult<()> {
        if self.failing.iter().any(|prefix| path.starts_with(prefix)) {
            return Err(RuntimeError::Io(format!(
                "simulated failure reading {}",
                path.display()
            )));
        }
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .read()
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }
}

fn is_hidden(component: &Component<'_>) -> bool {
    component
        .as_os_str()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

#[async_trait]
impl Runtime for MemoryRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.check(path)?;
        self.files
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        self.check(path)?;
        self.files
            .write()
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().contains_key(path) || self.is_dir(path)
    }

    async fn list_dirs(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        self.check(path)?;
        if !self.is_dir(path) {
            return Err(RuntimeError::FileNotFound(path.to_path_buf()));
        }

        let mut dirs: Vec<String> = Vec::new();
        for file in self.files.read().keys() {
            let Ok(relative) = file.strip_prefix(path) else {
                continue;
            };
            let mut components = relative.components();
            let (Some(first), Some(_)) = (components.next(), components.next()) else {
                continue;
            };
            if is_hidden(&first) {
                continue;
            }
            let name = first.as_os_str().to_string_lossy().into_owned();
            if !dirs.contains(&name) {
                dirs.push(name);
            }
        }
        Ok(dirs)
    }

    async fn walk_files(&self, path: &Path, extensions: &[&str]) -> RuntimeResult<Vec<PathBuf>> {
        self.check(path)?;
        if !self.is_dir(path) {
            return Err(RuntimeError::FileNotFound(path.to_path_buf()));
        }

        let files = self
            .files
            .read()
            .keys()
            .filter(|file| {
                file.strip_prefix(path)
                    .is_ok_and(|relative| !relative.components().any(|c| is_hidden(&c)))
            })
            .filter(|file| {
                file.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| extensions.contains(&ext))
            })
            .cloned()
            .collect();
        Ok(files)
    }
}
