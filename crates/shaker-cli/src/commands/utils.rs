//! Shared utilities for command implementations.

use crate::config::{SettingsOverrides, ShakerSettings};
use crate::error::{BuildError, CliError, Result};
use shaker::{NativeRuntime, Runtime, Shaker};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolve a path relative to a working directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {}", e),
        ))
    })
}

/// Fail unless `root` is an existing directory.
pub fn validate_root(root: &Path) -> Result<()> {
    if !root.is_dir() {
        return Err(BuildError::RootNotFound(root.to_path_buf()).into());
    }
    Ok(())
}

/// Load settings and build the engine for them.
pub fn prepare_shaker(
    overrides: &SettingsOverrides,
    config_path: Option<&Path>,
) -> Result<(ShakerSettings, Shaker, Arc<dyn Runtime>)> {
    let cwd = get_cwd()?;
    let settings = ShakerSettings::load(overrides, config_path, &cwd)?;
    validate_root(&settings.root)?;

    let runtime: Arc<dyn Runtime> = Arc::new(NativeRuntime::new());
    let shaker = Shaker::new(&settings.root, Arc::clone(&runtime)).with_options(settings.shake_options()?);
    Ok((settings, shaker, runtime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_path_relative() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(Path::new("app"), cwd), PathBuf::from("/work/app"));
        assert_eq!(resolve_path(Path::new("/abs"), cwd), PathBuf::from("/abs"));
    }

    #[test]
    fn test_validate_root() {
        let temp = TempDir::new().unwrap();
        assert!(validate_root(temp.path()).is_ok());

        let err = validate_root(&temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, CliError::Build(BuildError::RootNotFound(_))));
    }
}
