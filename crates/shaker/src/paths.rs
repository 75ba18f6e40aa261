//! App-relative path strings.
//!
//! Every path the engine handles is relative to the application root and
//! uses `/` separators, regardless of platform.

use std::path::Path;

/// Join two relative paths. An empty base is the app root.
pub fn join_rel(base: &str, child: &str) -> String {
    let base = base.trim_end_matches('/');
    let child = child.trim_start_matches('/');
    if base.is_empty() {
        child.to_string()
    } else if child.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{child}")
    }
}

/// A folder fragment for `dir`, with a trailing separator so `mobile/` does
/// not also match `mobile2/`.
pub fn folder(dir: &str) -> String {
    format!("{}/", dir.trim_end_matches('/'))
}

/// `path` relative to `root` with `/` separators, or `None` if it lies
/// outside `root`.
pub fn relative_to(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// File stem of a relative path, e.g. `login` for `binders/login.js`.
pub fn stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}
