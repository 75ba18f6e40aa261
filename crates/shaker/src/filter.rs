//! Selecting the scanned files that belong to one variant.

use tracing::trace;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::paths::join_rel;

/// Entries without an extension are folder fragments.
fn is_folder_fragment(entry: &str) -> bool {
    let last = entry.rsplit('/').next().unwrap_or(entry);
    !last.contains('.')
}

/// Pick the files of `assets` that `spec` names.
///
/// Every asset containing any folder fragment is returned first, in asset
/// order. Then, for each explicit filename, `<component_root>/assets/<name>`
/// is appended when the scan saw it; otherwise a missing-resource
/// diagnostic is recorded. Nothing is de-duplicated.
pub fn filter_resources(
    spec: &[String],
    assets: &[String],
    component: &str,
    component_root: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<String> {
    let (folders, files): (Vec<&String>, Vec<&String>) =
        spec.iter().partition(|entry| is_folder_fragment(entry));

    let mut selected: Vec<String> = assets
        .iter()
        .filter(|asset| folders.iter().any(|folder| asset.contains(folder.as_str())))
        .cloned()
        .collect();

    for file in files {
        let path = join_rel(&join_rel(component_root, "assets"), file);
        if assets.iter().any(|asset| asset == &path) {
            trace!(component, path = %path, "explicit include");
            selected.push(path);
        } else {
            diagnostics.push(Diagnostic::missing_resource(component, path));
        }
    }

    selected
}
