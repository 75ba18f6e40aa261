//! Resource scanning.
//!
//! Turns a component directory into the flat, sorted file lists the engine
//! consumes. The three categories are scanned concurrently and joined.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shaker_config::{ApplicationConfig, Facet};
use tracing::{debug, trace};

use crate::paths::{join_rel, relative_to, stem};
use crate::runtime::{Runtime, RuntimeError, RuntimeResult};

/// Only scripts and stylesheets are shipped.
pub const RESOURCE_EXTENSIONS: [&str; 2] = ["js", "css"];

pub const ASSETS_DIR: &str = "assets";
pub const AUTOLOAD_DIR: &str = "autoload";
pub const BINDERS_DIR: &str = "binders";

/// Everything the scan found for one component. Paths are app-relative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentResources {
    pub assets: Vec<String>,
    pub autoload: Vec<String>,
    pub binders: Vec<String>,
    /// Facets whose `assets/<facet>` directory exists, with their variant
    /// subdirectories. `common` is never listed.
    pub facet_dirs: IndexMap<Facet, Vec<String>>,
}

impl ComponentResources {
    /// Whether `facet` belongs in the dimension tree. `common` always does.
    pub fn has_facet(&self, facet: Facet) -> bool {
        facet == Facet::Common || self.facet_dirs.contains_key(&facet)
    }

    /// Action names derived from binder scripts.
    pub fn binder_actions(&self) -> impl Iterator<Item = &str> {
        self.binders
            .iter()
            .filter(|path| path.ends_with(".js"))
            .map(|path| stem(path))
    }

    /// Path of the binder script for `action`, if one was scanned.
    pub fn binder_for(&self, action: &str) -> Option<&str> {
        self.binders
            .iter()
            .find(|path| path.ends_with(".js") && stem(path) == action)
            .map(String::as_str)
    }
}

/// Scan `<app_root>/<component_root>`.
///
/// A missing category directory yields an empty list. Any other runtime
/// failure fails the whole component.
pub async fn scan_component(
    runtime: &dyn Runtime,
    app_root: &Path,
    component_root: &str,
) -> RuntimeResult<ComponentResources> {
    let (assets, autoload, binders, facet_dirs) = tokio::join!(
        scan_category(runtime, app_root, component_root, ASSETS_DIR),
        scan_category(runtime, app_root, component_root, AUTOLOAD_DIR),
        scan_category(runtime, app_root, component_root, BINDERS_DIR),
        scan_facet_dirs(runtime, app_root, component_root),
    );

    let resources = ComponentResources {
        assets: assets?,
        autoload: autoload?,
        binders: binders?,
        facet_dirs: facet_dirs?,
    };

    debug!(
        component = component_root,
        assets = resources.assets.len(),
        autoload = resources.autoload.len(),
        binders = resources.binders.len(),
        "scanned component"
    );
    Ok(resources)
}

async fn scan_category(
    runtime: &dyn Runtime,
    app_root: &Path,
    component_root: &str,
    category: &str,
) -> RuntimeResult<Vec<String>> {
    let dir = app_root.join(join_rel(component_root, category));
    let files = match runtime.walk_files(&dir, &RESOURCE_EXTENSIONS).await {
        Ok(files) => files,
        Err(RuntimeError::FileNotFound(_)) => {
            trace!(dir = %dir.display(), "category directory missing");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut relative: Vec<String> = files
        .iter()
        .filter_map(|path| relative_to(app_root, path))
        .collect();
    relative.sort();
    Ok(relative)
}

async fn scan_facet_dirs(
    runtime: &dyn Runtime,
    app_root: &Path,
    component_root: &str,
) -> RuntimeResult<IndexMap<Facet, Vec<String>>> {
    let assets = app_root.join(join_rel(component_root, ASSETS_DIR));
    let mut facet_dirs = IndexMap::new();

    for facet in Facet::ALL.into_iter().filter(|f| *f != Facet::Common) {
        let dir = assets.join(facet.as_str());
        match runtime.list_dirs(&dir).await {
            Ok(mut variants) => {
                variants.sort();
                facet_dirs.insert(facet, variants);
            }
            Err(RuntimeError::FileNotFound(_)) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(facet_dirs)
}

/// Components of the application: every non-hidden directory under each
/// component directory, keyed by name and sorted. A name found in several
/// directories resolves to the last one.
pub async fn discover_components(
    runtime: &dyn Runtime,
    app_root: &Path,
    config: &ApplicationConfig,
) -> RuntimeResult<IndexMap<String, String>> {
    let mut found = Vec::new();

    for dir in &config.component_dirs {
        match runtime.list_dirs(&app_root.join(dir)).await {
            Ok(names) => {
                found.extend(names.into_iter().map(|name| {
                    let root = join_rel(dir, &name);
                    (name, root)
                }));
            }
            Err(RuntimeError::FileNotFound(_)) => {
                debug!(dir = %dir, "component directory missing");
            }
            Err(e) => return Err(e),
        }
    }

    let mut components = IndexMap::new();
    for (name, root) in found {
        if let Some(previous) = components.insert(name.clone(), root) {
            debug!(component = %name, shadowed = %previous, "component defined twice");
        }
    }
    components.sort_keys();
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryRuntime;

    #[tokio::test]
    async fn scan_lists_categories_and_facets() {
        let runtime = MemoryRuntime::new("/app")
            .with_file("mojits/A/assets/common/b.css", "")
            .with_file("mojits/A/assets/common/a.css", "")
            .with_file("mojits/A/assets/device/mobile/m.css", "")
            .with_file("mojits/A/assets/device/desktop/d.png", "")
            .with_file("mojits/A/autoload/utils.js", "")
            .with_file("mojits/A/binders/login.js", "")
            .with_file("mojits/A/binders/index.js", "");

        let resources = scan_component(&runtime, Path::new("/app"), "mojits/A")
            .await
            .unwrap();

        assert_eq!(
            resources.assets,
            vec![
                "mojits/A/assets/common/a.css",
                "mojits/A/assets/common/b.css",
                "mojits/A/assets/device/mobile/m.css",
            ]
        );
        assert_eq!(resources.autoload, vec!["mojits/A/autoload/utils.js"]);
        assert_eq!(resources.binder_actions().collect::<Vec<_>>(), vec!["index", "login"]);
        assert_eq!(resources.binder_for("login"), Some("mojits/A/binders/login.js"));
        assert_eq!(
            resources.facet_dirs.get(&Facet::Device),
            Some(&vec!["desktop".to_string(), "mobile".to_string()])
        );
        assert!(resources.has_facet(Facet::Common));
        assert!(!resources.has_facet(Facet::Skin));
    }

    #[tokio::test]
    async fn missing_categories_are_empty() {
        let runtime = MemoryRuntime::new("/app").with_file("mojits/A/assets/common/a.css", "");
        let resources = scan_component(&runtime, Path::new("/app"), "mojits/A")
            .await
            .unwrap();
        assert!(resources.autoload.is_empty());
        assert!(resources.binders.is_empty());
        assert!(resources.facet_dirs.is_empty());
    }

    #[tokio::test]
    async fn failing_category_fails_the_component() {
        let runtime = MemoryRuntime::new("/app")
            .with_file("mojits/A/autoload/u.js", "")
            .failing_under("mojits/A/autoload");
        let err = scan_component(&runtime, Path::new("/app"), "mojits/A")
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Io(_)));
    }

    #[tokio::test]
    async fn discovery_sorts_and_skips_hidden() {
        let runtime = MemoryRuntime::new("/app")
            .with_file("mojits/Zeta/binders/index.js", "")
            .with_file("mojits/Alpha/assets/common/a.css", "")
            .with_file("mojits/.svn/entries.js", "")
            .with_file("widgets/Beta/autoload/b.js", "");

        let config = ApplicationConfig {
            component_dirs: vec!["mojits".into(), "widgets".into(), "missing".into()],
        };
        let components = discover_components(&runtime, Path::new("/app"), &config)
            .await
            .unwrap();

        assert_eq!(
            components.into_iter().collect::<Vec<_>>(),
            vec![
                ("Alpha".to_string(), "mojits/Alpha".to_string()),
                ("Beta".to_string(), "widgets/Beta".to_string()),
                ("Zeta".to_string(), "mojits/Zeta".to_string()),
            ]
        );
    }
}
