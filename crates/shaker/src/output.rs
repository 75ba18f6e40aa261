//! The `shaker-meta.json` result document.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::flatten::FlatFiles;
use crate::result::{BundledAction, ShakenComponent};
use crate::selector::canonicalize;

pub const META_FILE: &str = "shaker-meta.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMeta {
    pub files: FlatFiles,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppActionMeta {
    pub files: FlatFiles,
    pub dependencies: Vec<String>,
    pub mojits: Vec<String>,
}

/// Per application action and per component action, concrete selector to
/// files, plus the canonical selector set across all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShakerMeta {
    pub app: IndexMap<String, AppActionMeta>,
    pub mojits: IndexMap<String, IndexMap<String, ActionMeta>>,
    pub selectors: Vec<String>,
}

impl ShakerMeta {
    pub fn new(
        app: IndexMap<String, BundledAction>,
        components: &IndexMap<String, Arc<ShakenComponent>>,
    ) -> Self {
        let mojits: IndexMap<String, IndexMap<String, ActionMeta>> = components
            .iter()
            .map(|(name, component)| {
                let actions = component
                    .actions
                    .iter()
                    .map(|(action, shaken)| {
                        let meta = ActionMeta {
                            files: shaken.files.clone(),
                            dependencies: shaken.dependencies.clone(),
                        };
                        (action.clone(), meta)
                    })
                    .collect();
                (name.clone(), actions)
            })
            .collect();

        let app: IndexMap<String, AppActionMeta> = app
            .into_iter()
            .map(|(action, bundled)| {
                let meta = AppActionMeta {
                    files: bundled.files,
                    dependencies: bundled.dependencies,
                    mojits: bundled.mojits,
                };
                (action, meta)
            })
            .collect();

        let produced = mojits
            .values()
            .flat_map(|actions| actions.values())
            .flat_map(|action| action.files.keys())
            .chain(app.values().flat_map(|action| action.files.keys()))
            .cloned();
        let selectors = canonicalize(produced);

        Self {
            app,
            mojits,
            selectors,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ShakenAction;
    use shaker_config::{ComponentConfig, FacetOrder};

    #[test]
    fn document_shape_and_selectors() {
        let mut files = FlatFiles::new();
        files.insert("common-index".to_string(), vec!["a.css".to_string()]);
        files.insert("common-index-mobile".to_string(), vec!["a.css".to_string(), "m.css".to_string()]);

        let mut actions = IndexMap::new();
        actions.insert(
            "index".to_string(),
            ShakenAction {
                files: files.clone(),
                dependencies: vec![],
                dimensions: Default::default(),
                order: FacetOrder::default(),
            },
        );
        let mut components = IndexMap::new();
        components.insert(
            "Header".to_string(),
            Arc::new(ShakenComponent {
                name: "Header".to_string(),
                root: "mojits/Header".to_string(),
                config: ComponentConfig::default(),
                actions,
            }),
        );

        let mut app = IndexMap::new();
        app.insert(
            "index".to_string(),
            BundledAction {
                files,
                dependencies: vec![],
                mojits: vec!["Header".to_string()],
            },
        );

        let meta = ShakerMeta::new(app, &components);
        assert_eq!(meta.selectors, vec!["common-index-mobile"]);

        let json: serde_json::Value = serde_json::from_str(&meta.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["app"]["index"]["mojits"], serde_json::json!(["Header"]));
        assert_eq!(
            json["mojits"]["Header"]["index"]["files"]["common-index"],
            serde_json::json!(["a.css"])
        );
        assert_eq!(ShakerMeta::from_json(&meta.to_json_pretty().unwrap()).unwrap(), meta);
    }
}
