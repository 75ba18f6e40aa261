//! Dimension tree construction for one component.

use shaker_config::{ComponentConfig, DimensionSpec, Facet};
use tracing::{debug, trace};

use crate::diagnostics::Diagnostics;
use crate::dimension::{DimensionNode, DimensionTree};
use crate::filter::filter_resources;
use crate::paths::{folder, join_rel};
use crate::scan::ComponentResources;
use crate::stages::ResourceStage;

/// Builds a component's [`DimensionTree`] from its layered configuration
/// and scanned resources.
///
/// - `common` is always present.
/// - Any other facet is present only when `assets/<facet>` exists. For
///   `action`, an explicit `include` on any action also keeps it.
/// - A spec without variants becomes a leaf holding the files under its
///   folder plus its explicit includes.
pub struct TreeBuilder<'a> {
    component: &'a str,
    root: &'a str,
    resources: &'a ComponentResources,
    stage: &'a dyn ResourceStage,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(
        component: &'a str,
        root: &'a str,
        resources: &'a ComponentResources,
        stage: &'a dyn ResourceStage,
    ) -> Self {
        Self {
            component,
            root,
            resources,
            stage,
        }
    }

    pub fn build(&self, config: &ComponentConfig, diagnostics: &mut Diagnostics) -> DimensionTree {
        let assets_dir = join_rel(self.root, "assets");
        let mut tree = DimensionTree::new();

        for facet in Facet::ALL {
            let spec = match facet {
                Facet::Common => config.dimension(facet).cloned().unwrap_or_default(),
                Facet::Action => {
                    let explicit = config.actions.values().any(|a| a.include.is_some());
                    if !self.resources.has_facet(facet) && !explicit {
                        debug!(component = self.component, "no action assets, action facet dropped");
                        continue;
                    }
                    self.action_spec(config)
                }
                other => {
                    if !self.resources.has_facet(other) {
                        if config.dimension(other).is_some() {
                            debug!(
                                component = self.component,
                                facet = %other,
                                "configured dimension has no directory, dropped"
                            );
                        }
                        continue;
                    }
                    config.dimension(other).cloned().unwrap_or_default()
                }
            };

            let prefix = join_rel(&assets_dir, facet.as_str());
            tree.insert(facet, self.build_node(&spec, &prefix, diagnostics));
        }

        trace!(component = self.component, facets = ?tree.keys().collect::<Vec<_>>(), "built dimension tree");
        tree
    }

    /// Action variants are the component's actions. Each one includes its
    /// configured paths or, by default, its own `assets/action/<name>`.
    fn action_spec(&self, config: &ComponentConfig) -> DimensionSpec {
        let mut spec = config.dimension(Facet::Action).cloned().unwrap_or_default();
        for (name, action) in &config.actions {
            let include = action.include.clone().unwrap_or_else(|| {
                vec![folder(&join_rel(self.root, &format!("assets/action/{name}")))]
            });
            spec.variants
                .insert(name.clone(), DimensionSpec::including(include));
        }
        spec
    }

    fn build_node(&self, spec: &DimensionSpec, prefix: &str, diagnostics: &mut Diagnostics) -> DimensionNode {
        if spec.is_leaf() {
            let mut list = spec.include.clone().unwrap_or_default();
            list.push(folder(prefix));

            let files = filter_resources(
                &list,
                &self.resources.assets,
                self.component,
                self.root,
                diagnostics,
            );
            let files = self.stage.exclude(files, &spec.exclude);
            let files = self.stage.replace(files, &spec.replace);
            return DimensionNode::Leaf(files);
        }

        DimensionNode::Branch(
            spec.variants
                .iter()
                .map(|(name, child)| {
                    let node = self.build_node(child, &join_rel(prefix, name), diagnostics);
                    (name.clone(), node)
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::Passthrough;
    use serde_json::json;

    fn resources(assets: &[&str], facets: &[(Facet, &[&str])]) -> ComponentResources {
        ComponentResources {
            assets: assets.iter().map(|s| s.to_string()).collect(),
            facet_dirs: facets
                .iter()
                .map(|(f, vs)| (*f, vs.iter().map(|s| s.to_string()).collect()))
                .collect(),
            ..ComponentResources::default()
        }
    }

    fn layered(res: &ComponentResources, binders: &[&str], user: serde_json::Value) -> ComponentConfig {
        ComponentConfig::defaults(&res.facet_dirs, binders.iter().copied())
            .layered(Some(&user))
            .unwrap()
    }

    #[test]
    fn absent_facet_directories_are_dropped() {
        let res = resources(
            &["m/A/assets/common/a.css", "m/A/assets/device/mobile/m.css"],
            &[(Facet::Device, &["mobile"])],
        );
        let config = layered(&res, &[], json!({ "dimensions": { "region": { "es": {} } } }));

        let mut diagnostics = Diagnostics::new();
        let tree = TreeBuilder::new("A", "m/A", &res, &Passthrough).build(&config, &mut diagnostics);

        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![Facet::Common, Facet::Device]);
        assert_eq!(tree[&Facet::Common], DimensionNode::leaf(["m/A/assets/common/a.css"]));
        assert_eq!(
            tree[&Facet::Device].child("mobile"),
            Some(&DimensionNode::leaf(["m/A/assets/device/mobile/m.css"]))
        );
    }

    #[test]
    fn action_facet_uses_action_folders() {
        let res = resources(
            &[
                "m/A/assets/action/index/i.css",
                "m/A/assets/action/login/l.css",
            ],
            &[(Facet::Action, &["index", "login"])],
        );
        let config = layered(&res, &["login"], json!({}));

        let mut diagnostics = Diagnostics::new();
        let tree = TreeBuilder::new("A", "m/A", &res, &Passthrough).build(&config, &mut diagnostics);

        let action = &tree[&Facet::Action];
        assert_eq!(action.child("*"), Some(&DimensionNode::empty()));
        assert_eq!(
            action.child("login"),
            Some(&DimensionNode::leaf(["m/A/assets/action/login/l.css"]))
        );
        assert!(action.child("index").is_none());
    }

    #[test]
    fn explicit_action_include_keeps_action_facet() {
        let res = resources(&["m/A/assets/shared/s.css"], &[]);
        let config = layered(
            &res,
            &[],
            json!({ "actions": { "index": { "include": ["assets/shared"] } } }),
        );

        let mut diagnostics = Diagnostics::new();
        let tree = TreeBuilder::new("A", "m/A", &res, &Passthrough).build(&config, &mut diagnostics);

        assert_eq!(
            tree[&Facet::Action].child("index"),
            Some(&DimensionNode::leaf(["m/A/assets/shared/s.css"]))
        );
    }

    #[test]
    fn nested_variants_and_explicit_files() {
        let res = resources(
            &[
                "m/A/assets/device/mobile/iphone/i.css",
                "m/A/assets/device/mobile/android/a.css",
                "m/A/assets/touch.css",
            ],
            &[(Facet::Device, &["mobile"])],
        );
        let config = layered(
            &res,
            &[],
            json!({ "dimensions": { "device": { "mobile": {
                "iphone": { "include": ["touch.css", "missing.css"] },
                "android": {}
            } } } }),
        );

        let mut diagnostics = Diagnostics::new();
        let tree = TreeBuilder::new("A", "m/A", &res, &Passthrough).build(&config, &mut diagnostics);

        let mobile = tree[&Facet::Device].child("mobile").unwrap();
        assert_eq!(
            mobile.child("iphone"),
            Some(&DimensionNode::leaf([
                "m/A/assets/device/mobile/iphone/i.css",
                "m/A/assets/touch.css",
            ]))
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[derive(Debug)]
    struct DropSuffix;

    impl ResourceStage for DropSuffix {
        fn exclude(&self, files: Vec<String>, patterns: &[String]) -> Vec<String> {
            files
                .into_iter()
                .filter(|f| !patterns.iter().any(|p| f.ends_with(p.as_str())))
                .collect()
        }
    }

    #[test]
    fn exclude_only_applies_through_a_stage() {
        let res = resources(&["m/A/assets/common/a.css", "m/A/assets/common/b.css"], &[]);
        let config = layered(&res, &[], json!({ "dimensions": { "common": { "exclude": ["b.css"] } } }));

        let mut diagnostics = Diagnostics::new();
        let passthrough = TreeBuilder::new("A", "m/A", &res, &Passthrough).build(&config, &mut diagnostics);
        assert_eq!(passthrough[&Facet::Common].leaves()[0].len(), 2);

        let staged = TreeBuilder::new("A", "m/A", &res, &DropSuffix).build(&config, &mut diagnostics);
        assert_eq!(staged[&Facet::Common], DimensionNode::leaf(["m/A/assets/common/a.css"]));
    }

    #[test]
    fn variant_dirs_merge_with_configured_variants() {
        let res = resources(&[], &[(Facet::Skin, &["dark"])]);
        let config = layered(&res, &[], json!({ "dimensions": { "skin": { "light": {} } } }));

        let mut diagnostics = Diagnostics::new();
        let tree = TreeBuilder::new("A", "m/A", &res, &Passthrough).build(&config, &mut diagnostics);

        match &tree[&Facet::Skin] {
            DimensionNode::Branch(children) => {
                assert_eq!(children.keys().collect::<Vec<_>>(), vec!["dark", "light"]);
            }
            other => panic!("expected branch, got {other:?}"),
        }
    }
}
