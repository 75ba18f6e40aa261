//! Folding component results into the application's actions.

use std::sync::Arc;

use indexmap::IndexMap;
use shaker_config::{ComponentRef, Facet};
use tracing::debug;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::dimension::{DimensionNode, DimensionTree, merge_concat};
use crate::dispatch::dispatch;
use crate::error::Result;
use crate::flatten::flatten;
use crate::result::{BundledAction, ShakenAction, ShakenComponent};

/// Bundle every application action with the components it references.
///
/// For each reference, in declaration order, the component action's tree is
/// merged into the application tree (application files first) and its chain
/// appended to the application's. The merged tree is then dispatched and
/// flattened for the application action. Unknown components or component
/// actions are recorded as diagnostics and skipped. An action without
/// references keeps its own result.
pub fn bundle_components(
    app: &ShakenComponent,
    components: &IndexMap<String, Arc<ShakenComponent>>,
    diagnostics: &mut Diagnostics,
) -> Result<IndexMap<String, BundledAction>> {
    let mut bundled = IndexMap::with_capacity(app.actions.len());

    for (name, shaken) in &app.actions {
        let Some(declared) = app
            .config
            .actions
            .get(name)
            .filter(|action| !action.components.is_empty())
        else {
            bundled.insert(
                name.clone(),
                BundledAction {
                    files: shaken.files.clone(),
                    dependencies: shaken.dependencies.clone(),
                    mojits: Vec::new(),
                },
            );
            continue;
        };

        let refs = declared
            .component_refs()
            .map_err(|e| e.for_component(&app.name))?;

        let action = bundle_action(name, shaken, &refs, components, diagnostics);
        bundled.insert(
            name.clone(),
            BundledAction {
                mojits: declared.components.clone(),
                ..action
            },
        );
    }

    Ok(bundled)
}

fn bundle_action(
    name: &str,
    app_action: &ShakenAction,
    refs: &[ComponentRef],
    components: &IndexMap<String, Arc<ShakenComponent>>,
    diagnostics: &mut Diagnostics,
) -> BundledAction {
    let mut tree = app_action.dimensions.clone();
    let mut dependencies = app_action.dependencies.clone();

    for reference in refs {
        let Some(component) = components.get(&reference.component) else {
            diagnostics.push(Diagnostic::missing_component(
                &reference.component,
                format!("application action '{name}' references unknown component '{reference}'"),
            ));
            continue;
        };
        let Some(shaken) = component.action(&reference.action) else {
            diagnostics.push(Diagnostic::missing_component(
                &reference.component,
                format!("application action '{name}' references unknown action '{reference}'"),
            ));
            continue;
        };

        debug!(action = name, component = %reference, "bundling component");
        merge_concat(&mut tree, &rekey_action(&shaken.dimensions, &reference.action, name));
        dependencies.extend(shaken.dependencies.iter().cloned());
    }

    let dispatched = dispatch(&tree, &app_action.order, name);
    BundledAction {
        files: flatten(&dispatched, &dependencies),
        dependencies,
        mojits: Vec::new(),
    }
}

/// The component tree with its `from` action node moved under the
/// application action `to`. Other component actions are dropped.
fn rekey_action(tree: &DimensionTree, from: &str, to: &str) -> DimensionTree {
    let mut rekeyed = tree.clone();
    if let Some(actions) = rekeyed.get_mut(&Facet::Action) {
        let node = actions.child(from).cloned().unwrap_or_default();
        let mut only = IndexMap::new();
        only.insert(to.to_string(), node);
        *actions = DimensionNode::Branch(only);
    }
    rekeyed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shaker_config::{ComponentConfig, FacetOrder};

    fn branch(children: &[(&str, DimensionNode)]) -> DimensionNode {
        DimensionNode::Branch(
            children
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    fn action(tree: DimensionTree, dependencies: &[&str]) -> ShakenAction {
        ShakenAction {
            files: Default::default(),
            dependencies: dependencies.iter().map(|s| s.to_string()).collect(),
            dimensions: tree,
            order: FacetOrder::parse("common-action-device").unwrap(),
        }
    }

    fn component(name: &str, actions: Vec<(&str, ShakenAction)>, config: serde_json::Value) -> ShakenComponent {
        ShakenComponent {
            name: name.to_string(),
            root: String::new(),
            config: ComponentConfig::from_value(config).unwrap(),
            actions: actions
                .into_iter()
                .map(|(n, a)| (n.to_string(), a))
                .collect(),
        }
    }

    fn leaf_tree(common: &str, device: Option<&str>) -> DimensionTree {
        let mut tree = DimensionTree::new();
        tree.insert(Facet::Common, DimensionNode::leaf([common]));
        tree.insert(Facet::Action, branch(&[("*", DimensionNode::empty())]));
        if let Some(file) = device {
            tree.insert(Facet::Device, branch(&[("mobile", DimensionNode::leaf([file]))]));
        }
        tree
    }

    #[test]
    fn app_then_components_in_declaration_order() {
        let app = component(
            "app",
            vec![("index", action(leaf_tree("app.css", Some("app-m.css")), &["app.js"]))],
            json!({ "actions": { "index": { "mojits": ["X", "Y"] } } }),
        );

        let mut components = IndexMap::new();
        components.insert(
            "X".to_string(),
            Arc::new(component(
                "X",
                vec![("*", action(leaf_tree("x.css", Some("x-m.css")), &["x.js"]))],
                json!({}),
            )),
        );
        components.insert(
            "Y".to_string(),
            Arc::new(component("Y", vec![("*", action(leaf_tree("y.css", None), &[]))], json!({}))),
        );

        let mut diagnostics = Diagnostics::new();
        let bundled = bundle_components(&app, &components, &mut diagnostics).unwrap();
        let index = &bundled["index"];

        assert_eq!(index.mojits, vec!["X", "Y"]);
        assert_eq!(index.dependencies, vec!["app.js", "x.js"]);
        assert_eq!(
            index.files["common-index"],
            vec!["app.js", "x.js", "app.css", "x.css", "y.css"]
        );
        assert_eq!(
            index.files["common-index-mobile"],
            vec!["app.js", "x.js", "app.css", "x.css", "y.css", "app-m.css", "x-m.css"]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn missing_references_are_diagnostics() {
        let app = component(
            "app",
            vec![("index", action(leaf_tree("app.css", None), &[]))],
            json!({ "actions": { "index": { "mojits": ["Ghost", "X.nope"] } } }),
        );
        let mut components = IndexMap::new();
        components.insert(
            "X".to_string(),
            Arc::new(component("X", vec![("*", action(leaf_tree("x.css", None), &[]))], json!({}))),
        );

        let mut diagnostics = Diagnostics::new();
        let bundled = bundle_components(&app, &components, &mut diagnostics).unwrap();

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(bundled["index"].files["common-index"], vec!["app.css"]);
    }

    #[test]
    fn malformed_reference_fails_the_application() {
        let app = component(
            "app",
            vec![("index", action(leaf_tree("app.css", None), &[]))],
            json!({ "actions": { "index": { "mojits": ["X."] } } }),
        );

        let err = bundle_components(&app, &IndexMap::new(), &mut Diagnostics::new()).unwrap_err();
        match err {
            crate::Error::Config(shaker_config::ConfigError::Schema { component, message, .. }) => {
                assert_eq!(component, "app");
                assert!(message.contains("'X.'"));
            }
            other => panic!("expected a schema error, got {other:?}"),
        }
    }

    #[test]
    fn action_without_references_keeps_its_files() {
        let mut own = action(leaf_tree("app.css", None), &[]);
        own.files.insert("common-*".to_string(), vec!["app.css".to_string()]);
        let app = component("app", vec![("*", own)], json!({}));

        let mut diagnostics = Diagnostics::new();
        let bundled = bundle_components(&app, &IndexMap::new(), &mut diagnostics).unwrap();
        assert_eq!(bundled["*"].files["common-*"], vec!["app.css"]);
        assert!(bundled["*"].mojits.is_empty());
    }

    #[test]
    fn rekey_moves_component_action() {
        let mut tree = DimensionTree::new();
        tree.insert(
            Facet::Action,
            branch(&[
                ("*", DimensionNode::empty()),
                ("login", DimensionNode::leaf(["l.css"])),
            ]),
        );
        let rekeyed = rekey_action(&tree, "login", "index");
        assert_eq!(
            rekeyed[&Facet::Action],
            branch(&[("index", DimensionNode::leaf(["l.css"]))])
        );
    }
}
