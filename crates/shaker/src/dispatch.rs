//! Selector dispatch: cascading the facets of an order into one another.
//!
//! For `common-action-device` and action `login` the dispatcher produces
//! two steps, `common-action` (common merged with login's node) and
//! `common-action-device` (that result merged with the device node). Every
//! step builds on the previous one.

use indexmap::IndexMap;
use shaker_config::{Facet, FacetOrder, SELECTOR_SEPARATOR};
use tracing::trace;

use crate::dimension::{DimensionNode, DimensionTree, merge};

/// A facet of the order with the node that stands for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFacet {
    pub facet: Facet,
    /// Selector token used when this facet's node is a leaf: the facet name,
    /// or the action name for `action`.
    pub label: String,
    pub node: DimensionNode,
}

/// One merge step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchStep {
    /// Number of leading facets of the order folded into `tree`.
    pub depth: usize,
    pub tree: DimensionNode,
}

/// The dispatched form of a dimension tree for one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub action: String,
    pub facets: Vec<ResolvedFacet>,
    /// Steps keyed by compound facet selector, shortest first.
    pub steps: IndexMap<String, DispatchStep>,
}

/// Resolve `order` against `tree` for `action`.
///
/// A facet missing from the tree, or an action without a node, stands in as
/// an empty leaf. A single-facet order yields that facet's node as the only
/// step.
pub fn dispatch(tree: &DimensionTree, order: &FacetOrder, action: &str) -> Dispatched {
    let facets: Vec<ResolvedFacet> = order
        .facets()
        .iter()
        .map(|&facet| resolve_facet(tree, facet, action))
        .collect();

    let mut steps = IndexMap::new();
    let Some(first) = facets.first() else {
        return Dispatched {
            action: action.to_string(),
            facets,
            steps,
        };
    };

    let mut selector = first.facet.as_str().to_string();
    if facets.len() == 1 {
        steps.insert(
            selector,
            DispatchStep {
                depth: 1,
                tree: first.node.clone(),
            },
        );
    } else {
        let mut accumulated = first.node.clone();
        for (index, right) in facets.iter().enumerate().skip(1) {
            accumulated = merge(&accumulated, &right.node);
            selector.push(SELECTOR_SEPARATOR);
            selector.push_str(right.facet.as_str());
            trace!(action, selector = %selector, "dispatch step");
            steps.insert(
                selector.clone(),
                DispatchStep {
                    depth: index + 1,
                    tree: accumulated.clone(),
                },
            );
        }
    }

    Dispatched {
        action: action.to_string(),
        facets,
        steps,
    }
}

fn resolve_facet(tree: &DimensionTree, facet: Facet, action: &str) -> ResolvedFacet {
    if facet.is_action() {
        let node = tree
            .get(&facet)
            .and_then(|actions| actions.child(action))
            .cloned()
            .unwrap_or_default();
        return ResolvedFacet {
            facet,
            label: action.to_string(),
            node,
        };
    }

    ResolvedFacet {
        facet,
        label: facet.as_str().to_string(),
        node: tree.get(&facet).cloned().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(children: &[(&str, DimensionNode)]) -> DimensionNode {
        DimensionNode::Branch(
            children
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn common_device_cascade() {
        let mut tree = DimensionTree::new();
        tree.insert(Facet::Common, DimensionNode::leaf(["a.css"]));
        tree.insert(
            Facet::Device,
            branch(&[
                ("mobile", DimensionNode::leaf(["m.css"])),
                ("desktop", DimensionNode::leaf(["d.css"])),
            ]),
        );

        let order = FacetOrder::parse("common-device").unwrap();
        let dispatched = dispatch(&tree, &order, "*");

        assert_eq!(dispatched.steps.len(), 1);
        assert_eq!(
            dispatched.steps["common-device"].tree,
            branch(&[
                ("mobile", DimensionNode::leaf(["a.css", "m.css"])),
                ("desktop", DimensionNode::leaf(["a.css", "d.css"])),
            ])
        );
    }

    #[test]
    fn every_prefix_is_a_step() {
        let mut tree = DimensionTree::new();
        tree.insert(Facet::Common, DimensionNode::leaf(["a.css"]));
        tree.insert(
            Facet::Action,
            branch(&[("login", DimensionNode::leaf(["l.css"]))]),
        );

        let dispatched = dispatch(&tree, &FacetOrder::default(), "login");

        assert_eq!(
            dispatched.steps.keys().collect::<Vec<_>>(),
            vec![
                "common-action",
                "common-action-device",
                "common-action-device-skin",
                "common-action-device-skin-region",
                "common-action-device-skin-region-lang",
            ]
        );
        for step in dispatched.steps.values() {
            assert_eq!(step.tree, DimensionNode::leaf(["a.css", "l.css"]));
        }
        assert_eq!(dispatched.facets[1].label, "login");
    }

    #[test]
    fn unknown_action_is_an_empty_leaf() {
        let mut tree = DimensionTree::new();
        tree.insert(Facet::Common, DimensionNode::leaf(["a.css"]));
        tree.insert(
            Facet::Action,
            branch(&[("login", DimensionNode::leaf(["l.css"]))]),
        );

        let order = FacetOrder::parse("common-action").unwrap();
        let dispatched = dispatch(&tree, &order, "logout");
        assert_eq!(
            dispatched.steps["common-action"].tree,
            DimensionNode::leaf(["a.css"])
        );
    }

    #[test]
    fn single_facet_is_looked_up_directly() {
        let mut tree = DimensionTree::new();
        tree.insert(
            Facet::Action,
            branch(&[("login", DimensionNode::leaf(["l.css"]))]),
        );

        let order = FacetOrder::parse("action").unwrap();
        let dispatched = dispatch(&tree, &order, "login");
        assert_eq!(dispatched.steps.len(), 1);
        assert_eq!(dispatched.steps["action"].depth, 1);
        assert_eq!(dispatched.steps["action"].tree, DimensionNode::leaf(["l.css"]));
    }
}
