//! Dimension trees and the two ways of combining them.
//!
//! [`merge`] is the dispatcher's cascade: it grafts the right node under
//! every leaf of the left node so earlier facets stay above later ones.
//! [`merge_concat`] is the aggregator's deep merge: two trees of the same
//! shape are overlaid key by key and their leaves concatenated.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shaker_config::Facet;

/// One level of a dimension tree.
///
/// A node either lists files or has variant children, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionNode {
    Leaf(Vec<String>),
    Branch(IndexMap<String, DimensionNode>),
}

/// Facet to node, in facet order. Facets absent on disk are absent here.
pub type DimensionTree = IndexMap<Facet, DimensionNode>;

impl DimensionNode {
    pub fn empty() -> Self {
        Self::Leaf(Vec::new())
    }

    pub fn leaf<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Leaf(files.into_iter().map(Into::into).collect())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn child(&self, key: &str) -> Option<&DimensionNode> {
        match self {
            Self::Branch(children) => children.get(key),
            Self::Leaf(_) => None,
        }
    }

    /// Every leaf's files, depth first in key order.
    pub fn leaves(&self) -> Vec<&[String]> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a [String]>) {
        match self {
            Self::Leaf(files) => out.push(files),
            Self::Branch(children) => {
                for child in children.values() {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl Default for DimensionNode {
    fn default() -> Self {
        Self::empty()
    }
}

/// Cascade `right` under `left`.
///
/// - Leaf + Leaf: `left ++ right`
/// - Leaf + Branch: right's keys, each `merge(left, child)`
/// - Branch + anything: left's keys, each `merge(child, right)`
pub fn merge(left: &DimensionNode, right: &DimensionNode) -> DimensionNode {
    match (left, right) {
        (DimensionNode::Leaf(l), DimensionNode::Leaf(r)) => {
            let mut files = Vec::with_capacity(l.len() + r.len());
            files.extend_from_slice(l);
            files.extend_from_slice(r);
            DimensionNode::Leaf(files)
        }
        (DimensionNode::Leaf(_), DimensionNode::Branch(children)) => DimensionNode::Branch(
            children
                .iter()
                .map(|(key, child)| (key.clone(), merge(left, child)))
                .collect(),
        ),
        (DimensionNode::Branch(children), _) => DimensionNode::Branch(
            children
                .iter()
                .map(|(key, child)| (key.clone(), merge(child, right)))
                .collect(),
        ),
    }
}

/// Overlay `giver` onto `target`, concatenating files at matching leaves
/// (target's files first). Keys missing in `target` are copied over.
pub fn merge_concat(target: &mut DimensionTree, giver: &DimensionTree) {
    for (facet, node) in giver {
        match target.get_mut(facet) {
            Some(existing) => merge_concat_node(existing, node),
            None => {
                target.insert(*facet, node.clone());
            }
        }
    }
}

/// Node-level overlay.
///
/// Shape mismatches: a leaf given into a branch is appended to every leaf of
/// the branch; a branch given into a leaf becomes the new shape with the
/// leaf's files as the base of every child.
pub fn merge_concat_node(target: &mut DimensionNode, giver: &DimensionNode) {
    match (&mut *target, giver) {
        (DimensionNode::Leaf(files), DimensionNode::Leaf(more)) => {
            files.extend_from_slice(more);
        }
        (DimensionNode::Branch(children), DimensionNode::Branch(given)) => {
            for (key, child) in given {
                match children.get_mut(key) {
                    Some(existing) => merge_concat_node(existing, child),
                    None => {
                        children.insert(key.clone(), child.clone());
                    }
                }
            }
        }
        (DimensionNode::Branch(children), DimensionNode::Leaf(_)) => {
            for child in children.values_mut() {
                merge_concat_node(child, giver);
            }
        }
        (DimensionNode::Leaf(base), DimensionNode::Branch(given)) => {
            let children = given
                .iter()
                .map(|(key, child)| {
                    let mut node = DimensionNode::Leaf(base.clone());
                    merge_concat_node(&mut node, child);
                    (key.clone(), node)
                })
                .collect();
            *target = DimensionNode::Branch(children);
        }
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
    fn leaf_leaf_concatenates_left_first() {
        let merged = merge(&DimensionNode::leaf(["a.css"]), &DimensionNode::leaf(["b.css"]));
        assert_eq!(merged, DimensionNode::leaf(["a.css", "b.css"]));
    }

    #[test]
    fn leaf_into_branch_takes_right_keys() {
        let device = branch(&[
            ("mobile", DimensionNode::leaf(["m.css"])),
            ("desktop", DimensionNode::leaf(["d.css"])),
        ]);
        let merged = merge(&DimensionNode::leaf(["a.css"]), &device);
        assert_eq!(
            merged,
            branch(&[
                ("mobile", DimensionNode::leaf(["a.css", "m.css"])),
                ("desktop", DimensionNode::leaf(["a.css", "d.css"])),
            ])
        );
    }

    #[test]
    fn branch_keeps_left_levels_above_right() {
        let action = branch(&[("login", DimensionNode::leaf(["l.js"]))]);
        let device = branch(&[("mobile", DimensionNode::leaf(["m.css"]))]);
        let merged = merge(&action, &device);

        let leaf = merged.child("login").and_then(|n| n.child("mobile")).unwrap();
        assert_eq!(leaf, &DimensionNode::leaf(["l.js", "m.css"]));
    }

    #[test]
    fn merge_with_empty_leaf_is_identity_on_files() {
        let device = branch(&[("mobile", DimensionNode::leaf(["m.css"]))]);
        assert_eq!(merge(&DimensionNode::empty(), &device), device);
        assert_eq!(merge(&device, &DimensionNode::empty()), device);
    }

    #[test]
    fn concat_overlays_matching_leaves() {
        let mut app = DimensionTree::new();
        app.insert(Facet::Common, DimensionNode::leaf(["app.css"]));
        let mut child = DimensionTree::new();
        child.insert(Facet::Common, DimensionNode::leaf(["x.css"]));
        child.insert(Facet::Device, branch(&[("mobile", DimensionNode::leaf(["xm.css"]))]));

        merge_concat(&mut app, &child);

        assert_eq!(app[&Facet::Common], DimensionNode::leaf(["app.css", "x.css"]));
        assert_eq!(app.keys().collect::<Vec<_>>(), vec![&Facet::Common, &Facet::Device]);
    }

    #[test]
    fn concat_leaf_into_branch_appends_everywhere() {
        let mut target = branch(&[
            ("mobile", DimensionNode::leaf(["m.css"])),
            ("desktop", DimensionNode::leaf(["d.css"])),
        ]);
        merge_concat_node(&mut target, &DimensionNode::leaf(["x.css"]));
        assert_eq!(
            target,
            branch(&[
                ("mobile", DimensionNode::leaf(["m.css", "x.css"])),
                ("desktop", DimensionNode::leaf(["d.css", "x.css"])),
            ])
        );
    }

    #[test]
    fn concat_branch_into_leaf_uses_leaf_as_base() {
        let mut target = DimensionNode::leaf(["app.css"]);
        let given = branch(&[("mobile", DimensionNode::leaf(["m.css"]))]);
        merge_concat_node(&mut target, &given);
        assert_eq!(
            target,
            branch(&[("mobile", DimensionNode::leaf(["app.css", "m.css"]))])
        );
    }

    #[test]
    fn untagged_serialization() {
        let node = branch(&[("mobile", DimensionNode::leaf(["m.css"]))]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, serde_json::json!({ "mobile": ["m.css"] }));
    }
}
