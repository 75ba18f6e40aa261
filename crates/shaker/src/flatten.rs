//! Turning dispatched steps into concrete selectors and file lists.

use indexmap::IndexMap;
use shaker_config::SELECTOR_SEPARATOR;

use crate::dimension::DimensionNode;
use crate::dispatch::{Dispatched, ResolvedFacet};

/// Concrete selector to files, in step order then tree order. Every list
/// starts with `dependencies`.
pub type FlatFiles = IndexMap<String, Vec<String>>;

/// Walk every step of `dispatched` to its leaves.
///
/// The merged tree of a step has the shape of its facets stacked on top of
/// each other, so the walk follows each facet's own node to know which
/// levels belong to it. A facet contributes one selector token: its variant
/// path joined with `-`, or its label when its node is a leaf. A nested
/// action node contributes `<action>-<path>`.
pub fn flatten(dispatched: &Dispatched, dependencies: &[String]) -> FlatFiles {
    let mut out = FlatFiles::new();
    for step in dispatched.steps.values() {
        let facets = &dispatched.facets[..step.depth.min(dispatched.facets.len())];
        let Some(first) = facets.first() else {
            continue;
        };
        let mut walker = Walker {
            facets,
            dependencies,
            tokens: Vec::with_capacity(facets.len()),
            path: Vec::new(),
            out: &mut out,
        };
        walker.walk(&step.tree, 0, &first.node);
    }
    out
}

struct Walker<'a, 'o> {
    facets: &'a [ResolvedFacet],
    dependencies: &'a [String],
    /// Finished tokens of the facets above the current one.
    tokens: Vec<String>,
    /// Variant keys taken inside the current facet.
    path: Vec<&'a str>,
    out: &'o mut FlatFiles,
}

impl<'a> Walker<'a, '_> {
    fn walk(&mut self, merged: &'a DimensionNode, index: usize, shape: &'a DimensionNode) {
        match shape {
            DimensionNode::Branch(children) => {
                for (key, child_shape) in children {
                    let Some(child) = merged.child(key) else {
                        continue;
                    };
                    self.path.push(key);
                    self.walk(child, index, child_shape);
                    self.path.pop();
                }
            }
            DimensionNode::Leaf(_) => {
                let facets = self.facets;
                let token = self.token(&facets[index]);
                self.tokens.push(token);

                let saved = std::mem::take(&mut self.path);
                match facets.get(index + 1) {
                    Some(next) => self.walk(merged, index + 1, &next.node),
                    None => self.emit(merged),
                }
                self.path = saved;
                self.tokens.pop();
            }
        }
    }

    fn token(&self, facet: &ResolvedFacet) -> String {
        let path = self.path.join(SELECTOR_SEPARATOR.to_string().as_str());
        if path.is_empty() {
            facet.label.clone()
        } else if facet.facet.is_action() {
            format!("{}{}{}", facet.label, SELECTOR_SEPARATOR, path)
        } else {
            path
        }
    }

    fn emit(&mut self, merged: &DimensionNode) {
        let DimensionNode::Leaf(files) = merged else {
            return;
        };
        let selector = self.tokens.join(SELECTOR_SEPARATOR.to_string().as_str());
        let mut list = Vec::with_capacity(self.dependencies.len() + files.len());
        list.extend_from_slice(self.dependencies);
        list.extend_from_slice(files);
        self.out.insert(selector, list);
    }
}
