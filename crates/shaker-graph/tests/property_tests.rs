//! Property-based tests for dependency chain resolution.
//!
//! Graphs are generated acyclic by only letting module `i` require modules
//! with a larger index, so every resolution must succeed.

use proptest::prelude::*;
use shaker_graph::{GraphError, ModuleDescriptor, ModuleRegistry, resolve_chain};

fn path_of(index: usize) -> String {
    format!("autoload/m{index}.js")
}

/// Strategy for acyclic registries of 1-12 modules.
fn acyclic_registry() -> impl Strategy<Value = ModuleRegistry> {
    (1usize..=12).prop_flat_map(|count| {
        prop::collection::vec(prop::collection::vec(any::<prop::sample::Index>(), 0..4), count)
            .prop_map(move |picks| {
                picks
                    .into_iter()
                    .enumerate()
                    .map(|(index, targets)| {
                        let later = count - index - 1;
                        let requires: Vec<String> = if later == 0 {
                            Vec::new()
                        } else {
                            targets
                                .iter()
                                .map(|pick| format!("m{}", index + 1 + pick.index(later)))
                                .collect()
                        };
                        ModuleDescriptor::new(format!("m{index}"), path_of(index))
                            .with_requires(requires)
                    })
                    .collect()
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: the chain always ends with the module's own path.
    #[test]
    fn prop_chain_ends_with_self(registry in acyclic_registry()) {
        let chain = resolve_chain("m0", &registry).unwrap();
        prop_assert_eq!(chain.last().cloned(), Some(path_of(0)));
    }

    /// Property: every dependency's path appears after its own dependencies.
    /// For each occurrence of a module in the chain, all of its known
    /// requirements occur earlier.
    #[test]
    fn prop_dependencies_precede_dependents(registry in acyclic_registry()) {
        let chain = resolve_chain("m0", &registry).unwrap();
        for (position, path) in chain.iter().enumerate() {
            let module = registry.iter().find(|m| &m.path == path).unwrap();
            for required in &module.requires {
                let required_path = &registry.get(required).unwrap().path;
                prop_assert!(chain[..position].contains(required_path));
            }
        }
    }

    /// Property: adding a back edge to the root turns any non-trivial graph
    /// into a cycle error.
    #[test]
    fn prop_back_edge_is_cycle(registry in acyclic_registry()) {
        let mut registry = registry;
        let Some(leaf) = registry
            .iter()
            .filter(|m| m.name != "m0")
            .find(|m| resolve_chain("m0", &registry).unwrap().contains(&m.path))
            .cloned()
        else {
            return Ok(());
        };

        let mut requires = leaf.requires.clone();
        requires.push("m0".to_string());
        registry.register(leaf.with_requires(requires));

        let is_cycle = matches!(
            resolve_chain("m0", &registry),
            Err(GraphError::CycleDetected { .. })
        );
        prop_assert!(is_cycle);
    }
}
