//! Transitive dependency chain resolution over declared `requires`.
//!
//! A module's chain lists, for each declared requirement in order, that
//! requirement's own chain followed by its path, and finally the module's own
//! path. Shared dependencies are not de-duplicated: a diamond yields the
//! common dependency once per route.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::descriptor::{ModuleDescriptor, parse_descriptor};
use crate::error::{GraphError, Result};
use crate::registry::ModuleRegistry;

/// A path of module names through the `requires` graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyChain {
    pub modules: Vec<String>,
}

impl DependencyChain {
    pub fn new(modules: Vec<String>) -> Self {
        Self { modules }
    }

    /// Format the chain as a human-readable string.
    ///
    /// Example: "login -> utils -> login"
    pub fn format_chain(&self) -> String {
        self.modules.join(" -> ")
    }
}

/// Resolve the ordered file paths `name` transitively requires, ending with
/// its own path.
///
/// Requirements that are not in `registry` are ignored.
///
/// # Errors
///
/// - [`GraphError::UnknownModule`] when `name` itself is not registered
/// - [`GraphError::CycleDetected`] when a module is re-entered while still
///   being resolved
pub fn resolve_chain(name: &str, registry: &ModuleRegistry) -> Result<Vec<String>> {
    let root = registry
        .get(name)
        .ok_or_else(|| GraphError::UnknownModule(name.to_string()))?;

    let mut resolver = ChainResolver {
        registry,
        stack: Vec::new(),
    };
    let mut paths = resolver.dependencies_of(root)?;
    paths.push(root.path.clone());
    Ok(paths)
}

/// Parse a binder file, register it (replacing any same-named autoload) and
/// resolve its chain.
pub fn resolve_binder(source: &str, path: &str, registry: &mut ModuleRegistry) -> Result<Vec<String>> {
    let descriptor = parse_descriptor(source, path)?;
    let name = descriptor.name.clone();
    registry.register(descriptor);
    resolve_chain(&name, registry)
}

struct ChainResolver<'r> {
    registry: &'r ModuleRegistry,
    /// Names currently being resolved, outermost first.
    stack: Vec<&'r str>,
}

impl<'r> ChainResolver<'r> {
    fn dependencies_of(&mut self, module: &'r ModuleDescriptor) -> Result<Vec<String>> {
        self.stack.push(&module.name);

        let mut paths = Vec::new();
        for required in &module.requires {
            let Some(dependency) = self.registry.get(required) else {
                trace!(module = %module.name, required = %required, "requirement not known, skipping");
                continue;
            };

            if self.stack.contains(&required.as_str()) {
                let mut modules: Vec<String> = self.stack.iter().map(|s| s.to_string()).collect();
                modules.push(required.clone());
                return Err(GraphError::CycleDetected {
                    chain: DependencyChain::new(modules).format_chain(),
                });
            }

            paths.extend(self.dependencies_of(dependency)?);
            paths.push(dependency.path.clone());
        }

        self.stack.pop();
        Ok(paths)
    }
}
