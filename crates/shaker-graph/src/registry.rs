//! The set of known module descriptors for one resolution pass.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::descriptor::ModuleDescriptor;

/// Known modules keyed by registered name.
///
/// Registering a name twice replaces the earlier descriptor; this is how a
/// binder overrides a same-named autoload.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: FxHashMap<String, ModuleDescriptor>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: ModuleDescriptor) -> Option<ModuleDescriptor> {
        let replaced = self.modules.insert(descriptor.name.clone(), descriptor);
        if let Some(previous) = &replaced {
            debug!(name = %previous.name, path = %previous.path, "module descriptor replaced");
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.values()
    }
}

impl FromIterator<ModuleDescriptor> for ModuleRegistry {
    fn from_iter<I: IntoIterator<Item = ModuleDescriptor>>(iter: I) -> Self {
        let mut registry = Self::new();
        for descriptor in iter {
            registry.register(descriptor);
        }
        registry
    }
}

impl Extend<ModuleDescriptor> for ModuleRegistry {
    fn extend<I: IntoIterator<Item = ModuleDescriptor>>(&mut self, iter: I) {
        for descriptor in iter {
            self.register(descriptor);
        }
    }
}
