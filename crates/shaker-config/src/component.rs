//! Component-level `shaker.json` model.
//!
//! A component's effective configuration is the filesystem-derived defaults
//! (see [`ComponentConfig::defaults`]) with the user's file merged over them
//! recursively. Objects merge key by key; arrays and scalars from the file
//! replace the default outright.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::facet::{Facet, FacetOrder, WILDCARD_ACTION};

/// The full shaker configuration of one component (or of the application).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Facet name to variant tree. Keys are validated against [`Facet`].
    #[serde(default)]
    pub dimensions: IndexMap<String, DimensionSpec>,

    /// Action name (or `*`) to per-action settings.
    #[serde(default)]
    pub actions: IndexMap<String, ActionConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub augments: Vec<AugmentRule>,
}

/// One level of the configured variant tree.
///
/// Every key besides `include`, `exclude` and `replace` names a child
/// variant. A spec without children is a leaf.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Path substitutions, original to replacement.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub replace: IndexMap<String, String>,

    #[serde(flatten)]
    pub variants: IndexMap<String, DimensionSpec>,
}

impl DimensionSpec {
    pub fn is_leaf(&self) -> bool {
        self.variants.is_empty()
    }

    /// A leaf spec that only carries an explicit include list.
    pub fn including(include: Vec<String>) -> Self {
        Self {
            include: Some(include),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionConfig {
    /// Facet order override, e.g. `common-device-action`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    /// Component references (`name` or `name.action`) bundled into this
    /// action. Only meaningful in the application's configuration.
    #[serde(default, rename = "mojits", skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
}

impl ActionConfig {
    /// Resolve the order this action dispatches with.
    pub fn facet_order(&self, fallback: &FacetOrder) -> Result<FacetOrder> {
        match &self.order {
            Some(order) => FacetOrder::parse(order),
            None => Ok(fallback.clone()),
        }
    }

    pub fn component_refs(&self) -> Result<Vec<ComponentRef>> {
        self.components.iter().map(|r| r.parse()).collect()
    }
}

/// Post-processing rule keyed by a selector pattern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AugmentRule {
    pub on: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub replace: IndexMap<String, String>,
}

/// A `component[.action]` reference from an application action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    pub component: String,
    pub action: String,
}

impl FromStr for ComponentRef {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let (component, action) = match s.split_once('.') {
            Some((component, action)) => (component, action),
            None => (s, WILDCARD_ACTION),
        };

        if component.is_empty() || action.is_empty() || action.contains('.') {
            return Err(ConfigError::InvalidValue {
                field: "mojits".to_string(),
                hint: Some(format!(
                    "'{s}' is not a valid reference, expected 'component' or 'component.action'"
                )),
            });
        }

        Ok(Self {
            component: component.to_string(),
            action: action.to_string(),
        })
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.action)
    }
}

impl ComponentConfig {
    /// Create from a raw JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "shaker".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "shaker".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Defaults derived from what exists on disk.
    ///
    /// `variant_dirs` maps each facet whose `assets/<facet>` directory exists
    /// to its variant subdirectory names. `common` is always present and the
    /// `*` action always exists, plus one action per binder.
    pub fn defaults<'a>(
        variant_dirs: &IndexMap<Facet, Vec<String>>,
        binder_actions: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut dimensions = IndexMap::new();
        for facet in Facet::ALL {
            if facet == Facet::Common {
                dimensions.insert(facet.to_string(), DimensionSpec::default());
                continue;
            }
            if facet.is_action() {
                continue;
            }
            if let Some(variants) = variant_dirs.get(&facet) {
                let spec = DimensionSpec {
                    variants: variants
                        .iter()
                        .map(|v| (v.clone(), DimensionSpec::default()))
                        .collect(),
                    ..DimensionSpec::default()
                };
                dimensions.insert(facet.to_string(), spec);
            }
        }

        let mut actions = IndexMap::new();
        actions.insert(WILDCARD_ACTION.to_string(), ActionConfig::default());
        for action in binder_actions {
            actions.insert(action.to_string(), ActionConfig::default());
        }

        Self {
            dimensions,
            actions,
            augments: Vec::new(),
        }
    }

    /// Merge a user configuration over these defaults.
    pub fn layered(&self, overrides: Option<&Value>) -> Result<Self> {
        let Some(overrides) = overrides else {
            return Ok(self.clone());
        };
        let mut base = self.to_value()?;
        merge_values(&mut base, overrides);
        Self::from_value(base)
    }

    pub fn dimension(&self, facet: Facet) -> Option<&DimensionSpec> {
        self.dimensions.get(facet.as_str())
    }
}

pub(crate) fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
