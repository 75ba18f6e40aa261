//! Pluggable config validation strategies
//!
//! Schema checks only. Whether referenced files and components exist is
//! decided later against the scanned resources.

use crate::component::{ComponentConfig, ComponentRef, DimensionSpec};
use crate::error::{ConfigError, Result};
use crate::facet::{Facet, FacetOrder, SELECTOR_SEPARATOR, WILDCARD_ACTION};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    /// Validate the configuration owned by `component`.
    fn validate(&self, component: &str, config: &ComponentConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use shaker_config::{ComponentConfig, ConfigValidator, SchemaValidator};
///
/// let config = ComponentConfig::default();
/// SchemaValidator.validate("header", &config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, component: &str, config: &ComponentConfig) -> Result<()> {
        let fail = |message: String, hint: &str| ConfigError::Schema {
            component: component.to_string(),
            message,
            hint: Some(hint.to_string()),
        };

        for (name, spec) in &config.dimensions {
            let facet = name.parse::<Facet>().map_err(|_| {
                fail(
                    format!("unknown dimension '{name}'"),
                    "Dimensions must be one of common, action, device, skin, region, lang",
                )
            })?;
            check_variants(spec).map_err(|variant| {
                fail(
                    format!("invalid variant name '{variant}' under '{facet}'"),
                    "Variant names cannot be empty, start with '.', or contain '-'",
                )
            })?;
        }

        for (action, action_cfg) in &config.actions {
            if action != WILDCARD_ACTION && !is_valid_name(action) {
                return Err(fail(
                    format!("invalid action name '{action}'"),
                    "Action names cannot be empty or contain '-' or '.'",
                ));
            }

            if let Some(order) = &action_cfg.order {
                FacetOrder::parse(order).map_err(|err| {
                    fail(
                        format!("action '{action}': {err}"),
                        "Use hyphen-joined facet names, e.g. common-action-device",
                    )
                })?;
            }

            for reference in &action_cfg.components {
                reference.parse::<ComponentRef>().map_err(|err| {
                    fail(
                        format!("action '{action}': {err}"),
                        "Reference components as 'name' or 'name.action'",
                    )
                })?;
            }
        }

        for rule in &config.augments {
            if rule.on.trim().is_empty() {
                return Err(fail(
                    "augment rule has an empty 'on' selector".to_string(),
                    "Set 'on' to the selector the rule applies to",
                ));
            }
        }

        Ok(())
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(SELECTOR_SEPARATOR)
        && !name.contains('.')
}

// Returns the first offending variant name.
fn check_variants(spec: &DimensionSpec) -> std::result::Result<(), String> {
    for (variant, child) in &spec.variants {
        if variant.is_empty() || variant.starts_with('.') || variant.contains(SELECTOR_SEPARATOR) {
            return Err(variant.clone());
        }
        check_variants(child)?;
    }
    Ok(())
}

/// Convenience function for schema-only validation
pub fn validate_schema(component: &str, config: &ComponentConfig) -> Result<()> {
    SchemaValidator.validate(component, config)
}
