//! Optional post-processing stages.
//!
//! `exclude`, `replace` and `augments` are parsed from configuration but
//! only take effect through a stage the caller plugs in. The default
//! [`Passthrough`] leaves everything untouched.
//!
//! A stage's `id` is part of the cache key of every component it touches.
//! It defaults to the type name; override it when two values of one type
//! behave differently.

use indexmap::IndexMap;
use shaker_config::AugmentRule;

/// Applied to every leaf's files right after filtering.
pub trait ResourceStage: Send + Sync + std::fmt::Debug {
    fn id(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }

    fn exclude(&self, files: Vec<String>, _patterns: &[String]) -> Vec<String> {
        files
    }

    fn replace(&self, files: Vec<String>, _replacements: &IndexMap<String, String>) -> Vec<String> {
        files
    }
}

/// Applied once per augment rule to a flattened action result.
pub trait AugmentStage: Send + Sync + std::fmt::Debug {
    fn id(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }

    fn augment(&self, _rule: &AugmentRule, _files: &mut IndexMap<String, Vec<String>>) {}
}

/// No-op stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl ResourceStage for Passthrough {}

impl AugmentStage for Passthrough {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_keeps_files() {
        let files = vec!["a.css".to_string(), "b.css".to_string()];
        let kept = Passthrough.exclude(files.clone(), &["a.css".to_string()]);
        assert_eq!(kept, files);

        let mut replacements = IndexMap::new();
        replacements.insert("a.css".to_string(), "z.css".to_string());
        assert_eq!(Passthrough.replace(files.clone(), &replacements), files);

        let mut flattened = IndexMap::new();
        flattened.insert("common".to_string(), files.clone());
        Passthrough.augment(
            &AugmentRule {
                on: "common".to_string(),
                ..AugmentRule::default()
            },
            &mut flattened,
        );
        assert_eq!(flattened["common"], files);
    }

    #[derive(Debug)]
    struct Tagged(&'static str);

    impl ResourceStage for Tagged {
        fn id(&self) -> String {
            format!("tagged:{}", self.0)
        }
    }

    #[test]
    fn stage_ids_tell_types_and_values_apart() {
        assert!(ResourceStage::id(&Passthrough).ends_with("Passthrough"));
        assert!(AugmentStage::id(&Passthrough).ends_with("Passthrough"));
        assert_ne!(ResourceStage::id(&Passthrough), Tagged("a").id());
        assert_ne!(Tagged("a").id(), Tagged("b").id());
    }
}
