//! Tests for configuration layering and validation.

use indexmap::IndexMap;
use serde_json::json;
use shaker_config::{
    ComponentConfig, ConfigDiscovery, ConfigError, ConfigValidator, Facet, SchemaValidator,
    parse_value,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn file_config_layers_over_filesystem_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("shaker.json"),
        r#"{
            "dimensions": { "region": { "es": { "include": ["es-only.css"] } } },
            "actions": { "login": { "include": ["login/extra"] } }
        }"#,
    )
    .unwrap();

    let mut dirs = IndexMap::new();
    dirs.insert(Facet::Region, vec!["us".to_string()]);
    let defaults = ComponentConfig::defaults(&dirs, ["index"]);

    let found = ConfigDiscovery::new(dir.path()).find(Path::is_file).unwrap();
    let raw = parse_value(&fs::read_to_string(&found).unwrap(), &found).unwrap();
    let config = defaults.layered(Some(&raw)).unwrap();

    let region = config.dimension(Facet::Region).unwrap();
    assert_eq!(region.variants.keys().collect::<Vec<_>>(), vec!["us", "es"]);
    assert_eq!(
        config.actions.keys().collect::<Vec<_>>(),
        vec!["*", "index", "login"]
    );
    assert_eq!(
        config.actions["login"].include,
        Some(vec!["login/extra".to_string()])
    );

    SchemaValidator.validate("header", &config).unwrap();
}

#[test]
fn user_include_replaces_default_include() {
    let defaults = ComponentConfig::from_value(json!({
        "dimensions": { "common": { "include": ["a", "b"] } }
    }))
    .unwrap();

    let config = defaults
        .layered(Some(&json!({ "dimensions": { "common": { "include": ["c"] } } })))
        .unwrap();

    assert_eq!(
        config.dimension(Facet::Common).unwrap().include,
        Some(vec!["c".to_string()])
    );
}

#[test]
fn schema_errors_name_the_component() {
    let config = ComponentConfig::from_value(json!({
        "actions": { "index": { "order": "common-action-action" } }
    }))
    .unwrap();

    let err = SchemaValidator.validate("footer", &config).unwrap_err();
    assert!(matches!(err, ConfigError::Schema { ref component, .. } if component == "footer"));
    assert!(err.to_string().contains("footer"));
}

#[test]
fn non_object_variant_is_rejected_at_parse() {
    let result = ComponentConfig::from_value(json!({
        "dimensions": { "device": { "mobile": 3 } }
    }));
    assert!(result.is_err());
}
