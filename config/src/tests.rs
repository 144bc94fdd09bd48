use crate::{AppConfig, ConfigError, QueryConfig};
use serde_json::json;

#[test]
fn defaults_cover_every_verb() {
    let config = AppConfig::default();

    assert_eq!(config.query.root_verbs.len(), 8);
    assert!(config.query.default_value.is_empty());
    assert!(config.query.passthrough_payloads);
    assert!(config.schema.default_value);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_toml_yields_defaults() {
    let config = AppConfig::from_toml_str("").ok();
    assert_eq!(config, Some(AppConfig::default()));
}

#[test]
fn toml_overrides_selected_values() {
    let config = AppConfig::from_toml_str(
        r#"
        [query]
        root_verbs = ["get", "count"]
        passthrough_payloads = false

        [query.default_value]
        limitedTo = 20

        [schema]
        default_value = false
        "#,
    );

    let config = match config {
        Ok(config) => config,
        Err(err) => panic!("config should parse: {err}"),
    };
    assert_eq!(config.query.root_verbs, vec!["get", "count"]);
    assert_eq!(
        serde_json::Value::Object(config.query.default_value),
        json!({ "limitedTo": 20 })
    );
    assert!(!config.query.passthrough_payloads);
    assert!(!config.schema.default_value);
}

#[test]
fn empty_verb_list_is_rejected() {
    let result = AppConfig::from_toml_str("[query]\nroot_verbs = []\n");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn duplicate_verbs_are_rejected() {
    let mut config = AppConfig::default();
    config.query = QueryConfig::new(
        vec!["get".into(), "GET".into()],
        serde_json::Map::new(),
        true,
    );

    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn malformed_toml_is_reported() {
    let result = AppConfig::from_toml_str("[query\nroot_verbs = 1");
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn from_file_reads_toml() -> Result<(), ConfigError> {
    let path = std::env::temp_dir().join(format!("ronin-syntax-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[schema]\ndefault_value = false\n")?;

    let config = AppConfig::from_file(&path);
    std::fs::remove_file(&path)?;

    assert!(!config?.schema.default_value);
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let result = AppConfig::from_file("/nonexistent/ronin.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
