use super::*;
use crate::rules::RiskCategoryRegistry;
use serde_json::json;
use std::fs;

#[test]
fn test_default_config() {
    let config = EngineConfig::default();
    assert!(config.skip_risk_rules.is_empty());
    assert!(config.ignore_orphaned_risk_tracking);
    assert_eq!(config.orphan_policy(), OrphanPolicy::Warn);
    assert_eq!(config.workers, 0);
}

#[test]
fn test_normalize_config_key() {
    assert_eq!(normalize_config_key("SkipRiskRules"), "skipriskrules");
    assert_eq!(normalize_config_key("skip_risk_rules"), "skipriskrules");
    assert_eq!(normalize_config_key("skip-risk-rules"), "skipriskrules");
}

#[test]
fn test_parse_skip_list() {
    assert_eq!(
        parse_skip_list(" missing-hardening, ,unencrypted-asset ,"),
        vec!["missing-hardening", "unencrypted-asset"]
    );
    assert!(parse_skip_list("").is_empty());
}

#[test]
fn test_merge_applies_only_present_keys() {
    let mut config = EngineConfig {
        workers: 3,
        ..Default::default()
    };
    config
        .merge(&json!({"IgnoreOrphanedRiskTracking": false}))
        .unwrap();
    assert!(!config.ignore_orphaned_risk_tracking);
    assert_eq!(config.orphan_policy(), OrphanPolicy::Fail);
    assert_eq!(config.workers, 3);
    assert_eq!(config.attractiveness, Attractiveness::default());
}

#[test]
fn test_merge_skip_list_forms() {
    let mut config = EngineConfig::default();
    config
        .merge(&json!({"skiprisKRULES": "a, b"}))
        .unwrap();
    assert_eq!(config.skip_risk_rules, vec!["a", "b"]);

    config
        .merge(&json!({"skip_risk_rules": ["c", " d "]}))
        .unwrap();
    assert_eq!(config.skip_risk_rules, vec!["c", "d"]);
}

#[test]
fn test_merge_ignores_unknown_keys() {
    let mut config = EngineConfig::default();
    config.merge(&json!({"Verbose": true})).unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_merge_rejects_bad_value() {
    let mut config = EngineConfig::default();
    let err = config.merge(&json!({"Workers": "many"})).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid value for Workers"));
}

#[test]
fn test_load_defaults_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_engine_config(dir.path(), None).unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_load_toml() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("threatgraph.toml"),
        r#"
SkipRiskRules = "missing-hardening"
Workers = 2

[Attractiveness]
Quantity = 5
Confidentiality = { Asset = 3 }
"#,
    )
    .unwrap();

    let config = load_engine_config(dir.path(), None).unwrap();
    assert_eq!(config.skip_risk_rules, vec!["missing-hardening"]);
    assert_eq!(config.workers, 2);
    assert_eq!(config.attractiveness.quantity, 5);
    assert_eq!(config.attractiveness.confidentiality.asset, 3);
    // Unset weights keep their defaults
    assert_eq!(
        config.attractiveness.confidentiality.processed_or_stored_data,
        2
    );
}

#[test]
fn test_toml_wins_over_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("threatgraph.toml"), "Workers = 7\n").unwrap();
    fs::write(dir.path().join(".threatgraphrc.json"), r#"{"Workers": 9}"#).unwrap();
    let config = load_engine_config(dir.path(), None).unwrap();
    assert_eq!(config.workers, 7);
}

#[test]
fn test_load_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".threatgraphrc.json"),
        r#"{"skip_risk_rules": ["cross-site-request-forgery"], "ignore_orphaned_risk_tracking": false}"#,
    )
    .unwrap();
    let config = load_engine_config(dir.path(), None).unwrap();
    assert_eq!(config.skip_risk_rules, vec!["cross-site-request-forgery"]);
    assert!(!config.ignore_orphaned_risk_tracking);
}

#[test]
fn test_explicit_path_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = load_engine_config(dir.path(), Some(&missing)).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to load config"));
}

#[test]
fn test_invalid_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".threatgraphrc.json"), "{ nope").unwrap();
    let err = load_engine_config(dir.path(), None).unwrap_err();
    assert!(format!("{err:#}").contains(".threatgraphrc.json"));
}

#[test]
fn test_engine_uses_settings() {
    let config = EngineConfig {
        workers: 2,
        ..Default::default()
    };
    let engine = config.engine(Arc::new(RiskCategoryRegistry::with_built_in_rules()));
    assert_eq!(engine.workers(), 2);
    assert_eq!(engine.registry().len(), 10);
}
