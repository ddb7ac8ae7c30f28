// Program Model dumps, configuration files and exported facts.
use std::fs;
use std::sync::Arc;

use pact_core::config::PactConfig;
use pact_core::memory::MemoryModel;
use pact_core::types::ContractFacts;
use pact_enforce::engine::Engine;
use pact_enforce::fact_store::PrecomputedFacts;
use pact_output::json::JsonFormatter;
use pact_output::OutputFormatter;

use super::common::{geometry_model, setup_project};

#[test]
fn test_model_dump_round_trip_checks_identically() {
    let original = geometry_model();
    let json = original.to_json().unwrap();
    let loaded = MemoryModel::from_json(&json).unwrap();

    let expected = Engine::new(Arc::new(original), PactConfig::default()).check_all();
    let actual = Engine::new(Arc::new(loaded), PactConfig::default()).check_all();
    assert_eq!(actual.violations, expected.violations);
    assert_eq!(actual.violations.len(), 2);
}

#[test]
fn test_malformed_model_dump_is_error() {
    assert!(MemoryModel::from_json("{\"geo\": 3}").is_err());
    assert!(MemoryModel::from_json("not json").is_err());
}

#[test]
fn test_config_file_drives_engine() {
    let (_dir, root) = setup_project(
        &geometry_model(),
        Some(r#"{"version": "0.1.0", "suppress": ["IMM04"], "enforce": {"constructor": false}}"#),
    );
    let config = PactConfig::load(&root.join(".pact"));
    assert_eq!(config.suppress, vec!["IMM04"]);
    assert!(!config.enforce.constructor);
    assert!(config.enforce.immutable);

    let model = MemoryModel::load(&root.join("model.json")).unwrap();
    let result = Engine::new(Arc::new(model), config).check_all();
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].code, "IMM01");
    assert_eq!(result.suppressed_count, 1);
}

#[test]
fn test_missing_config_uses_defaults() {
    let (_dir, root) = setup_project(&geometry_model(), None);
    let config = PactConfig::load(&root.join(".pact"));
    assert_eq!(config.directive_prefix, "pact");
    assert!(config.suppress.is_empty());
}

#[test]
fn test_exported_facts_file_reused() {
    let (_dir, root) = setup_project(&geometry_model(), None);
    let first = Engine::new(Arc::new(geometry_model()), PactConfig::default());
    let expected = first.check_all();
    let path = root.join("facts.json");
    fs::write(&path, serde_json::to_string(&first.export_facts()).unwrap()).unwrap();

    let provider = PrecomputedFacts::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
    let second = Engine::with_provider(
        Arc::new(geometry_model()),
        PactConfig::default(),
        Box::new(provider),
    );
    assert_eq!(second.check_all().violations, expected.violations);
}

#[test]
fn test_json_output_of_real_run() {
    let engine = Engine::new(Arc::new(geometry_model()), PactConfig::default());
    let result = engine.check_all();
    let value: serde_json::Value =
        serde_json::from_str(&JsonFormatter.format_check(&result)).unwrap();
    assert_eq!(value["status"], "error");
    assert_eq!(value["modules_analyzed"].as_array().unwrap().len(), 2);
    assert_eq!(value["violations"][1]["code"], "IMM04");

    let facts: Vec<ContractFacts> =
        serde_json::from_str(&JsonFormatter.format_facts(&engine.export_facts())).unwrap();
    let geo = facts.iter().find(|f| f.module_path == "geo").unwrap();
    assert!(geo.is_immutable("Point"));
    assert!(geo.is_mutable_field("Point", "cache"));
}
