// Test-only and package-only usage restrictions.
use pact_core::config::PactConfig;
use pact_core::memory::MemoryModel;
use pact_core::model::DeclKind;
use pact_core::types::DeclRef;
use pact_enforce::engine::Engine;
use std::sync::Arc;

use super::common::{call, codes, decl, engine, func};

fn model() -> MemoryModel {
    let mut model = MemoryModel::new();
    model
        .module_mut("store")
        .declare(decl("store", "Reset", DeclKind::Function, 10, &["//pact:testonly"]))
        .declare(decl(
            "store",
            "compact",
            DeclKind::Function,
            20,
            &["//pact:packageonly cmd/admin"],
        ));
    for module in ["api", "cmd/admin", "api_test"] {
        model
            .module_mut(module)
            .import("store", "store")
            .set_use(100, DeclRef::new("store", "Reset", 10))
            .set_use(200, DeclRef::new("store", "compact", 20))
            .add_function(func(module, "Run", 90, vec![call("store", "Reset", 100), call("store", "compact", 200)]));
    }
    model
}

#[test]
fn test_production_module_flagged_for_both() {
    let report = engine(model()).check_module("api");
    assert_eq!(codes(&report.violations), vec!["TEST01", "PKG01"]);
    assert!(report.violations[1].message.contains("store.compact"));
}

#[test]
fn test_allowed_module_only_flagged_for_test_only() {
    let report = engine(model()).check_module("cmd/admin");
    assert_eq!(codes(&report.violations), vec!["TEST01"]);
}

#[test]
fn test_test_module_still_bound_by_package_restriction() {
    let report = engine(model()).check_module("api_test");
    assert_eq!(codes(&report.violations), vec!["PKG01"]);
}

#[test]
fn test_test_file_in_production_module() {
    let mut model = model();
    let mut test_fn = func("api", "TestRun", 290, vec![call("store", "Reset", 300)]);
    test_fn.file = "api/run_test.go".to_string();
    model
        .module_mut("api")
        .set_use(300, DeclRef::new("store", "Reset", 10))
        .add_function(test_fn);
    let report = engine(model).check_module("api");
    assert!(report.violations.iter().all(|v| v.position < 300));
}

#[test]
fn test_checkers_can_be_disabled() {
    let mut config = PactConfig::default();
    config.enforce.test_only = false;
    config.enforce.package_only = false;
    let report = Engine::new(Arc::new(model()), config).check_module("api");
    assert!(report.violations.is_empty());
}
