// Declared interface conformance across modules.
use pact_core::memory::MemoryModel;
use pact_core::model::DeclKind;
use pact_core::types::{MethodEntry, MethodSignature, ReceiverKind, TypeRef};

use super::common::{codes, decl, engine};

fn area() -> MethodSignature {
    MethodSignature::new("Area", vec![], vec![TypeRef::builtin("float64")])
}

fn scale() -> MethodSignature {
    MethodSignature::new("Scale", vec![TypeRef::builtin("float64")], vec![])
}

/// `geo.Shape` requires `Area` and `Scale`; `shapes.Circle` declares the
/// given requirement and method set.
fn model(requirement: &str, methods: Vec<MethodEntry>) -> MemoryModel {
    let mut model = MemoryModel::new();
    let geo = model
        .module_mut("geo")
        .declare(decl("geo", "Shape", DeclKind::Interface, 10, &[]));
    geo.interfaces.insert("Shape".to_string(), vec![area(), scale()]);

    let shapes = model
        .module_mut("shapes")
        .import("g", "geo")
        .declare(decl("shapes", "Circle", DeclKind::Type, 50, &[requirement]));
    shapes.method_sets.insert("Circle".to_string(), methods);
    model
}

fn entry(signature: MethodSignature, receiver: ReceiverKind) -> MethodEntry {
    MethodEntry {
        signature,
        receiver,
    }
}

#[test]
fn test_conforming_type() {
    let model = model(
        "//pact:implements g.Shape",
        vec![entry(area(), ReceiverKind::Value), entry(scale(), ReceiverKind::Value)],
    );
    assert!(engine(model).check_module("shapes").violations.is_empty());
}

#[test]
fn test_pointer_methods_need_pointer_requirement() {
    let methods = vec![
        entry(area(), ReceiverKind::Value),
        entry(scale(), ReceiverKind::Pointer),
    ];
    let report = engine(model("//pact:implements g.Shape", methods.clone())).check_module("shapes");
    assert_eq!(codes(&report.violations), vec!["IMPL01"]);
    assert!(report.violations[0].message.contains("Scale"));
    assert!(!report.violations[0].message.contains("missing Area"));

    let report = engine(model("//pact:implements *g.Shape", methods)).check_module("shapes");
    assert!(report.violations.is_empty());
}

#[test]
fn test_mismatched_signature_reported() {
    let wrong = MethodSignature::new("Scale", vec![TypeRef::builtin("int")], vec![]);
    let report = engine(model(
        "//pact:implements g.Shape",
        vec![entry(area(), ReceiverKind::Value), entry(wrong, ReceiverKind::Value)],
    ))
    .check_module("shapes");
    assert_eq!(codes(&report.violations), vec!["IMPL01"]);
    assert!(report.violations[0].message.contains("wrong signature for Scale"));
}

#[test]
fn test_unresolvable_requirements() {
    let report = engine(model("//pact:implements nowhere.Shape", vec![])).check_module("shapes");
    assert_eq!(codes(&report.violations), vec!["IMPL02"]);

    let report = engine(model("//pact:implements g.Solid", vec![])).check_module("shapes");
    assert_eq!(codes(&report.violations), vec!["IMPL03"]);
}

#[test]
fn test_several_requirements_checked_independently() {
    let report = engine(model(
        "//pact:implements g.Shape nowhere.Thing",
        vec![entry(area(), ReceiverKind::Value), entry(scale(), ReceiverKind::Value)],
    ))
    .check_module("shapes");
    assert_eq!(codes(&report.violations), vec!["IMPL02"]);
}
