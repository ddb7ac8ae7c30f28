// Ignore directives, configured suppressions and their interaction with
// conformance violations.
use std::sync::Arc;

use pact_core::config::PactConfig;
use pact_core::model::{AssignOp, DeclKind, NodeKind};
use pact_core::types::TypeRef;
use pact_enforce::engine::Engine;

use super::common::{codes, comment, decl, engine, field_write, func, geometry_model, layout};

/// `shapes` laid out as `Grow` [90,350] (IMM01 at 101, IMM04 at 201, an
/// exempt write at 300) followed by `Shrink` [400,450] (IMM04 at 411).
fn laid_out(comments: &[(&str, u32, u32)]) -> pact_core::memory::MemoryModel {
    let mut model = geometry_model();
    let shapes = model
        .module_mut("shapes")
        .set_type(410, TypeRef::named("geo", "Point").indirect())
        .add_function(func(
            "shapes",
            "Shrink",
            400,
            vec![field_write("p", "X", AssignOp::Sub, 410)],
        ));
    for (text, start, line) in comments {
        shapes.add_comment(comment(text, *start, *line));
    }
    shapes.layout = Some(layout(
        (0, 500),
        &[
            (NodeKind::Decl, 90, 350, 3),
            (NodeKind::Block, 95, 350, 3),
            (NodeKind::Stmt, 100, 109, 4),
            (NodeKind::Stmt, 200, 209, 6),
            (NodeKind::Stmt, 300, 309, 8),
            (NodeKind::Decl, 400, 450, 10),
            (NodeKind::Block, 405, 450, 10),
            (NodeKind::Stmt, 410, 419, 11),
        ],
    ));
    model
}

#[test]
fn test_statement_directive_covers_following_statement() {
    let model = laid_out(&[("//pact:ignore IMM04", 150, 5)]);
    let report = engine(model).check_module("shapes");
    assert_eq!(codes(&report.violations), vec!["IMM01", "IMM04"]);
    assert_eq!(report.violations[1].position, 411);
    assert_eq!(report.suppressed, 1);
}

#[test]
fn test_category_directive_above_declaration() {
    let model = laid_out(&[("//pact:ignore IMM -- generated", 370, 9)]);
    let report = engine(model).check_module("shapes");
    let positions: Vec<u32> = report.violations.iter().map(|v| v.position).collect();
    assert_eq!(positions, vec![101, 201]);
    assert_eq!(report.suppressed, 1);
}

#[test]
fn test_module_header_covers_everything() {
    let model = laid_out(&[("//pact:ignore ALL", 0, 1)]);
    let report = engine(model).check_module("shapes");
    assert!(report.violations.is_empty());
    assert_eq!(report.suppressed, 3);
}

#[test]
fn test_other_code_does_not_suppress() {
    let model = laid_out(&[("//pact:ignore CTOR01", 150, 5)]);
    let report = engine(model).check_module("shapes");
    assert_eq!(report.violations.len(), 3);
    assert_eq!(report.suppressed, 0);
}

#[test]
fn test_config_and_runtime_suppression() {
    let config = PactConfig {
        suppress: vec!["IMM04".to_string()],
        ..PactConfig::default()
    };
    let mut engine = Engine::new(Arc::new(laid_out(&[])), config);
    let report = engine.check_module("shapes");
    assert_eq!(codes(&report.violations), vec!["IMM01"]);

    engine.suppress("IMM");
    let report = engine.check_module("shapes");
    assert!(report.violations.is_empty());
    assert_eq!(report.suppressed, 3);
}

#[test]
fn test_conformance_never_suppressed() {
    let mut model = laid_out(&[("//pact:ignore ALL", 0, 1)]);
    model.module_mut("shapes").declare(decl(
        "shapes",
        "Circle",
        DeclKind::Type,
        20,
        &["//pact:implements geo.Shape"],
    ));
    let config = PactConfig {
        suppress: vec!["ALL".to_string(), "IMPL".to_string()],
        ..PactConfig::default()
    };
    let report = Engine::new(Arc::new(model), config).check_module("shapes");
    assert_eq!(codes(&report.violations), vec!["IMPL03"]);
}
