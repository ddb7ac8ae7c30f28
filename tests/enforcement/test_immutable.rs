// Immutability across module boundaries.
use pact_core::model::{AssignOp, Expr, IncDecOp, Stmt};
use pact_core::types::{Span, TypeRef};

use super::common::{codes, engine, field_write, func, geometry_model, method};

#[test]
fn test_foreign_writes_flagged() {
    let report = engine(geometry_model()).check_module("shapes");
    assert_eq!(codes(&report.violations), vec!["IMM01", "IMM04"]);
    assert_eq!(report.violations[0].position, 101);
    assert!(report.violations[0].message.contains("geo.Point"));
    assert!(report.violations[1].message.contains("+="));
}

#[test]
fn test_constructor_and_mutable_field_allowed() {
    let report = engine(geometry_model()).check_module("geo");
    assert!(report.violations.is_empty());
}

#[test]
fn test_element_and_incdec_writes() {
    let point = TypeRef::named("geo", "Point").indirect();
    let mut model = geometry_model();
    let element = Stmt::Assign {
        span: Span::new(400, 412),
        lhs: vec![Expr::index(
            Expr::selector(Expr::ident("p", 400), "X", 401),
            Expr::lit(404),
            403,
        )],
        op: AssignOp::Assign,
        rhs: vec![Expr::lit(410)],
    };
    let bump = Stmt::IncDec {
        span: Span::new(500, 505),
        target: Expr::selector(Expr::ident("p", 500), "Y", 501),
        op: IncDecOp::Inc,
    };
    model
        .module_mut("shapes")
        .set_type(400, point.clone())
        .set_type(500, point)
        .add_function(func("shapes", "Poke", 390, vec![element, bump]));

    let report = engine(model).check_module("shapes");
    let found: Vec<&str> = report
        .violations
        .iter()
        .filter(|v| v.position >= 400)
        .map(|v| v.code.as_str())
        .collect();
    assert_eq!(found, vec!["IMM02", "IMM03"]);
}

#[test]
fn test_receiver_rebind_outside_constructor() {
    let point = TypeRef::named("geo", "Point").indirect();
    let mut model = geometry_model();
    let rebind = Stmt::Assign {
        span: Span::new(300, 309),
        lhs: vec![Expr::Deref {
            inner: Box::new(Expr::ident("p", 301)),
            pos: 300,
        }],
        op: AssignOp::Assign,
        rhs: vec![Expr::ident("q", 305)],
    };
    model
        .module_mut("geo")
        .add_function(method("geo", "Reset", 290, "p", point, vec![rebind]));

    let report = engine(model).check_module("geo");
    assert_eq!(codes(&report.violations), vec!["IMM05"]);
}

#[test]
fn test_plain_types_unaffected() {
    let mut model = geometry_model();
    model
        .module_mut("shapes")
        .set_type(600, TypeRef::named("shapes", "Box"))
        .add_function(func(
            "shapes",
            "Resize",
            590,
            vec![field_write("b", "W", AssignOp::Assign, 600)],
        ));
    let report = engine(model).check_module("shapes");
    assert!(report.violations.iter().all(|v| v.position < 600));
}
