/// Shared fixtures for the pact integration tests.
///
/// Import from any integration test file with:
///   `#[path = "common/mod.rs"] mod common;`
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use pact_core::config::PactConfig;
use pact_core::memory::MemoryModel;
use pact_core::model::{
    Annotation, AssignOp, Comment, DeclKind, Declaration, Expr, FieldDecl, FunctionBody,
    NodeKind, Receiver, SourceLayout, Stmt, SyntaxNode,
};
use pact_core::types::{DeclRef, Pos, Span, TypeRef};
use pact_enforce::engine::Engine;
use pact_enforce::types::Violation;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn decl(module: &str, name: &str, kind: DeclKind, pos: Pos, notes: &[&str]) -> Declaration {
    Declaration {
        id: DeclRef::new(module, name, pos),
        kind,
        span: Span::new(pos, pos + 9),
        receiver: None,
        annotations: notes
            .iter()
            .map(|t| Annotation::new(*t, pos.saturating_sub(1)))
            .collect(),
        fields: vec![],
    }
}

/// Type declaration with fields; those named in `mutable` carry the
/// `mutable` directive.
#[allow(dead_code)]
pub fn struct_decl(
    module: &str,
    name: &str,
    pos: Pos,
    notes: &[&str],
    fields: &[&str],
    mutable: &[&str],
) -> Declaration {
    let mut d = decl(module, name, DeclKind::Type, pos, notes);
    d.fields = fields
        .iter()
        .enumerate()
        .map(|(i, field)| FieldDecl {
            name: field.to_string(),
            position: pos + 2 + i as Pos,
            annotations: if mutable.contains(field) {
                vec![Annotation::new("//pact:mutable", pos + 1)]
            } else {
                vec![]
            },
        })
        .collect();
    d
}

#[allow(dead_code)]
pub fn func(module: &str, name: &str, pos: Pos, body: Vec<Stmt>) -> FunctionBody {
    FunctionBody {
        decl: DeclRef::new(module, name, pos),
        file: format!("{}/{}.go", module, module.rsplit('/').next().unwrap_or(module)),
        receiver: None,
        body,
    }
}

#[allow(dead_code)]
pub fn method(module: &str, name: &str, pos: Pos, recv: &str, ty: TypeRef, body: Vec<Stmt>) -> FunctionBody {
    FunctionBody {
        receiver: Some(Receiver {
            name: Some(recv.to_string()),
            type_ref: ty,
        }),
        ..func(module, name, pos, body)
    }
}

/// `<var>.<field> <op> 1` with `var` at `pos`; register the variable's
/// type at `pos` with `set_type`.
#[allow(dead_code)]
pub fn field_write(var: &str, field: &str, op: AssignOp, pos: Pos) -> Stmt {
    Stmt::Assign {
        span: Span::new(pos, pos + 9),
        lhs: vec![Expr::selector(Expr::ident(var, pos), field, pos + 1)],
        op,
        rhs: vec![Expr::lit(pos + 8)],
    }
}

/// `T{}` at `pos`; register `T` at `pos` with `set_type`.
#[allow(dead_code)]
pub fn literal(pos: Pos) -> Stmt {
    Stmt::Expr {
        span: Span::new(pos, pos + 4),
        expr: Expr::CompositeLit {
            elems: vec![],
            pos,
        },
    }
}

/// `<alias>.<name>()` with the selector at `pos`; register the callee
/// with `set_use(pos, ..)`.
#[allow(dead_code)]
pub fn call(alias: &str, name: &str, pos: Pos) -> Stmt {
    Stmt::Expr {
        span: Span::new(pos, pos + 6),
        expr: Expr::call(
            Expr::selector(Expr::ident(alias, pos.saturating_sub(4)), name, pos),
            vec![],
            pos + 6,
        ),
    }
}

#[allow(dead_code)]
pub fn comment(text: &str, start: Pos, line: u32) -> Comment {
    Comment {
        text: text.to_string(),
        span: Span::new(start, start + text.len() as Pos - 1),
        line,
    }
}

#[allow(dead_code)]
pub fn layout(span: (Pos, Pos), nodes: &[(NodeKind, Pos, Pos, u32)]) -> SourceLayout {
    SourceLayout {
        span: Span::new(span.0, span.1),
        nodes: nodes
            .iter()
            .map(|&(kind, start, end, line)| SyntaxNode::new(kind, Span::new(start, end), line))
            .collect(),
    }
}

/// `geo.Point` is immutable, built only by `NewPoint`, with a mutable
/// `cache` field. `geo` itself writes it legally; `shapes` does not.
#[allow(dead_code)]
pub fn geometry_model() -> MemoryModel {
    let point = TypeRef::named("geo", "Point").indirect();
    let mut model = MemoryModel::new();
    model
        .module_mut("geo")
        .declare(struct_decl(
            "geo",
            "Point",
            10,
            &["//pact:immutable", "//pact:constructor NewPoint"],
            &["X", "Y", "cache"],
            &["cache"],
        ))
        .set_type(100, point.clone())
        .set_type(200, point.clone())
        .add_function(func(
            "geo",
            "NewPoint",
            90,
            vec![field_write("p", "X", AssignOp::Assign, 100)],
        ))
        .add_function(method(
            "geo",
            "Touch",
            190,
            "p",
            point.clone(),
            vec![field_write("p", "cache", AssignOp::Assign, 200)],
        ));
    model
        .module_mut("shapes")
        .import("geo", "geo")
        .set_type(100, point.clone())
        .set_type(200, point.clone())
        .set_type(300, point)
        .add_function(func(
            "shapes",
            "Grow",
            90,
            vec![
                field_write("p", "X", AssignOp::Assign, 100),
                field_write("p", "Y", AssignOp::Add, 200),
                field_write("p", "cache", AssignOp::Assign, 300),
            ],
        ));
    model
}

#[allow(dead_code)]
pub fn engine(model: MemoryModel) -> Engine {
    Engine::new(Arc::new(model), PactConfig::default())
}

#[allow(dead_code)]
pub fn codes(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(|v| v.code.as_str()).collect()
}

/// Write `.pact/pact.json` (when given) and `model.json` into a fresh
/// directory. Hold the TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn setup_project(model: &MemoryModel, config: Option<&str>) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();
    fs::write(root.join("model.json"), model.to_json().unwrap()).unwrap();
    if let Some(config) = config {
        fs::create_dir_all(root.join(".pact")).unwrap();
        fs::write(root.join(".pact/pact.json"), config).unwrap();
    }
    (dir, root)
}

/// Get path to the compiled pact binary, building it if needed.
#[allow(dead_code)]
pub fn pact_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove 'deps'
    path.push("pact");
    if !path.exists() {
        let status = Command::new("cargo")
            .args(["build", "-p", "pact-cli"])
            .status()
            .expect("Failed to build pact");
        assert!(status.success(), "Failed to build pact binary");
    }
    path
}
