//! Mutation detector (IMM01..IMM05).
//!
//! Only explicit syntactic mutation of a field or of a dereferenced receiver
//! is modeled. Writes into a field whose type is a builtin map, element
//! deletion, writes through aliases and escaped references are not tracked.
//! A field typed with a named map type cannot be told apart from a slice and
//! still reports IMM02.

use pact_core::model::{AssignOp, Expr, FunctionBody, Stmt};
use pact_core::types::{Pos, TypeRef};

use super::{constructor_hint, CheckContext};
use crate::codes;
use crate::types::Violation;
use crate::visit::{self, Visitor};

/// Mutation forms found in one function, before type resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mutation<'a> {
    /// `x.f = v` / `x.f += v`
    Field {
        base: &'a Expr,
        field: &'a str,
        pos: Pos,
        op: &'static str,
        compound: bool,
    },
    /// `x.f[i] = v`, including inc/dec and compound forms
    Element {
        base: &'a Expr,
        field: &'a str,
        pos: Pos,
    },
    /// `x.f++` / `x.f--`
    IncDec {
        base: &'a Expr,
        field: &'a str,
        pos: Pos,
        op: &'static str,
    },
    /// `*recv = v`, `*recv++`
    Rebind { pos: Pos },
}

struct Collector<'a> {
    receiver: Option<&'a str>,
    found: Vec<Mutation<'a>>,
}

impl<'a> Collector<'a> {
    /// Classify one assignment target. Each statement target yields at most
    /// one mutation.
    fn target(&mut self, target: &'a Expr, op: &'static str, compound: bool, inc_dec: bool) {
        match target {
            Expr::Selector { base, field, pos } => {
                let mutation = if inc_dec {
                    Mutation::IncDec {
                        base,
                        field,
                        pos: *pos,
                        op,
                    }
                } else {
                    Mutation::Field {
                        base,
                        field,
                        pos: *pos,
                        op,
                        compound,
                    }
                };
                self.found.push(mutation);
            }
            Expr::Index { .. } => {
                if let Some((base, field, pos)) = indexed_field(target) {
                    self.found.push(Mutation::Element { base, field, pos });
                }
            }
            Expr::Deref { inner, pos } => {
                let is_receiver = matches!(
                    (inner.as_ref(), self.receiver),
                    (Expr::Ident { name, .. }, Some(recv)) if name == recv
                );
                if is_receiver {
                    self.found.push(Mutation::Rebind { pos: *pos });
                }
            }
            _ => {}
        }
    }
}

impl<'a> Visitor<'a> for Collector<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::Assign { lhs, op, .. } => {
                if *op == AssignOp::Define {
                    return;
                }
                for target in lhs {
                    self.target(target, op.as_str(), op.is_compound(), false);
                }
            }
            Stmt::IncDec { target, op, .. } => self.target(target, op.as_str(), false, true),
            Stmt::Expr { .. } | Stmt::Nested { .. } => {}
        }
    }
}

/// `x.f[i][j]` -> (`x`, `f`, position of `x.f`).
fn indexed_field(expr: &Expr) -> Option<(&Expr, &str, Pos)> {
    let mut cur = expr;
    while let Expr::Index { base, .. } = cur {
        cur = base;
    }
    match cur {
        Expr::Selector { base, field, pos } => Some((base.as_ref(), field.as_str(), *pos)),
        _ => None,
    }
}

/// Every mutation of an immutable type inside `func`.
pub fn check_function(ctx: &CheckContext<'_>, func: &FunctionBody) -> Vec<Violation> {
    let receiver = func.receiver.as_ref();
    let mut collector = Collector {
        receiver: receiver.and_then(|r| r.name.as_deref()),
        found: Vec::new(),
    };
    visit::walk_body(&mut collector, &func.body);

    let mut violations = Vec::new();
    for mutation in collector.found {
        if let Mutation::Element { pos, .. } = &mutation {
            if is_keyed_collection(ctx, *pos) {
                continue;
            }
        }
        let (ty, field, pos) = match &mutation {
            Mutation::Field { base, field, pos, .. }
            | Mutation::Element { base, field, pos }
            | Mutation::IncDec { base, field, pos, .. } => {
                let Some(ty) = ctx.named_type_at(base.pos()) else {
                    continue;
                };
                (ty, Some(*field), *pos)
            }
            Mutation::Rebind { pos } => {
                let Some(recv) = receiver else { continue };
                (recv.type_ref.unwrap_indirect(), None, *pos)
            }
        };

        let facts = ctx.facts_of(&ty.owning_module);
        if !facts.is_immutable(&ty.base_name) {
            continue;
        }
        if field.is_some_and(|f| facts.is_mutable_field(&ty.base_name, f)) {
            continue;
        }
        if ctx.is_authorized_constructor(&func.decl, &ty) {
            continue;
        }

        let (code, message) = describe(&mutation, &ty);
        let mut v = Violation::new(code, ctx.module, pos, message);
        if let Some(hint) = constructor_hint(&facts, &ty) {
            v = v.with_hint(hint);
        }
        violations.push(v);
    }
    violations
}

/// Whether the field selected at `pos` is a builtin map.
fn is_keyed_collection(ctx: &CheckContext<'_>, pos: Pos) -> bool {
    ctx.model
        .type_of(ctx.module, pos)
        .is_some_and(|ty| ty.owning_module.is_empty() && ty.base_name.starts_with("map["))
}

fn describe(mutation: &Mutation<'_>, ty: &TypeRef) -> (&'static str, String) {
    let ty = ty.to_string();
    match mutation {
        Mutation::Field {
            field,
            compound: false,
            ..
        } => (
            codes::IMM_FIELD_WRITE,
            format!("cannot assign to field `{}` of immutable type `{}`", field, ty),
        ),
        Mutation::Field { field, op, .. } => (
            codes::IMM_COMPOUND,
            format!("cannot apply `{}` to field `{}` of immutable type `{}`", op, field, ty),
        ),
        Mutation::Element { field, .. } => (
            codes::IMM_ELEMENT_WRITE,
            format!("cannot modify element of field `{}` of immutable type `{}`", field, ty),
        ),
        Mutation::IncDec { field, op, .. } => (
            codes::IMM_INC_DEC,
            format!("cannot apply `{}` to field `{}` of immutable type `{}`", op, field, ty),
        ),
        Mutation::Rebind { .. } => (
            codes::IMM_RECEIVER_REBIND,
            format!("cannot reassign receiver of immutable type `{}`", ty),
        ),
    }
}

#[cfg(test)]
#[path = "immutable_tests.rs"]
mod tests;
