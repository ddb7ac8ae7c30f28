//! Construction checker (CTOR01, CTOR02): a constructor-restricted type may
//! only be instantiated inside one of its declared constructors.

use pact_core::model::{Expr, FunctionBody};
use pact_core::types::{Pos, TypeRef};

use super::{constructor_hint, CheckContext};
use crate::codes;
use crate::types::Violation;
use crate::visit::{self, Visitor};

enum Site {
    Literal,
    New,
}

struct Collector<'c, 'm> {
    ctx: &'c CheckContext<'m>,
    found: Vec<(Site, Pos, TypeRef)>,
}

impl<'a> Visitor<'a> for Collector<'_, '_> {
    fn visit_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::CompositeLit { pos, .. } => {
                if let Some(ty) = self.ctx.named_type_at(*pos) {
                    self.found.push((Site::Literal, *pos, ty));
                }
            }
            Expr::Call { func, args, pos } => {
                let Expr::Ident { name, pos: fpos } = func.as_ref() else {
                    return;
                };
                // A user-defined `new` shadows the builtin and resolves.
                if name != "new" || self.ctx.model.resolve_use(self.ctx.module, *fpos).is_some() {
                    return;
                }
                let ty = self
                    .ctx
                    .named_type_at(*pos)
                    .or_else(|| args.first().and_then(|a| self.ctx.named_type_at(a.pos())));
                if let Some(ty) = ty {
                    self.found.push((Site::New, *pos, ty));
                }
            }
            _ => {}
        }
    }
}

/// Instantiations of constructor-restricted types outside their constructors.
pub fn check_function(ctx: &CheckContext<'_>, func: &FunctionBody) -> Vec<Violation> {
    let mut collector = Collector {
        ctx,
        found: Vec::new(),
    };
    visit::walk_body(&mut collector, &func.body);

    let mut violations = Vec::new();
    for (site, pos, ty) in collector.found {
        let facts = ctx.facts_of(&ty.owning_module);
        if facts.constructors_for(&ty.base_name).is_none() {
            continue;
        }
        if ctx.is_authorized_constructor(&func.decl, &ty) {
            continue;
        }
        let (code, message) = match site {
            Site::Literal => (
                codes::CTOR_LITERAL,
                format!("composite literal of `{}` outside its constructors", ty),
            ),
            Site::New => (
                codes::CTOR_NEW,
                format!("`new({})` outside its constructors", ty),
            ),
        };
        let mut v = Violation::new(code, ctx.module, pos, message);
        if let Some(hint) = constructor_hint(&facts, &ty) {
            v = v.with_hint(hint);
        }
        violations.push(v);
    }
    violations
}
