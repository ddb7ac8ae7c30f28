//! TEST01: items marked test-only may only be used from test code.

use pact_core::model::{Expr, FunctionBody};
use pact_core::types::{ContractFact, DeclRef, Pos};

use super::CheckContext;
use crate::codes;
use crate::types::Violation;
use crate::visit::{self, Visitor};

/// Positions of identifiers and selectors, the only expressions that name a
/// declaration.
#[derive(Default)]
pub(crate) struct NameSites {
    pub(crate) positions: Vec<Pos>,
}

impl<'a> Visitor<'a> for NameSites {
    fn visit_expr(&mut self, expr: &'a Expr) {
        if let Expr::Ident { pos, .. } | Expr::Selector { pos, .. } = expr {
            self.positions.push(*pos);
        }
    }
}

/// Every resolved declaration used inside `func`, with its position.
pub(crate) fn resolved_uses(ctx: &CheckContext<'_>, func: &FunctionBody) -> Vec<(Pos, DeclRef)> {
    let mut sites = NameSites::default();
    visit::walk_body(&mut sites, &func.body);
    sites
        .positions
        .into_iter()
        .filter_map(|pos| Some((pos, ctx.model.resolve_use(ctx.module, pos)?)))
        .collect()
}

pub fn check_function(ctx: &CheckContext<'_>, func: &FunctionBody) -> Vec<Violation> {
    if ctx.config.is_test_code(ctx.module, &func.file) {
        return Vec::new();
    }
    // Test helpers may lean on each other.
    if ctx.facts_of(ctx.module).test_only(&func.decl).is_some() {
        return Vec::new();
    }

    let mut violations = Vec::new();
    for (pos, used) in resolved_uses(ctx, func) {
        let facts = ctx.facts_of(&used.module_path);
        let Some(ContractFact::TestOnly {
            object_kind,
            receiver_type,
            ..
        }) = facts.test_only(&used)
        else {
            continue;
        };
        let what = match receiver_type {
            Some(recv) => format!("{} `{}.{}`", object_kind, recv, used.name),
            None => format!("{} `{}`", object_kind, used.qualified()),
        };
        violations.push(
            Violation::new(
                codes::TEST_ONLY_USE,
                ctx.module,
                pos,
                format!("{} is test-only and used outside test code", what),
            )
            .with_hint(format!("move this use into a `{}` file", first_suffix(ctx))),
        );
    }
    violations
}

fn first_suffix(ctx: &CheckContext<'_>) -> String {
    ctx.config
        .test_file_suffixes
        .first()
        .cloned()
        .unwrap_or_else(|| "_test".to_string())
}
