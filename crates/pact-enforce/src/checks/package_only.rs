//! PKG01: package-only items may be used from their own module and from the
//! modules they list.

use pact_core::model::FunctionBody;
use pact_core::types::normalize_module_path;

use super::test_only::resolved_uses;
use super::CheckContext;
use crate::codes;
use crate::types::Violation;

pub fn check_function(ctx: &CheckContext<'_>, func: &FunctionBody) -> Vec<Violation> {
    let here = normalize_module_path(ctx.module);
    let mut violations = Vec::new();

    for (pos, used) in resolved_uses(ctx, func) {
        let home = normalize_module_path(&used.module_path);
        if home == here || is_test_variant(ctx, &here, &home) {
            continue;
        }
        let Some(allowed) = ctx.facts_of(&home).package_only(&used) else {
            continue;
        };
        if allowed.contains(&here) {
            continue;
        }
        let list: Vec<&str> = allowed.iter().map(String::as_str).collect();
        violations.push(
            Violation::new(
                codes::PACKAGE_ONLY_USE,
                ctx.module,
                pos,
                format!(
                    "`{}` is restricted to package {} and cannot be used from {}",
                    used.qualified(),
                    home,
                    here
                ),
            )
            .with_hint(if list.is_empty() {
                format!("only {} may use it", home)
            } else {
                format!("only {} and {} may use it", home, list.join(", "))
            }),
        );
    }
    violations
}

/// External test package of the declaring module (`lib_test` for `lib`).
fn is_test_variant(ctx: &CheckContext<'_>, here: &str, home: &str) -> bool {
    ctx.config
        .test_module_suffixes
        .iter()
        .any(|suffix| here.strip_suffix(suffix.as_str()) == Some(home))
}
