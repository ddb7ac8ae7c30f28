//! Structural interface conformance (IMPL01..IMPL04).
//!
//! Every `implements` requirement of the module is resolved to an interface
//! shape and a type shape and compared method by method. Unmet methods of one
//! requirement are reported together in a single violation. None of these
//! violations can be suppressed.

use pact_core::model::ProgramModel;
use pact_core::types::{
    normalize_module_path, DeclRef, InterfaceShape, MethodSignature, QualifiedName, ResolveError,
    TypeShape,
};

use super::CheckContext;
use crate::codes;
use crate::types::Violation;

/// One required method the type does not provide as declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unmet<'a> {
    Missing(&'a MethodSignature),
    Mismatched {
        want: &'a MethodSignature,
        have: &'a MethodSignature,
    },
}

impl std::fmt::Display for Unmet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unmet::Missing(want) => write!(f, "missing {}", want),
            Unmet::Mismatched { want, have } => {
                write!(f, "wrong signature for {}: have {}, want {}", want.name, have, want)
            }
        }
    }
}

/// Required methods of `iface` that `ty` fails to provide. With
/// `pointer_required` both value and pointer receivers count; otherwise only
/// value receivers do.
pub fn unmet_methods<'a>(
    iface: &'a InterfaceShape,
    ty: &'a TypeShape,
    pointer_required: bool,
) -> Vec<Unmet<'a>> {
    let candidates: Vec<&MethodSignature> = ty.candidate_methods(pointer_required).collect();
    iface
        .methods
        .iter()
        .filter_map(|want| {
            let same_name: Vec<&MethodSignature> = candidates
                .iter()
                .copied()
                .filter(|m| m.name == want.name)
                .collect();
            if same_name.iter().any(|m| m.matches(want)) {
                return None;
            }
            Some(match same_name.first().copied() {
                Some(have) => Unmet::Mismatched { want, have },
                None => Unmet::Missing(want),
            })
        })
        .collect()
}

/// Interface shape for `name`, resolving its module through the fact store.
fn resolve_interface(
    ctx: &CheckContext<'_>,
    name: &QualifiedName,
) -> Result<InterfaceShape, ResolveError> {
    let module = normalize_module_path(&name.module_path);
    ctx.store.get(&module).require(&module)?;
    let methods = ctx
        .model
        .lookup(&module, &name.name)
        .and_then(|decl| ctx.model.interface_methods(&decl.id))
        .ok_or_else(|| ResolveError::InterfaceNotFound(name.clone()))?;
    Ok(InterfaceShape {
        name: name.name.clone(),
        module_path: module,
        methods: methods.into_iter().collect(),
    })
}

fn resolve_type(model: &dyn ProgramModel, type_ref: &DeclRef) -> Result<TypeShape, ResolveError> {
    let not_found = || {
        ResolveError::TypeNotFound(QualifiedName::new(
            type_ref.module_path.clone(),
            type_ref.name.clone(),
        ))
    };
    let decl = model
        .lookup(&type_ref.module_path, &type_ref.name)
        .ok_or_else(not_found)?;
    let methods = model.method_set(&decl.id).ok_or_else(not_found)?;
    Ok(TypeShape {
        name: type_ref.name.clone(),
        module_path: type_ref.module_path.clone(),
        methods,
    })
}

fn resolve_error_code(err: &ResolveError) -> &'static str {
    match err {
        ResolveError::ModuleNotFound(_) => codes::IMPL_MODULE_NOT_FOUND,
        ResolveError::InterfaceNotFound(_) => codes::IMPL_INTERFACE_NOT_FOUND,
        ResolveError::TypeNotFound(_) => codes::IMPL_TYPE_NOT_FOUND,
    }
}

/// Check every interface requirement declared in the context's module.
pub fn check_requirements(ctx: &CheckContext<'_>) -> Vec<Violation> {
    let facts = ctx.facts_of(ctx.module);
    let mut violations = Vec::new();

    for (type_ref, interface_ref, pointer_required) in facts.requirements() {
        let shapes = resolve_interface(ctx, interface_ref)
            .and_then(|iface| Ok((iface, resolve_type(ctx.model, type_ref)?)));
        let (iface, ty) = match shapes {
            Ok(shapes) => shapes,
            Err(err) => {
                tracing::debug!(
                    module = %ctx.module,
                    ty = %type_ref.name,
                    error = %err,
                    "implements requirement unresolved"
                );
                violations.push(
                    Violation::new(
                        resolve_error_code(&err),
                        ctx.module,
                        type_ref.position,
                        format!("`{}` implements {}: {}", type_ref.name, interface_ref, err),
                    )
                    .with_hint("fix or remove the implements annotation".to_string()),
                );
                continue;
            }
        };

        let unmet = unmet_methods(&iface, &ty, pointer_required);
        if unmet.is_empty() {
            continue;
        }
        let receivers = if pointer_required {
            "value or pointer receivers"
        } else {
            "value receivers"
        };
        let details: Vec<String> = unmet.iter().map(ToString::to_string).collect();
        violations.push(
            Violation::new(
                codes::IMPL_MISSING_METHODS,
                ctx.module,
                type_ref.position,
                format!(
                    "`{}` does not implement {} (with {}): {}",
                    type_ref.name,
                    interface_ref,
                    receivers,
                    details.join("; ")
                ),
            )
            .with_hint(if pointer_required {
                "add the listed methods".to_string()
            } else {
                format!(
                    "add the listed methods with value receivers, or require `*{}`",
                    interface_ref.name
                )
            }),
        );
    }
    violations
}

#[cfg(test)]
#[path = "implements_tests.rs"]
mod tests;
