//! Fixtures shared by the evaluator tests.

use std::sync::Arc;

use pact_core::config::PactConfig;
use pact_core::memory::MemoryModel;
use pact_core::model::{
    Annotation, DeclKind, Declaration, FunctionBody, ProgramModel, Receiver, Stmt,
};
use pact_core::types::{DeclRef, Pos, Span, TypeRef};

use super::CheckContext;
use crate::fact_store::FactStore;
use crate::facts::ModelFactProvider;
use crate::types::Violation;

pub(crate) fn type_decl(module: &str, name: &str, pos: Pos, notes: &[&str]) -> Declaration {
    Declaration {
        id: DeclRef::new(module, name, pos),
        kind: DeclKind::Type,
        span: Span::new(pos, pos + 9),
        receiver: None,
        annotations: notes
            .iter()
            .map(|t| Annotation::new(*t, pos.saturating_sub(1)))
            .collect(),
        fields: vec![],
    }
}

pub(crate) fn func(module: &str, name: &str, pos: Pos, body: Vec<Stmt>) -> FunctionBody {
    FunctionBody {
        decl: DeclRef::new(module, name, pos),
        file: format!("{}/{}.go", module, module.rsplit('/').next().unwrap_or(module)),
        receiver: None,
        body,
    }
}

pub(crate) fn method(
    module: &str,
    name: &str,
    pos: Pos,
    recv: (&str, TypeRef),
    body: Vec<Stmt>,
) -> FunctionBody {
    FunctionBody {
        receiver: Some(Receiver {
            name: Some(recv.0.to_string()),
            type_ref: recv.1,
        }),
        ..func(module, name, pos, body)
    }
}

/// Run `check` over every function of `module`.
pub(crate) fn run_with<F>(
    model: MemoryModel,
    module: &str,
    config: PactConfig,
    check: F,
) -> Vec<Violation>
where
    F: Fn(&CheckContext<'_>, &FunctionBody) -> Vec<Violation>,
{
    let model = Arc::new(model);
    let store = FactStore::new(Box::new(ModelFactProvider::new(
        model.clone(),
        config.directive_prefix.clone(),
    )));
    let ctx = CheckContext::new(&*model, module, &store, &config);
    model
        .functions(module)
        .iter()
        .flat_map(|f| check(&ctx, f))
        .collect()
}

pub(crate) fn run<F>(model: MemoryModel, module: &str, check: F) -> Vec<Violation>
where
    F: Fn(&CheckContext<'_>, &FunctionBody) -> Vec<Violation>,
{
    run_with(model, module, PactConfig::default(), check)
}

pub(crate) fn codes(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(|v| v.code.as_str()).collect()
}
