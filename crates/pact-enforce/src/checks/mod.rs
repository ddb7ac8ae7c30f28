//! Contract evaluators. Each one reads facts through the [`FactStore`] and
//! returns raw violations; suppression is applied afterwards by the engine.

pub mod construct;
pub mod immutable;
pub mod implements;
pub mod package_only;
pub mod test_only;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use pact_core::config::PactConfig;
use pact_core::model::ProgramModel;
use pact_core::types::{normalize_module_path, ContractFacts, DeclRef, Pos, TypeRef};

use crate::fact_store::FactStore;

/// Everything an evaluator needs to analyze one module.
pub struct CheckContext<'a> {
    pub model: &'a dyn ProgramModel,
    pub module: &'a str,
    pub store: &'a FactStore,
    pub config: &'a PactConfig,
}

impl<'a> CheckContext<'a> {
    pub fn new(
        model: &'a dyn ProgramModel,
        module: &'a str,
        store: &'a FactStore,
        config: &'a PactConfig,
    ) -> Self {
        Self {
            model,
            module,
            store,
            config,
        }
    }

    /// Facts declared by `module_path`; an unresolved module contributes none.
    pub fn facts_of(&self, module_path: &str) -> Arc<ContractFacts> {
        self.store.get_or_empty(module_path)
    }

    /// Nominal type of the expression at `pos`, one level of indirection
    /// removed. `None` for predeclared or unknown types.
    pub fn named_type_at(&self, pos: Pos) -> Option<TypeRef> {
        let ty = self.model.type_of(self.module, pos)?;
        if ty.owning_module.is_empty() {
            return None;
        }
        Some(ty.unwrap_indirect())
    }

    /// `func` may build or mutate `ty` only when it is listed as one of the
    /// type's constructors in the type's own module, and lives there too.
    pub fn is_authorized_constructor(&self, func: &DeclRef, ty: &TypeRef) -> bool {
        if normalize_module_path(&func.module_path) != normalize_module_path(&ty.owning_module) {
            return false;
        }
        self.facts_of(&ty.owning_module)
            .constructors_for(&ty.base_name)
            .is_some_and(|names| names.contains(&func.name))
    }
}

/// Fix hint naming the constructors a type may be built in.
pub(crate) fn constructor_hint(facts: &ContractFacts, ty: &TypeRef) -> Option<String> {
    let names = facts.constructors_for(&ty.base_name)?;
    if names.is_empty() {
        return None;
    }
    let list: Vec<&str> = names.iter().map(String::as_str).collect();
    Some(format!(
        "move this into a constructor of `{}` ({})",
        ty.base_name,
        list.join(", ")
    ))
}
