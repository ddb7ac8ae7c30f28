use std::sync::Arc;

use globset::GlobSet;
use pact_core::config::PactConfig;
use pact_core::model::ProgramModel;
use pact_core::types::ContractFacts;
use rayon::prelude::*;

use crate::checks::{self, CheckContext};
use crate::fact_store::{FactProvider, FactStore};
use crate::facts::ModelFactProvider;
use crate::suppress::{self, IgnoreIndex, SuppressionManager};
use crate::types::{CheckResult, ModuleReport, Violation};

/// Core enforcement engine. Shares one Program Model and one fact cache
/// across every module it analyzes.
pub struct Engine {
    model: Arc<dyn ProgramModel>,
    config: PactConfig,
    store: FactStore,
    suppressions: SuppressionManager,
    exclude: GlobSet,
}

impl Engine {
    /// Engine whose facts are extracted from the model's own annotations.
    pub fn new(model: Arc<dyn ProgramModel>, config: PactConfig) -> Self {
        let provider =
            ModelFactProvider::new(Arc::clone(&model), config.directive_prefix.clone());
        Self::with_provider(model, config, Box::new(provider))
    }

    /// Engine with a custom fact source, e.g. facts carried over from an
    /// earlier run.
    pub fn with_provider(
        model: Arc<dyn ProgramModel>,
        config: PactConfig,
        provider: Box<dyn FactProvider>,
    ) -> Self {
        let suppressions = SuppressionManager::from_codes(&config.suppress);
        let exclude = config.exclude_matcher();
        Self {
            model,
            config,
            store: FactStore::new(provider),
            suppressions,
            exclude,
        }
    }

    pub fn config(&self) -> &PactConfig {
        &self.config
    }

    pub fn store(&self) -> &FactStore {
        &self.store
    }

    /// Add a project-wide suppression on top of the configured ones.
    pub fn suppress(&mut self, code: &str) {
        self.suppressions.suppress(code);
    }

    pub fn is_excluded(&self, module: &str) -> bool {
        self.exclude.is_match(module)
    }

    /// Analyze one module: run the enabled evaluators, then drop whatever
    /// the module's ignore directives or the configuration suppress.
    pub fn check_module(&self, module: &str) -> ModuleReport {
        let mut raw = self.evaluate(module);
        for v in &mut raw {
            v.line = self.model.line_of(module, v.position).unwrap_or(0);
        }

        // Comments are only scanned when something could be suppressed.
        let index = if raw.iter().any(Violation::is_suppressible) {
            suppress::index_module(&*self.model, module, &self.config.directive_prefix)
        } else {
            IgnoreIndex::default()
        };
        let (violations, suppressed) = suppress::filter(raw, &index, &self.suppressions);

        tracing::debug!(
            module = %module,
            violations = violations.len(),
            suppressed,
            "module checked"
        );
        ModuleReport {
            module: module.to_string(),
            violations,
            suppressed,
        }
    }

    fn evaluate(&self, module: &str) -> Vec<Violation> {
        let enforce = &self.config.enforce;
        let ctx = CheckContext::new(&*self.model, module, &self.store, &self.config);
        let mut raw = Vec::new();

        if enforce.implements {
            raw.extend(checks::implements::check_requirements(&ctx));
        }
        for func in self.model.functions(module) {
            if enforce.immutable {
                raw.extend(checks::immutable::check_function(&ctx, &func));
            }
            if enforce.constructor {
                raw.extend(checks::construct::check_function(&ctx, &func));
            }
            if enforce.test_only {
                raw.extend(checks::test_only::check_function(&ctx, &func));
            }
            if enforce.package_only {
                raw.extend(checks::package_only::check_function(&ctx, &func));
            }
        }
        raw
    }

    /// Analyze every non-excluded module in parallel.
    pub fn check_all(&self) -> CheckResult {
        let modules: Vec<String> = self
            .model
            .modules()
            .into_iter()
            .filter(|m| !self.is_excluded(m))
            .collect();
        let reports: Vec<ModuleReport> = modules
            .par_iter()
            .map(|module| self.check_module(module))
            .collect();
        let result = CheckResult::from_reports(reports);
        tracing::info!(
            modules = result.modules_analyzed.len(),
            violations = result.violations.len(),
            suppressed = result.suppressed_count,
            "check complete"
        );
        result
    }

    /// Facts of every module resolved so far, for reuse in a later run.
    pub fn export_facts(&self) -> Vec<ContractFacts> {
        self.store.export()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
