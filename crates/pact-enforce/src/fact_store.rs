//! Memoizing, cross-module fact cache.
//!
//! Each module path is resolved through the [`FactProvider`] at most once per
//! run, even when several threads ask for it at the same time. Keys are
//! normalized module paths, so a module reached through different import
//! aliases is still computed once.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use pact_core::types::{normalize_module_path, ContractFacts, ResolveError};

/// Source of contract facts for a module. Drivers implement this; the
/// [`FactStore`] memoizes it.
pub trait FactProvider: Send + Sync {
    /// Facts declared by `module_path`, or `None` if the module is unknown.
    fn get_facts(&self, module_path: &str) -> Option<ContractFacts>;
}

/// Result of a fact query. "Not found" is distinct from "found, zero facts".
#[derive(Debug, Clone)]
pub enum FactLookup {
    Found(Arc<ContractFacts>),
    NotFound,
}

impl FactLookup {
    pub fn found(&self) -> Option<&Arc<ContractFacts>> {
        match self {
            FactLookup::Found(facts) => Some(facts),
            FactLookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FactLookup::Found(_))
    }

    /// For callers that require the module to resolve.
    pub fn require(self, module_path: &str) -> Result<Arc<ContractFacts>, ResolveError> {
        match self {
            FactLookup::Found(facts) => Ok(facts),
            FactLookup::NotFound => Err(ResolveError::ModuleNotFound(module_path.to_string())),
        }
    }
}

type Cell = Arc<OnceLock<Option<Arc<ContractFacts>>>>;

pub struct FactStore {
    provider: Box<dyn FactProvider>,
    cells: Mutex<HashMap<String, Cell>>,
}

impl FactStore {
    pub fn new(provider: Box<dyn FactProvider>) -> Self {
        Self {
            provider,
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Facts for `module_path`, computed on first access and cached.
    pub fn get(&self, module_path: &str) -> FactLookup {
        let key = normalize_module_path(module_path);
        let cell = {
            let mut cells = self.cells.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(cells.entry(key.clone()).or_default())
        };
        // The map lock is released before computing; other keys proceed in
        // parallel while callers of this key block on the cell.
        let value = cell.get_or_init(|| {
            let facts = self.provider.get_facts(&key).map(Arc::new);
            match &facts {
                Some(f) => tracing::debug!(module = %key, facts = f.len(), "facts resolved"),
                None => tracing::debug!(module = %key, "module not found"),
            }
            facts
        });
        match value {
            Some(facts) => FactLookup::Found(Arc::clone(facts)),
            None => FactLookup::NotFound,
        }
    }

    /// Facts for `module_path`, treating an unresolved module as contributing
    /// nothing.
    pub fn get_or_empty(&self, module_path: &str) -> Arc<ContractFacts> {
        match self.get(module_path) {
            FactLookup::Found(facts) => facts,
            FactLookup::NotFound => Arc::new(ContractFacts::new(normalize_module_path(module_path))),
        }
    }

    /// Number of module paths queried so far (found or not).
    pub fn cached_modules(&self) -> usize {
        self.cells.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Every resolved module's facts, sorted by module path, for propagation
    /// to later runs.
    pub fn export(&self) -> Vec<ContractFacts> {
        let cells = self.cells.lock().unwrap_or_else(|e| e.into_inner());
        let mut out: Vec<ContractFacts> = cells
            .values()
            .filter_map(|cell| cell.get().and_then(|v| v.as_deref().cloned()))
            .collect();
        out.sort_by(|a, b| a.module_path.cmp(&b.module_path));
        out
    }
}

/// Facts carried over from an earlier run, optionally backed by a live
/// provider for modules the export does not cover.
pub struct PrecomputedFacts {
    facts: HashMap<String, ContractFacts>,
    fallback: Option<Box<dyn FactProvider>>,
}

impl PrecomputedFacts {
    pub fn new(exports: Vec<ContractFacts>) -> Self {
        let facts = exports
            .into_iter()
            .map(|f| (normalize_module_path(&f.module_path), f))
            .collect();
        Self {
            facts,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn FactProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl FactProvider for PrecomputedFacts {
    fn get_facts(&self, module_path: &str) -> Option<ContractFacts> {
        if let Some(facts) = self.facts.get(&normalize_module_path(module_path)) {
            return Some(facts.clone());
        }
        self.fallback.as_ref()?.get_facts(module_path)
    }
}
