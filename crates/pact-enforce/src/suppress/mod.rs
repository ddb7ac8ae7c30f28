//! Suppression: position-indexed ignore directives plus project-wide
//! suppressions from configuration.
//!
//! Matching is hierarchical. A violation with code `IMM01` at `pos` is
//! suppressed when any directive covering `pos` names `IMM01`, its category
//! `IMM`, or the wildcard `ALL`. Overlapping and disjoint ranges for the same
//! code are unioned; a later directive never shadows an earlier one.
//! Conformance (`IMPL*`) violations are never suppressed.

pub mod scope;

use std::collections::{BTreeSet, HashMap, HashSet};

use pact_core::model::ProgramModel;
use pact_core::types::{Pos, Span};
use serde::{Deserialize, Serialize};

use crate::codes;
use crate::types::Violation;

pub use scope::SpanIndex;

/// One ignore directive with its resolved source range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreDirective {
    pub codes: BTreeSet<String>,
    pub range: Span,
}

impl IgnoreDirective {
    pub fn new<I, S>(names: I, range: Span) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codes: names.into_iter().map(|c| codes::normalize(c.as_ref())).collect(),
            range,
        }
    }
}

/// Frozen, read-only lookup structure over a module's ignore directives.
///
/// Built once; there are no mutating methods, so it can be shared across
/// threads without locking.
#[derive(Debug, Default)]
pub struct IgnoreIndex {
    directives: Vec<IgnoreDirective>,
    /// Literal code (specific, bare category, or `ALL`) -> directive indices,
    /// sorted by range start.
    by_code: HashMap<String, Vec<usize>>,
    bounds: Option<Span>,
}

impl IgnoreIndex {
    pub fn build(directives: impl IntoIterator<Item = IgnoreDirective>) -> Self {
        let directives: Vec<IgnoreDirective> = directives
            .into_iter()
            .filter(|d| !d.codes.is_empty())
            .collect();

        let mut by_code: HashMap<String, Vec<usize>> = HashMap::new();
        let mut bounds: Option<Span> = None;
        for (idx, d) in directives.iter().enumerate() {
            for code in &d.codes {
                by_code.entry(code.clone()).or_default().push(idx);
            }
            bounds = Some(match bounds {
                Some(b) => Span::new(b.start.min(d.range.start), b.end.max(d.range.end)),
                None => d.range,
            });
        }
        for bucket in by_code.values_mut() {
            bucket.sort_by_key(|&i| (directives[i].range.start, i));
        }

        Self {
            directives,
            by_code,
            bounds,
        }
    }

    /// Whether `code` at `pos` is covered by any directive.
    pub fn contains(&self, code: &str, pos: Pos) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if !bounds.contains(pos) {
            return false;
        }
        let code = codes::normalize(code);
        let category = codes::category(&code);
        self.bucket_covers(&code, pos)
            || (category != code && self.bucket_covers(category, pos))
            || self.bucket_covers(codes::ALL, pos)
    }

    fn bucket_covers(&self, code: &str, pos: Pos) -> bool {
        let Some(bucket) = self.by_code.get(code) else {
            return false;
        };
        let started = bucket.partition_point(|&i| self.directives[i].range.start <= pos);
        bucket[..started]
            .iter()
            .any(|&i| self.directives[i].range.end >= pos)
    }

    pub fn directives(&self) -> &[IgnoreDirective] {
        &self.directives
    }

    pub fn bounds(&self) -> Option<Span> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Resolve and index every ignore directive of `module`.
pub fn index_module(model: &dyn ProgramModel, module: &str, prefix: &str) -> IgnoreIndex {
    let directives = scope::resolve_directives(model, module, prefix);
    tracing::debug!(module = %module, directives = directives.len(), "ignore index built");
    IgnoreIndex::build(directives)
}

/// Project-wide suppressions from configuration or the command line.
///
/// Uses the same hierarchy as directives: a configured `IMM` hides every
/// `IMM*` code, `ALL` hides everything suppressible.
#[derive(Debug, Default)]
pub struct SuppressionManager {
    suppressed_codes: HashSet<String>,
}

impl SuppressionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Self {
        let mut mgr = Self::new();
        for code in codes {
            mgr.suppress(code.as_ref());
        }
        mgr
    }

    /// Add a code, category, or `ALL`.
    pub fn suppress(&mut self, code: &str) {
        self.suppressed_codes.insert(codes::normalize(code));
    }

    pub fn is_suppressed(&self, code: &str) -> bool {
        if !codes::is_suppressible(code) {
            return false;
        }
        let code = codes::normalize(code);
        self.suppressed_codes.contains(&code)
            || self.suppressed_codes.contains(codes::category(&code))
            || self.suppressed_codes.contains(codes::ALL)
    }

    pub fn count(&self) -> usize {
        self.suppressed_codes.len()
    }
}

/// Drop suppressible violations covered by `index` or `manager`. Returns the
/// survivors and how many were dropped.
pub fn filter(
    violations: Vec<Violation>,
    index: &IgnoreIndex,
    manager: &SuppressionManager,
) -> (Vec<Violation>, u32) {
    let mut suppressed = 0u32;
    let kept = violations
        .into_iter()
        .filter(|v| {
            let hidden = v.is_suppressible()
                && (index.contains(&v.code, v.position) || manager.is_suppressed(&v.code));
            if hidden {
                suppressed += 1;
            }
            !hidden
        })
        .collect();
    (kept, suppressed)
}
