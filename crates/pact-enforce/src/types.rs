use pact_core::types::Pos;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub code: String,
    pub category: String,
    pub message: String,
    pub module: String,
    pub position: Pos,
    /// 0 when the Program Model cannot map the position to a line.
    pub line: u32,
    pub fix_hint: Option<String>,
}

impl Violation {
    pub fn new(code: &str, module: &str, position: Pos, message: String) -> Self {
        Self {
            code: code.to_string(),
            category: crate::codes::family(code).to_string(),
            message,
            module: module.to_string(),
            position,
            line: 0,
            fix_hint: None,
        }
    }

    pub fn with_hint(mut self, hint: String) -> Self {
        self.fix_hint = Some(hint);
        self
    }

    pub fn is_suppressible(&self) -> bool {
        crate::codes::is_suppressible(&self.code)
    }
}

/// Outcome of analyzing one module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleReport {
    pub module: String,
    pub violations: Vec<Violation>,
    /// Violations removed by ignore directives or configured suppressions.
    pub suppressed: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "error"
    pub modules_analyzed: Vec<String>,
    pub violations: Vec<Violation>,
    pub suppressed_count: u32,
}

impl CheckResult {
    pub fn from_reports(mut reports: Vec<ModuleReport>) -> Self {
        reports.sort_by(|a, b| a.module.cmp(&b.module));
        let modules_analyzed = reports.iter().map(|r| r.module.clone()).collect();
        let suppressed_count = reports.iter().map(|r| r.suppressed).sum();
        let mut violations: Vec<Violation> =
            reports.into_iter().flat_map(|r| r.violations).collect();
        violations.sort_by(|a, b| {
            (&a.module, a.position, &a.code).cmp(&(&b.module, b.position, &b.code))
        });
        let status = if violations.is_empty() { "ok" } else { "error" };

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "check".to_string(),
            status: status.to_string(),
            modules_analyzed,
            violations,
            suppressed_count,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
