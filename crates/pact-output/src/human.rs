use crate::OutputFormatter;
use pact_core::types::ContractFacts;
use pact_enforce::types::{CheckResult, Violation};

pub struct HumanFormatter;

fn format_violation(v: &Violation) -> String {
    let mut out = format!("{}:{}: {} {}\n", v.module, v.line, v.code, v.message);
    if let Some(fix) = &v.fix_hint {
        out.push_str(&format!("   = fix: {}\n", fix));
    }
    out
}

impl OutputFormatter for HumanFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        if result.is_clean() {
            return String::new(); // Clean run = empty stdout
        }

        let mut out = String::new();
        for v in &result.violations {
            out.push_str(&format_violation(v));
        }
        out.push_str(&format!(
            "\n{} violation(s) in {} module(s), {} suppressed\n",
            result.violations.len(),
            result.modules_analyzed.len(),
            result.suppressed_count,
        ));
        out
    }

    fn format_facts(&self, facts: &[ContractFacts]) -> String {
        let mut out = String::new();
        for module in facts.iter().filter(|f| !f.is_empty()) {
            out.push_str(&format!(
                "{} ({} fact(s), {})\n",
                module.module_path,
                module.len(),
                module.fingerprint()
            ));
        }
        out
    }
}
