//! Output formatters for pact results.
//!
//! - **JSON** (`--json`): machine-readable structured output
//! - **Human** (default): one line per violation plus a summary

pub mod human;
pub mod json;

use pact_core::types::ContractFacts;
use pact_enforce::types::CheckResult;

pub trait OutputFormatter {
    fn format_check(&self, result: &CheckResult) -> String;
    fn format_facts(&self, facts: &[ContractFacts]) -> String;
}
