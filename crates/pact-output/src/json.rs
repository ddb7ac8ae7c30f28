use crate::OutputFormatter;
use pact_core::types::ContractFacts;
use pact_enforce::types::CheckResult;

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }

    fn format_facts(&self, facts: &[ContractFacts]) -> String {
        serde_json::to_string_pretty(facts).unwrap_or_default()
    }
}
