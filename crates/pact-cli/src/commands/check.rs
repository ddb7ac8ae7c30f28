use std::path::PathBuf;
use std::sync::Arc;

use pact_core::config::PactConfig;
use pact_enforce::engine::Engine;
use pact_enforce::fact_store::PrecomputedFacts;
use pact_enforce::facts::ModelFactProvider;
use pact_enforce::types::CheckResult;
use pact_output::OutputFormatter;

use super::load_model;

pub struct CheckArgs {
    pub model: PathBuf,
    pub config_dir: PathBuf,
    pub suppress: Vec<String>,
    pub facts: Option<PathBuf>,
    pub export_facts: Option<PathBuf>,
    pub modules: Vec<String>,
}

/// Run `pact check`. Exit code 0 when clean, 1 on violations, 2 on errors.
pub fn run(formatter: &dyn OutputFormatter, args: CheckArgs) -> i32 {
    let config = PactConfig::load(&args.config_dir);
    let Some(model) = load_model("check", &args.model) else {
        return 2;
    };

    let mut engine = match &args.facts {
        Some(path) => {
            let json = match std::fs::read_to_string(path) {
                Ok(j) => j,
                Err(e) => {
                    eprintln!("pact check: failed to read facts {}: {}", path.display(), e);
                    return 2;
                }
            };
            let precomputed = match PrecomputedFacts::from_json(&json) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("pact check: invalid facts file {}: {}", path.display(), e);
                    return 2;
                }
            };
            // Modules missing from the file are extracted from the model.
            let fallback =
                ModelFactProvider::new(Arc::clone(&model), config.directive_prefix.clone());
            let provider = precomputed.with_fallback(Box::new(fallback));
            Engine::with_provider(model, config, Box::new(provider))
        }
        None => Engine::new(model, config),
    };
    for code in &args.suppress {
        engine.suppress(code);
    }

    let result = if args.modules.is_empty() {
        engine.check_all()
    } else {
        let reports = args
            .modules
            .iter()
            .map(|m| engine.check_module(m))
            .collect();
        CheckResult::from_reports(reports)
    };

    if let Some(path) = &args.export_facts {
        let exported = engine.export_facts();
        let json = match serde_json::to_string_pretty(&exported) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("pact check: failed to serialize facts: {}", e);
                return 2;
            }
        };
        if let Err(e) = std::fs::write(path, json) {
            eprintln!("pact check: failed to write facts {}: {}", path.display(), e);
            return 2;
        }
        tracing::info!(path = %path.display(), modules = exported.len(), "facts exported");
    }

    let output = formatter.format_check(&result);
    if !output.is_empty() {
        print!("{}", output);
    }

    if result.is_clean() {
        0
    } else {
        1
    }
}
