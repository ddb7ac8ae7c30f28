use std::path::PathBuf;

use pact_core::config::PactConfig;
use pact_enforce::engine::Engine;
use pact_output::OutputFormatter;

use super::load_model;

/// Run `pact facts`: resolve and print the contract facts of every
/// non-excluded module.
pub fn run(formatter: &dyn OutputFormatter, model: PathBuf, config_dir: PathBuf) -> i32 {
    let config = PactConfig::load(&config_dir);
    let Some(model) = load_model("facts", &model) else {
        return 2;
    };

    let modules = model.modules();
    let engine = Engine::new(model, config);
    for module in modules.iter().filter(|m| !engine.is_excluded(m)) {
        engine.store().get_or_empty(module);
    }

    let facts = engine.export_facts();
    print!("{}", formatter.format_facts(&facts));
    0
}
