//! pact CLI: enforce source contracts over a serialized Program Model.
//!
//! `pact check --model <dump.json>` analyzes every module and exits 0 when
//! clean, 1 on violations, 2 on usage or load errors. See `pact --help`.

use clap::Parser;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

/// Logs go to stderr so stdout stays machine-readable. `PACT_LOG` overrides
/// the level picked from `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env("PACT_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter: Box<dyn pact_output::OutputFormatter> = if cli.json {
        Box::new(pact_output::json::JsonFormatter)
    } else {
        Box::new(pact_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Check {
            model,
            config_dir,
            suppress,
            facts,
            export_facts,
            modules,
        } => commands::check::run(
            &*formatter,
            commands::check::CheckArgs {
                model,
                config_dir,
                suppress,
                facts,
                export_facts,
                modules,
            },
        ),
        Commands::Facts { model, config_dir } => {
            commands::facts::run(&*formatter, model, config_dir)
        }
    };

    std::process::exit(exit_code);
}
