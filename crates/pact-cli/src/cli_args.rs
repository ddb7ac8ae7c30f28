use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pact", version, about = "Source contract enforcement")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log run summaries to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Check every module of a Program Model dump against its contracts
    Check {
        /// Program Model dump (JSON)
        #[arg(long, env = "PACT_MODEL")]
        model: PathBuf,
        /// Directory holding pact.json
        #[arg(long, default_value = ".pact")]
        config_dir: PathBuf,
        /// Suppress a code, category, or ALL (repeatable, comma-separated)
        #[arg(long, value_delimiter = ',')]
        suppress: Vec<String>,
        /// Facts exported by an earlier run, used before extracting anew
        #[arg(long)]
        facts: Option<PathBuf>,
        /// Write the facts resolved during this run to a file
        #[arg(long)]
        export_facts: Option<PathBuf>,
        /// Only check these modules (default: all)
        #[arg(long = "module")]
        modules: Vec<String>,
    },

    /// List the contract facts each module declares
    Facts {
        /// Program Model dump (JSON)
        #[arg(long, env = "PACT_MODEL")]
        model: PathBuf,
        /// Directory holding pact.json
        #[arg(long, default_value = ".pact")]
        config_dir: PathBuf,
    },
}
