//! # SELECT * Analyzer
//!
//! Field-usage inference and explicit-column remediation for ABAP
//! `SELECT *` statements.
//!
//! A `SELECT * FROM tab` statement fetches every column of a table even
//! when the program only reads a few of them. `select-star-analyzer` finds
//! these statements, follows the receiving work area or internal table
//! through loops, lookups and field symbols across the whole batch, and
//! collects the columns the program actually dereferences. When that set
//! is provably complete it proposes a rewrite:
//!
//! ```text
//! SELECT * FROM spfli INTO wa_spfli.
//! ->
//! SELECT carrid connid FROM spfli INTO CORRESPONDING FIELDS OF wa_spfli.
//! ```
//!
//! # Quick Start
//!
//! ```bash
//! # Report findings
//! select-star-analyzer analyze units.json
//!
//! # Machine-readable findings
//! select-star-analyzer analyze units.json -f json
//!
//! # Rewrite and store the remediated batch
//! select-star-analyzer remediate units.json -f json -o remediated.json
//!
//! # Stream a batch from stdin
//! cat units.json | select-star-analyzer analyze -
//! ```
//!
//! # Input
//!
//! Each input is a JSON array of units (`pgm_name`, `inc_name`, `type`,
//! optional `name`, `class_implementation`, `start_line`, `end_line`,
//! `code`). All units of one input form one corpus: aliases and field
//! references are resolved across the whole batch.
//!
//! # Exit Codes
//!
//! - `0` - Success, no fetch-all statement found (analyze) or done (remediate)
//! - `1` - Fetch-all statements found (analyze)
//! - `2` - Error
//!
//! # Logging
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` selects the
//! level; `-v` defaults it to `debug`.

use std::process;

use clap::Parser;
use select_star_analyzer::{
    app::{AnalyzeParams, RemediateParams, run_analyze, run_remediate},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.command.verbose());

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> AppResult<i32> {
    let config = Config::load()?;

    let output = match cli.command {
        Commands::Analyze {
            inputs,
            output_format,
            verbose,
            no_color
        } => run_analyze(
            AnalyzeParams {
                inputs: inputs.iter().map(|p| p.display().to_string()).collect(),
                output_format,
                verbose,
                no_color
            },
            config
        )?,
        Commands::Remediate {
            inputs,
            output_format,
            output,
            verbose,
            no_color
        } => run_remediate(
            RemediateParams {
                inputs: inputs.iter().map(|p| p.display().to_string()).collect(),
                output_format,
                output: output.map(|p| p.display().to_string()),
                verbose,
                no_color
            },
            config
        )?
    };

    for line in &output.stdout {
        println!("{}", line);
    }
    Ok(output.exit_code)
}
