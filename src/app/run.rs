//! Command pipelines.
//!
//! Every input batch is an independent request: it gets its own corpus
//! index and shares nothing with the others, so batches are processed in
//! parallel with [`rayon`] and reported in input order.

use std::fs;

use rayon::prelude::*;

use super::{
    helpers::{calculate_exit_code, create_output_options, load_batches},
    types::{AnalyzeParams, CommandOutput, RemediateParams}
};
use crate::{
    config::Config,
    engine::Analyzer,
    error::{AppResult, file_write_error},
    output::{format_analysis, format_remediation}
};

/// Runs the analyze command.
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, or the output
/// cannot be encoded.
///
/// # Example
///
/// ```no_run
/// use select_star_analyzer::{
///     app::{AnalyzeParams, run_analyze},
///     config::Config
/// };
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let params = AnalyzeParams {
///     inputs:        vec!["units.json".to_string()],
///     output_format: None,
///     verbose:       false,
///     no_color:      true
/// };
/// let output = run_analyze(params, Config::default())?;
/// println!("Exit code: {}", output.exit_code);
/// # Ok(())
/// # }
/// ```
pub fn run_analyze(params: AnalyzeParams, config: Config) -> AppResult<CommandOutput> {
    let batches = load_batches(&params.inputs)?;
    let opts = create_output_options(
        params.output_format,
        params.no_color,
        params.verbose,
        &config.output
    );
    let analyzer = Analyzer::with_config(&config.analysis);

    let results: Vec<_> = batches
        .par_iter()
        .map(|units| analyzer.analyze(units))
        .collect();
    let stdout = results
        .iter()
        .map(|batch| format_analysis(batch, &opts))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(CommandOutput {
        exit_code: calculate_exit_code(&results),
        stdout
    })
}

/// Runs the remediate command.
///
/// With an output path the formatted result is written there, uncolored,
/// and stdout only reports the destination.
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, the output cannot
/// be encoded, or the output file cannot be written.
pub fn run_remediate(params: RemediateParams, config: Config) -> AppResult<CommandOutput> {
    let batches = load_batches(&params.inputs)?;
    let mut opts = create_output_options(
        params.output_format,
        params.no_color,
        params.verbose,
        &config.output
    );
    if params.output.is_some() {
        opts.colored = false;
    }
    let analyzer = Analyzer::with_config(&config.analysis);

    let results: Vec<_> = batches
        .par_iter()
        .map(|units| analyzer.remediate(units))
        .collect();
    let formatted = results
        .iter()
        .map(|batch| format_remediation(batch, &opts))
        .collect::<AppResult<Vec<_>>>()?;

    let stdout = match params.output {
        Some(path) => {
            let mut content = formatted.join("\n");
            content.push('\n');
            fs::write(&path, content).map_err(|e| file_write_error(&path, e))?;
            tracing::info!("Wrote {} remediated batches to {}", results.len(), path);
            vec![format!("Remediated output written to {}", path)]
        }
        None => formatted
    };

    Ok(CommandOutput {
        exit_code: 0,
        stdout
    })
}
