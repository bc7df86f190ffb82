//! Helper functions for CLI operations.
//!
//! This module provides utility functions used by the command pipelines
//! for reading unit batches, calculating exit codes and building output
//! options.

use std::{
    fs::read_to_string,
    io::{self, Read}
};

use rayon::prelude::*;

use super::convert::resolve_format;
use crate::{
    cli::Format,
    config::OutputConfig,
    engine::UnitAnalysis,
    error::{AppResult, file_read_error, input_error},
    output::OutputOptions,
    unit::{Unit, parse_batch}
};

/// Calculates the process exit code for an analyze run.
///
/// - `0` - No fetch-all statement found
/// - `1` - At least one fetch-all statement found
///
/// # Example
///
/// ```
/// use select_star_analyzer::app::calculate_exit_code;
///
/// assert_eq!(calculate_exit_code(&[]), 0);
/// ```
pub fn calculate_exit_code(batches: &[Vec<UnitAnalysis>]) -> i32 {
    let found = batches
        .iter()
        .flatten()
        .any(|analysis| !analysis.selects.is_empty());
    if found { 1 } else { 0 }
}

/// Reads a unit batch from a file or stdin.
///
/// # Errors
///
/// Returns an error if the file cannot be read or stdin fails.
pub fn read_batch_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))
    }
}

/// Reads and parses every input batch, preserving input order.
///
/// Files are read in parallel. Stdin (`-`) may appear at most once.
///
/// # Errors
///
/// Returns an error if `-` is given more than once, otherwise the first
/// read or parse error in input order.
pub fn load_batches(inputs: &[String]) -> AppResult<Vec<Vec<Unit>>> {
    if inputs.iter().filter(|path| path.as_str() == "-").count() > 1 {
        return Err(input_error("Standard input ('-') can only be given once"));
    }
    inputs
        .par_iter()
        .map(|path| {
            let json = read_batch_input(path)?;
            parse_batch(&json, path)
        })
        .collect()
}

/// Creates output options from CLI parameters and configuration.
pub fn create_output_options(
    format: Option<Format>,
    no_color: bool,
    verbose: bool,
    config: &OutputConfig
) -> OutputOptions {
    OutputOptions {
        format: resolve_format(format, config),
        colored: !no_color && config.colored.unwrap_or(true),
        verbose
    }
}
