//! Application logic for the SELECT * Analyzer CLI.
//!
//! This module contains the command execution logic separated from the
//! main entry point to enable testing.
//!
//! - [`types`] - Command parameters and outputs
//! - [`convert`] - CLI to internal type conversion
//! - [`helpers`] - Input reading, exit codes, output options
//! - [`run`] - `analyze` and `remediate` command pipelines

mod convert;
mod helpers;
mod run;
mod types;

pub use convert::{convert_format, resolve_format};
pub use helpers::{calculate_exit_code, create_output_options, load_batches, read_batch_input};
pub use run::{run_analyze, run_remediate};
pub use types::{AnalyzeParams, CommandOutput, RemediateParams};
