//! Application types for CLI commands.
//!
//! This module defines the parameters passed from the command line to the
//! command pipelines and the output they produce.

use crate::cli::Format;

/// Parameters for the analyze command.
///
/// # Example
///
/// ```
/// use select_star_analyzer::{app::AnalyzeParams, cli::Format};
///
/// let params = AnalyzeParams {
///     inputs:        vec!["units.json".to_string()],
///     output_format: Some(Format::Json),
///     verbose:       false,
///     no_color:      true
/// };
/// assert_eq!(params.inputs.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzeParams {
    /// Unit batch paths, "-" for stdin. Each path is one request.
    pub inputs:        Vec<String>,
    /// Output format; falls back to configuration, then text.
    pub output_format: Option<Format>,
    /// Show statement text in text output.
    pub verbose:       bool,
    /// Disable colored terminal output.
    pub no_color:      bool
}

/// Parameters for the remediate command.
#[derive(Debug, Clone)]
pub struct RemediateParams {
    /// Unit batch paths, "-" for stdin. Each path is one request.
    pub inputs:        Vec<String>,
    /// Output format; falls back to configuration, then text.
    pub output_format: Option<Format>,
    /// Destination file; stdout when absent.
    pub output:        Option<String>,
    pub verbose:       bool,
    pub no_color:      bool
}

/// Output from CLI command execution.
///
/// Represents the final output ready for display, including the exit
/// code and all lines to be printed to stdout.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code for the process (0=nothing found, 1=fetch-all statements found).
    pub exit_code: i32,
    /// Lines to print to stdout.
    pub stdout:    Vec<String>
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remediate_params_clone() {
        let params = RemediateParams {
            inputs:        vec!["-".to_string()],
            output_format: None,
            output:        Some("out.json".to_string()),
            verbose:       false,
            no_color:      true
        };
        let cloned = params.clone();
        assert_eq!(cloned.output.as_deref(), Some("out.json"));
    }

    #[test]
    fn test_command_output_debug() {
        let output = CommandOutput {
            exit_code: 0,
            stdout:    vec!["line1".to_string()]
        };
        assert!(format!("{:?}", output).contains("CommandOutput"));
    }
}
