//! Type conversion functions for CLI to internal types.

use crate::{cli::Format, config::OutputConfig, output::OutputFormat};

/// Converts a CLI format enum to the internal output format type.
///
/// # Example
///
/// ```
/// use select_star_analyzer::{app::convert_format, cli::Format, output::OutputFormat};
///
/// assert_eq!(convert_format(Format::Yaml), OutputFormat::Yaml);
/// ```
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Picks the output format: command line first, then configuration.
///
/// Unknown configured names fall back to text.
pub fn resolve_format(cli: Option<Format>, config: &OutputConfig) -> OutputFormat {
    cli.or_else(|| config.format.as_deref().and_then(Format::from_name))
        .map(convert_format)
        .unwrap_or_default()
}
