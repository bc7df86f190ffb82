use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SELECT * Analyzer - Infer used fields and rewrite ABAP fetch-all statements
#[derive(Parser, Debug)]
#[command(name = "select-star-analyzer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report fetch-all statements with their used fields and suggestions
    Analyze {
        /// Unit batch files in JSON (use - for stdin)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum)]
        output_format: Option<Format>,

        /// Include statement text in text output and enable debug logging
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// Rewrite remediable fetch-all statements in place of the wildcard
    Remediate {
        /// Unit batch files in JSON (use - for stdin)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum)]
        output_format: Option<Format>,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

impl Commands {
    pub fn verbose(&self) -> bool {
        match self {
            Self::Analyze {
                verbose, ..
            }
            | Self::Remediate {
                verbose, ..
            } => *verbose
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}

impl Format {
    /// Parse a format name from configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None
        }
    }
}
