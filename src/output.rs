//! Result formatting for analysis and remediation batches.
//!
//! - `text` - Human-readable, optionally colored
//! - `json` - Pretty JSON in the batch wire format
//! - `yaml` - YAML with the same structure as JSON

use colored::Colorize;
use serde::Serialize;

use crate::{
    engine::{Finding, FindingStatus, UnitAnalysis, UnitRemediation},
    error::{AppResult, serialize_error},
    unit::Unit
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Counts of findings by status across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub units:                 usize,
    pub statements:            usize,
    pub remediable:            usize,
    pub ambiguous:             usize,
    pub insufficient_evidence: usize,
    pub unsupported:           usize
}

impl AnalysisSummary {
    pub fn from_batch(batch: &[UnitAnalysis]) -> Self {
        let mut summary = Self {
            units: batch.len(),
            ..Default::default()
        };
        for finding in batch.iter().flat_map(|u| &u.selects) {
            summary.statements += 1;
            match finding.status {
                FindingStatus::Remediable => summary.remediable += 1,
                FindingStatus::Ambiguous => summary.ambiguous += 1,
                FindingStatus::InsufficientEvidence => summary.insufficient_evidence += 1,
                FindingStatus::Unsupported => summary.unsupported += 1
            }
        }
        summary
    }
}

/// Format an analyzed batch
pub fn format_analysis(batch: &[UnitAnalysis], opts: &OutputOptions) -> AppResult<String> {
    match opts.format {
        OutputFormat::Json => to_json(batch),
        OutputFormat::Yaml => to_yaml(batch),
        OutputFormat::Text => Ok(format_analysis_text(batch, opts))
    }
}

/// Format a remediated batch
pub fn format_remediation(batch: &[UnitRemediation], opts: &OutputOptions) -> AppResult<String> {
    match opts.format {
        OutputFormat::Json => to_json(batch),
        OutputFormat::Yaml => to_yaml(batch),
        OutputFormat::Text => Ok(format_remediation_text(batch, opts))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| serialize_error("JSON", e))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_yaml::to_string(value).map_err(|e| serialize_error("YAML", e))
}

fn unit_header(unit: &Unit, opts: &OutputOptions) -> String {
    let mut header = format!("{} / {} ({})", unit.pgm_name, unit.inc_name, unit.kind);
    if let Some(name) = &unit.name {
        header.push_str(&format!(" {}", name));
    }
    if opts.colored {
        header.cyan().bold().to_string()
    } else {
        header
    }
}

fn status_label(status: FindingStatus, colored: bool) -> String {
    let label = format!("[{}]", status);
    if !colored {
        return label;
    }
    match status {
        FindingStatus::Remediable => label.green().to_string(),
        FindingStatus::Ambiguous => label.red().to_string(),
        FindingStatus::InsufficientEvidence => label.yellow().to_string(),
        FindingStatus::Unsupported => label.magenta().to_string()
    }
}

fn format_finding(finding: &Finding, code: &str, opts: &OutputOptions) -> String {
    let mut out = format!(
        "  {} SELECT * FROM {} -> {} ({}) at {}..{}\n",
        status_label(finding.status, opts.colored),
        finding.table,
        finding.target_name,
        finding.target_type,
        finding.start_byte_in_unit,
        finding.end_byte_in_unit
    );

    if opts.verbose
        && let Some(raw) = code.get(finding.start_byte_in_unit..finding.end_byte_in_unit)
    {
        out.push_str(&format!("    statement: {}\n", raw.trim()));
    }

    if finding.used_fields.is_empty() {
        out.push_str("    used fields: none\n");
    } else {
        let fields: Vec<&str> = finding.used_fields.iter().map(|f| f.as_str()).collect();
        out.push_str(&format!("    used fields: {}\n", fields.join(", ")));
    }

    if let Some(reason) = finding.unsupported {
        out.push_str(&format!("    not rewritten: {}\n", reason));
    } else if finding.ambiguous {
        out.push_str("    not rewritten: dynamic component access makes the field set incomplete\n");
    }

    if let Some(stmt) = &finding.suggested_statement {
        out.push_str(&format!("    suggestion: {}\n", stmt));
    }
    out
}

fn format_analysis_text(batch: &[UnitAnalysis], opts: &OutputOptions) -> String {
    let mut output = String::new();

    for analysis in batch {
        if analysis.selects.is_empty() && !opts.verbose {
            continue;
        }
        output.push_str(&unit_header(&analysis.unit, opts));
        output.push('\n');
        if analysis.selects.is_empty() {
            output.push_str("  no fetch-all statements\n");
        }
        for finding in &analysis.selects {
            output.push_str(&format_finding(finding, analysis.unit.code(), opts));
        }
        output.push('\n');
    }

    let s = AnalysisSummary::from_batch(batch);
    let summary = format!(
        "Summary: {} units, {} fetch-all statements ({} remediable, {} ambiguous, {} without evidence, {} unsupported)",
        s.units, s.statements, s.remediable, s.ambiguous, s.insufficient_evidence, s.unsupported
    );
    if opts.colored {
        output.push_str(&summary.bold().to_string());
    } else {
        output.push_str(&summary);
    }
    output
}

fn format_remediation_text(batch: &[UnitRemediation], opts: &OutputOptions) -> String {
    let mut output = String::new();
    let mut changed = 0;

    for remediation in batch {
        let is_changed = remediation.remediated_code != remediation.unit.code();
        if is_changed {
            changed += 1;
        }
        let marker = if is_changed { "remediated" } else { "unchanged" };
        output.push_str(&format!(
            "=== {} [{}] ===\n",
            unit_header(&remediation.unit, opts),
            marker
        ));
        output.push_str(&remediation.remediated_code);
        if !remediation.remediated_code.ends_with('\n') {
            output.push('\n');
        }
        output.push('\n');
    }

    let summary = format!("Remediated {} of {} units", changed, batch.len());
    if opts.colored {
        output.push_str(&summary.bold().to_string());
    } else {
        output.push_str(&summary);
    }
    output
}
