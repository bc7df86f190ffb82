//! Field-usage inference engine for `SELECT *` statements.
//!
//! # Architecture
//!
//! ```text
//!   units ──┬──▶ concat ──▶ Corpus (masked text, BindingMap, DynamicAccesses)
//!           │                                   │
//!           └──▶ locate (per unit) ──▶ harvest ◀┘──▶ synthesize ──▶ apply
//! ```
//!
//! A request is one batch of units. The corpus index is built once per
//! request from the concatenation of every unit and then only read, so the
//! whole computation is a pure function from input batch to output batch.
//! Independent requests share nothing and may run on different threads.
//!
//! # Example
//!
//! ```
//! use select_star_analyzer::{
//!     engine::{Analyzer, FindingStatus},
//!     unit::Unit
//! };
//!
//! let units = vec![Unit::new(
//!     "ZDEMO",
//!     "ZDEMO",
//!     "SELECT * FROM spfli INTO wa_spfli. WRITE wa_spfli-carrid. WRITE wa_spfli-connid."
//! )];
//!
//! let analysis = Analyzer::new().analyze(&units);
//! let finding = &analysis[0].selects[0];
//! assert_eq!(finding.status, FindingStatus::Remediable);
//! assert_eq!(
//!     finding.suggested_statement.as_deref(),
//!     Some("SELECT carrid connid FROM spfli INTO CORRESPONDING FIELDS OF wa_spfli.")
//! );
//! ```

mod apply;
mod bindings;
mod locate;
mod synthesize;
mod types;
mod usage;

use std::collections::HashSet;

pub use apply::apply_replacements;
pub use bindings::BindingMap;
use compact_str::CompactString;
pub use locate::locate_statements;
use serde::{Deserialize, Serialize};
pub use synthesize::synthesize_statement;
pub use types::{
    Finding, FindingStatus, LocatedStatement, Replacement, TargetKind, Unsupported, UsageResult
};
pub use usage::{CandidateNames, DynamicAccesses, candidate_names, harvest_usage};

use crate::{
    config::AnalysisConfig,
    lexer::{mask_comments, statements},
    unit::{Unit, concat_units}
};

/// Per-request index over the concatenation of all units.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    masked:   String,
    bindings: BindingMap,
    dynamic:  DynamicAccesses
}

impl Corpus {
    /// Index a batch of units.
    pub fn build(units: &[Unit]) -> Self {
        Self::from_text(&concat_units(units))
    }

    /// Index raw corpus text.
    pub fn from_text(text: &str) -> Self {
        let masked = mask_comments(text);
        let stmts = statements(&masked);
        let bindings = BindingMap::from_statements(&masked, &stmts);
        let dynamic = DynamicAccesses::scan(&masked);
        tracing::debug!(
            "Indexed {} statements: {} tables with row aliases, dynamic access: {}",
            stmts.len(),
            bindings.len(),
            !dynamic.is_empty()
        );
        Self {
            masked,
            bindings,
            dynamic
        }
    }

    /// Harvest the fields used through a fetch-all target.
    pub fn usage(&self, kind: TargetKind, target_name: &str) -> UsageResult {
        harvest_usage(
            kind,
            target_name,
            &self.masked,
            &self.bindings,
            &self.dynamic
        )
    }
}

/// Analysis of one unit: the unit echoed back plus its findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitAnalysis {
    #[serde(flatten)]
    pub unit:    Unit,
    pub selects: Vec<Finding>
}

/// Remediation of one unit: the unit echoed back plus rewritten code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRemediation {
    #[serde(flatten)]
    pub unit:            Unit,
    pub remediated_code: String
}

/// Verdict for one located statement.
#[derive(Debug, Clone)]
struct Evaluation {
    usage:      UsageResult,
    status:     FindingStatus,
    suggestion: Option<String>
}

/// Entry point of the engine: analyze or remediate unit batches.
///
/// # Example
///
/// ```
/// use select_star_analyzer::{config::AnalysisConfig, engine::Analyzer, unit::Unit};
///
/// let config = AnalysisConfig {
///     ignored_tables: vec!["T000".into()]
/// };
/// let analyzer = Analyzer::with_config(&config);
/// let units = vec![Unit::new("Z", "Z", "SELECT * FROM t000 INTO wa. WRITE wa-mandt.")];
///
/// assert!(analyzer.analyze(&units)[0].selects.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    ignored_tables: HashSet<CompactString>
}

impl Analyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer from configuration.
    pub fn with_config(config: &AnalysisConfig) -> Self {
        Self {
            ignored_tables: config
                .ignored_tables
                .iter()
                .map(|t| t.to_lowercase().into())
                .collect()
        }
    }

    /// Fetch-all statements of one unit's text, minus ignored tables.
    pub fn locate(&self, text: &str) -> Vec<LocatedStatement> {
        let mut found = locate_statements(text);
        if !self.ignored_tables.is_empty() {
            found.retain(|s| {
                !self
                    .ignored_tables
                    .contains(s.table_name.to_lowercase().as_str())
            });
        }
        found
    }

    /// Report every fetch-all statement of every unit.
    ///
    /// Units come back in input order, findings in source order.
    pub fn analyze(&self, units: &[Unit]) -> Vec<UnitAnalysis> {
        let corpus = Corpus::build(units);
        let analysis: Vec<UnitAnalysis> = units
            .iter()
            .map(|unit| UnitAnalysis {
                unit:    unit.clone(),
                selects: self
                    .locate(unit.code())
                    .iter()
                    .map(|stmt| to_finding(stmt, self.evaluate(stmt, &corpus)))
                    .collect()
            })
            .collect();
        tracing::info!(
            "Analyzed {} units, {} fetch-all statements",
            analysis.len(),
            analysis.iter().map(|a| a.selects.len()).sum::<usize>()
        );
        analysis
    }

    /// Rewrite every remediable statement of every unit.
    ///
    /// Units without remediable statements come back unchanged.
    pub fn remediate(&self, units: &[Unit]) -> Vec<UnitRemediation> {
        let corpus = Corpus::build(units);
        units
            .iter()
            .map(|unit| {
                let replacements: Vec<Replacement> = self
                    .locate(unit.code())
                    .into_iter()
                    .filter_map(|stmt| {
                        let text = self.evaluate(&stmt, &corpus).suggestion?;
                        Some(Replacement {
                            span: stmt.span,
                            text
                        })
                    })
                    .collect();
                tracing::debug!(
                    "{}/{}: {} replacements",
                    unit.pgm_name,
                    unit.inc_name,
                    replacements.len()
                );
                UnitRemediation {
                    unit:            unit.clone(),
                    remediated_code: apply_replacements(unit.code(), replacements)
                }
            })
            .collect()
    }

    fn evaluate(&self, stmt: &LocatedStatement, corpus: &Corpus) -> Evaluation {
        let usage = corpus.usage(stmt.target_kind, &stmt.target_name);
        let status = if stmt.unsupported.is_some() {
            FindingStatus::Unsupported
        } else if usage.is_remediable() {
            FindingStatus::Remediable
        } else if usage.ambiguous {
            FindingStatus::Ambiguous
        } else {
            FindingStatus::InsufficientEvidence
        };
        let suggestion = (status == FindingStatus::Remediable)
            .then(|| synthesize_statement(stmt, &usage.sorted_fields()));
        tracing::debug!(
            "SELECT * FROM {} -> {} {} at {}..{}: {} fields, {}",
            stmt.table_name,
            stmt.target_kind,
            stmt.target_name,
            stmt.span.start,
            stmt.span.end,
            usage.fields.len(),
            status
        );
        Evaluation {
            usage,
            status,
            suggestion
        }
    }
}

fn to_finding(stmt: &LocatedStatement, eval: Evaluation) -> Finding {
    let used_fields = eval.usage.sorted_fields();
    let suggested_fields = eval.suggestion.as_ref().map(|_| used_fields.clone());
    Finding {
        table: stmt.table_name.clone(),
        target_type: stmt.target_kind,
        target_name: stmt.target_name.clone(),
        start_byte_in_unit: stmt.span.start,
        end_byte_in_unit: stmt.span.end,
        used_fields,
        ambiguous: eval.usage.ambiguous,
        suggested_fields,
        suggested_statement: eval.suggestion,
        status: eval.status,
        unsupported: stmt.unsupported
    }
}
