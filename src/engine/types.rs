//! Type definitions shared by the inference engine.
//!
//! - [`TargetKind`] - How a fetch-all statement receives its rows
//! - [`LocatedStatement`] - One fetch-all statement found in a unit
//! - [`UsageResult`] - Harvested field set plus soundness flag
//! - [`Replacement`] - Span substitution produced for remediation
//! - [`Finding`] - Per-statement analysis result as reported to callers

use std::{collections::BTreeSet, ops::Range};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Receiving form of a fetch-all statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// `INTO wa` - a single record lands in a named structure
    #[serde(rename = "wa")]
    WorkArea,
    /// `INTO TABLE itab` - rows land in a collection
    #[serde(rename = "itab")]
    InternalTable,
    /// No receiving clause; the table name doubles as the structure
    #[serde(rename = "implicit")]
    Implicit
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WorkArea => write!(f, "work area"),
            Self::InternalTable => write!(f, "internal table"),
            Self::Implicit => write!(f, "implicit")
        }
    }
}

/// A fetch-all statement located in one unit's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedStatement {
    /// Original statement text, comments included
    pub raw_text:     String,
    /// Comment-masked statement text, same length as `raw_text`
    pub code:         String,
    /// Source table as written
    pub table_name:   CompactString,
    pub target_kind:  TargetKind,
    /// Receiving variable as written, or the table name when implicit
    pub target_name:  CompactString,
    /// Byte range into the owning unit's text, terminator included
    pub span:         Range<usize>,
    /// Receiving clause used the strict-syntax `@` host escape
    pub host_escaped: bool,
    /// Rows are added with `APPENDING` instead of `INTO`
    pub appending:    bool,
    /// Statement shape the synthesizer refuses to rewrite
    pub unsupported:  Option<Unsupported>
}

/// Statement shapes that are located and reported but never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unsupported {
    /// `FROM a JOIN b`: an unqualified column list may be ambiguous
    Join,
    /// `INTO @DATA(x)`: corresponding-fields targets cannot be declared inline
    InlineDeclaration,
    /// An `INTO`/`APPENDING` keyword whose target could not be read
    UnrecognizedReceiver
}

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Join => write!(f, "join source"),
            Self::InlineDeclaration => write!(f, "inline declaration target"),
            Self::UnrecognizedReceiver => write!(f, "unrecognized receiving clause")
        }
    }
}

/// Columns dereferenced from a target and whether that set is trustworthy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageResult {
    /// Lower-cased field names, sorted
    pub fields:    BTreeSet<CompactString>,
    /// A dynamic or by-name component access was observed
    pub ambiguous: bool
}

impl UsageResult {
    /// Field names in ascending order.
    pub fn sorted_fields(&self) -> Vec<CompactString> {
        self.fields.iter().cloned().collect()
    }

    /// Whether the field set may replace the wildcard.
    pub fn is_remediable(&self) -> bool {
        !self.ambiguous && !self.fields.is_empty()
    }
}

/// Substitution of one statement span with synthesized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub span: Range<usize>,
    pub text: String
}

/// Outcome classification of one fetch-all statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    /// Explicit column list can replace the wildcard
    Remediable,
    /// Dynamic access makes the field set incomplete
    Ambiguous,
    /// No dereferenced field was found
    InsufficientEvidence,
    /// Statement shape is not rewritten
    Unsupported
}

impl std::fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remediable => write!(f, "REMEDIABLE"),
            Self::Ambiguous => write!(f, "AMBIGUOUS"),
            Self::InsufficientEvidence => write!(f, "NO EVIDENCE"),
            Self::Unsupported => write!(f, "UNSUPPORTED")
        }
    }
}

/// Per-statement analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub table:               CompactString,
    pub target_type:         TargetKind,
    pub target_name:         CompactString,
    pub start_byte_in_unit:  usize,
    pub end_byte_in_unit:    usize,
    pub used_fields:         Vec<CompactString>,
    pub ambiguous:           bool,
    pub suggested_fields:    Option<Vec<CompactString>>,
    pub suggested_statement: Option<String>,
    pub status:              FindingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsupported:         Option<Unsupported>
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&TargetKind::WorkArea).unwrap(),
            "\"wa\""
        );
        assert_eq!(
            serde_json::to_string(&TargetKind::InternalTable).unwrap(),
            "\"itab\""
        );
        assert_eq!(
            serde_json::to_string(&TargetKind::Implicit).unwrap(),
            "\"implicit\""
        );
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&FindingStatus::InsufficientEvidence).unwrap(),
            "\"insufficient_evidence\""
        );
    }

    #[test]
    fn test_usage_result_remediable() {
        let mut usage = UsageResult::default();
        assert!(!usage.is_remediable());
        usage.fields.insert("matnr".into());
        assert!(usage.is_remediable());
        usage.ambiguous = true;
        assert!(!usage.is_remediable());
    }
}
