//! Field usage harvesting and soundness checks.
//!
//! For a fetch-all target the harvester collects every `name-field`
//! component access in the corpus, where `name` is the target itself or,
//! for internal tables, any alias from the [`BindingMap`]. The resulting
//! field set only replaces the wildcard when no dynamic or by-name
//! component access could read a column that is not statically visible:
//!
//! - `ASSIGN COMPONENT x OF STRUCTURE name TO <f>`
//! - `ASSIGN name-(x) TO <f>`
//! - `MOVE-CORRESPONDING name TO other` / `CORRESPONDING #( name )`
//! - whole-record writes: `MODIFY|UPDATE|INSERT dbtab FROM [TABLE] name`,
//!   `INSERT INTO dbtab VALUES name`, `APPEND name TO itab`,
//!   `INSERT name INTO [TABLE] itab`
//!
//! Components are also read through table expressions (`itab[ 1 ]-field`)
//! and may carry a namespace prefix (`wa-/bic/zfield`).
//!
//! For internal-table targets a dynamic component access on *any* field
//! symbol also counts, since field symbols can point at any row.

use std::{collections::HashSet, sync::LazyLock};

use compact_str::CompactString;
use regex::Regex;
use smallvec::SmallVec;

use super::{
    bindings::BindingMap,
    types::{TargetKind, UsageResult}
};

/// Candidate names rarely exceed a handful.
pub type CandidateNames = SmallVec<[CompactString; 4]>;

static ASSIGN_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bASSIGN\s+COMPONENT\s+\S+\s+OF\s+STRUCTURE\s+(<\w+>|\w+)")
        .expect("valid regex")
});

static DYNAMIC_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w])(<\w+>|\w+)(?:\s*\[[^\]]*\])?-\(").expect("valid regex")
});

static MOVE_CORRESPONDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bMOVE-CORRESPONDING\s+(?:EXACT\s+)?(<\w+>|\w+)\s+TO\b")
        .expect("valid regex")
});

static CORRESPONDING_OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bCORRESPONDING\s+(?:#|\w+)\s*\(\s*(?:BASE\s*\([^)]*\)\s*)?(<\w+>|\w+)")
        .expect("valid regex")
});

/// `MODIFY dbtab FROM wa`, `UPDATE dbtab FROM TABLE @lt`, `MODIFY TABLE lt FROM wa`
static RECORD_WRITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)\b(?:MODIFY|UPDATE|INSERT)\s+(?:TABLE\s+)?(?:/\w+/)?\w+\s+FROM\s+(?:TABLE\s+)?@?(<\w+>|\w+)"
    )
    .expect("valid regex")
});

static RECORD_VALUES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bVALUES\s+@?(<\w+>|\w+)").expect("valid regex"));

/// `APPEND wa TO lt`, `INSERT wa INTO TABLE lt`
static ROW_COPY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\b(?:APPEND\s+(<\w+>|\w+)\s+TO|INSERT\s+(<\w+>|\w+)\s+INTO)\b")
        .expect("valid regex")
});

/// Structures whose components are read in a way the harvester cannot see.
#[derive(Debug, Clone, Default)]
pub struct DynamicAccesses {
    /// Lower-cased operands of dynamic or by-name component accesses
    structures:   HashSet<CompactString>,
    /// A dynamic component access was made through some field symbol
    field_symbol: bool
}

impl DynamicAccesses {
    /// Scan a comment-masked corpus.
    pub fn scan(masked: &str) -> Self {
        let mut found = Self::default();
        for re in [&*ASSIGN_COMPONENT, &*DYNAMIC_COMPONENT] {
            for caps in re.captures_iter(masked) {
                let operand = &caps[1];
                if operand.starts_with('<') {
                    found.field_symbol = true;
                }
                found.structures.insert(operand.to_lowercase().into());
            }
        }
        for re in [
            &*MOVE_CORRESPONDING,
            &*CORRESPONDING_OPERATOR,
            &*RECORD_WRITE,
            &*RECORD_VALUES
        ] {
            for caps in re.captures_iter(masked) {
                found.structures.insert(caps[1].to_lowercase().into());
            }
        }
        for caps in ROW_COPY.captures_iter(masked) {
            if let Some(operand) = caps.get(1).or_else(|| caps.get(2)) {
                found.structures.insert(operand.as_str().to_lowercase().into());
            }
        }
        found
    }

    /// Whether any candidate name is read dynamically.
    pub fn touches(&self, kind: TargetKind, candidates: &[CompactString]) -> bool {
        (kind == TargetKind::InternalTable && self.field_symbol)
            || candidates.iter().any(|c| self.structures.contains(c))
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}

/// Names through which a target's fields may be dereferenced, lower-cased.
///
/// Only internal tables are expanded through their aliases; a work area or
/// implicit table structure is not further aliased.
pub fn candidate_names(
    kind: TargetKind,
    target_name: &str,
    bindings: &BindingMap
) -> CandidateNames {
    let mut names = CandidateNames::new();
    names.push(target_name.to_lowercase().into());
    if kind == TargetKind::InternalTable {
        for alias in bindings.aliases_of(target_name) {
            if !names.contains(alias) {
                names.push(alias.clone());
            }
        }
    }
    names
}

/// Harvest the fields dereferenced from a target anywhere in the corpus.
///
/// `masked` is the comment-masked corpus; `bindings` and `dynamic` must be
/// built from that same corpus.
pub fn harvest_usage(
    kind: TargetKind,
    target_name: &str,
    masked: &str,
    bindings: &BindingMap,
    dynamic: &DynamicAccesses
) -> UsageResult {
    let candidates = candidate_names(kind, target_name, bindings);
    let mut usage = UsageResult {
        ambiguous: dynamic.touches(kind, &candidates),
        ..Default::default()
    };

    for name in &candidates {
        match field_access_regex(name) {
            Some(re) => {
                for caps in re.captures_iter(masked) {
                    usage.fields.insert(caps[1].to_lowercase().into());
                }
            }
            None => usage.ambiguous = true
        }
    }

    usage
}

/// `name-field` or `name[ ... ]-field`, case-insensitive, `name` not
/// preceded by an identifier byte. Fields may carry a `/ns/` prefix.
fn field_access_regex(name: &str) -> Option<Regex> {
    Regex::new(&format!(
        r"(?i)(?:^|[^A-Za-z0-9_]){}(?:\s*\[[^\]]*\])?-((?:/[A-Za-z0-9_]+/)?[A-Za-z0-9_]+)",
        regex::escape(name)
    ))
    .ok()
}
