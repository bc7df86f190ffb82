//! Corpus-wide alias resolution for internal tables.
//!
//! Rows of an internal table are rarely dereferenced through the table
//! itself; they are read through a loop work area, a field symbol or a
//! single-row lookup. Seven independent rules discover these aliases:
//!
//! | Rule | Statement | Edge |
//! |------|-----------|------|
//! | 1 | `LOOP AT t INTO w` | `t -> w` |
//! | 2 | `LOOP AT t ASSIGNING <f>` | `t -> <f>` |
//! | 3 | `READ TABLE t ... INTO w` | `t -> w` |
//! | 4 | `READ TABLE t ... ASSIGNING <f>` | `t -> <f>` |
//! | 5 | `ASSIGN t[ ... ] TO <f>` | `t -> <f>` |
//! | 6 | `LOOP AT t` (header line) | `t -> t` |
//! | 7 | `FOR r IN t` (iteration expression) | `t -> r` |
//!
//! The scan ignores control flow: an alias used anywhere in the corpus
//! counts for every statement filling that table.

use std::{collections::HashMap, sync::LazyLock};

use compact_str::CompactString;
use indexmap::IndexSet;
use regex::Regex;

use crate::lexer::{Statement, mask_comments, statements};

static LOOP_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^LOOP\s+AT\s+(\w+)\b(.*)$").expect("valid regex"));

static READ_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^READ\s+TABLE\s+(\w+)\b(.*)$").expect("valid regex"));

static ASSIGN_INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)^ASSIGN\s+(\w+)\s*\[[^\]]*\]\s+TO\s+(?:FIELD-SYMBOL\(\s*(<\w+>)\s*\)|(<\w+>))"
    )
    .expect("valid regex")
});

/// `INTO w`, `INTO DATA(w)`; group 1 flags `REFERENCE INTO`.
static INTO_SCALAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(REFERENCE\s+)?INTO\s+(?:DATA\(\s*(\w+)\s*\)|(\w+))").expect("valid regex")
});

/// `ASSIGNING <f>`, `ASSIGNING FIELD-SYMBOL(<f>)`
static ASSIGNING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bASSIGNING\s+(?:FIELD-SYMBOL\(\s*(<\w+>)\s*\)|(<\w+>))")
        .expect("valid regex")
});

/// `FOR r IN t`, `FOR <f> IN t`; may appear anywhere inside a statement.
static FOR_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bFOR\s+(<\w+>|\w+)\s+IN\s+(\w+)\b").expect("valid regex")
});

/// Any explicit loop result; its absence means the header line is used.
static LOOP_RESULT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:INTO|ASSIGNING|TRANSPORTING)\b").expect("valid regex")
});

/// Multimap from internal table to the names its rows are accessed through.
///
/// Owners and aliases are stored lower-cased; field-symbol aliases keep
/// their angle brackets.
///
/// # Example
///
/// ```
/// use select_star_analyzer::engine::BindingMap;
///
/// let map = BindingMap::from_source("LOOP AT it_mara INTO wa. ENDLOOP.");
/// let aliases: Vec<&str> = map.aliases_of("IT_MARA").map(|a| a.as_str()).collect();
/// assert_eq!(aliases, vec!["wa"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BindingMap {
    aliases: HashMap<CompactString, IndexSet<CompactString>>
}

impl BindingMap {
    /// Build the map from raw source text.
    pub fn from_source(source: &str) -> Self {
        let masked = mask_comments(source);
        Self::from_statements(&masked, &statements(&masked))
    }

    /// Build the map from an already masked and split corpus.
    pub fn from_statements(masked: &str, stmts: &[Statement]) -> Self {
        let mut map = Self::default();
        for stmt in stmts {
            let body = stmt.body(masked);
            if let Some(caps) = LOOP_AT.captures(body) {
                map.bind_loop(&caps[1], &caps[2]);
            } else if let Some(caps) = READ_TABLE.captures(body) {
                map.bind_result(&caps[1], &caps[2]);
            } else if let Some(caps) = ASSIGN_INDEX.captures(body)
                && let Some(fs) = caps.get(2).or_else(|| caps.get(3))
            {
                map.add(&caps[1], fs.as_str());
            }
            for caps in FOR_IN.captures_iter(body) {
                map.add(&caps[2], &caps[1]);
            }
        }
        map
    }

    /// Record `owner -> alias`.
    pub fn add(&mut self, owner: &str, alias: &str) {
        self.aliases
            .entry(owner.to_lowercase().into())
            .or_default()
            .insert(alias.to_lowercase().into());
    }

    /// Aliases recorded for `owner` (case-insensitive lookup).
    pub fn aliases_of(&self, owner: &str) -> impl Iterator<Item = &CompactString> {
        self.aliases
            .get(owner.to_lowercase().as_str())
            .into_iter()
            .flat_map(|set| set.iter())
    }

    /// Number of owners with at least one alias.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Rules 1, 2 and 6.
    fn bind_loop(&mut self, table: &str, rest: &str) {
        if LOOP_RESULT.is_match(rest) {
            self.bind_result(table, rest);
        } else {
            self.add(table, table);
        }
    }

    /// Rules 1-4: the explicit row receiver of a loop or lookup.
    fn bind_result(&mut self, table: &str, rest: &str) {
        if let Some(caps) = INTO_SCALAR.captures(rest)
            && caps.get(1).is_none()
            && let Some(wa) = caps.get(2).or_else(|| caps.get(3))
        {
            self.add(table, wa.as_str());
        }
        if let Some(caps) = ASSIGNING.captures(rest)
            && let Some(fs) = caps.get(1).or_else(|| caps.get(2))
        {
            self.add(table, fs.as_str());
        }
    }
}
