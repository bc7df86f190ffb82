//! Fetch-all statement detection.
//!
//! Works on the statement stream produced by [`crate::lexer`], so a match
//! can never run past the first terminating period and comments never
//! contribute keywords. A statement qualifies when its first code bytes
//! read `SELECT [SINGLE] * FROM <table>`.
//!
//! The receiving clause may sit anywhere in the statement body:
//!
//! ```text
//! SELECT * FROM mara INTO wa WHERE matnr = p_matnr.
//! SELECT * FROM mara WHERE matnr = p_matnr INTO wa.
//! SELECT * FROM mara INTO TABLE lt_mara WHERE mtart = 'FERT'.
//! SELECT SINGLE * FROM mara WHERE matnr = p_matnr.
//! ```

use std::sync::LazyLock;

use compact_str::CompactString;
use regex::{Captures, Regex};

use super::types::{LocatedStatement, TargetKind, Unsupported};
use crate::lexer::{mask_comments, statements};

/// `SELECT [SINGLE [FOR UPDATE]] * FROM table`, anchored at the statement start.
pub(super) static FETCH_ALL_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^SELECT\s+(?:SINGLE\s+(?:FOR\s+UPDATE\s+)?)?\*\s+FROM\s+((?:/\w+/)?\w+)")
        .expect("valid regex")
});

/// Collection receiving clause, with its leading whitespace.
/// Matches: `INTO TABLE lt`, `APPENDING TABLE lt`,
/// `INTO CORRESPONDING FIELDS OF TABLE @lt`, `INTO TABLE @DATA(lt)`
pub(super) static COLLECTION_RECEIVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s*\b(INTO|APPENDING)\s+(?:CORRESPONDING\s+FIELDS\s+OF\s+)?TABLE\s+(@)?(?:DATA\(\s*(\w+)\s*\)|(\w+))"
    )
    .expect("valid regex")
});

/// Scalar receiving clause, with its leading whitespace.
/// Matches: `INTO wa`, `INTO <fs>`, `INTO CORRESPONDING FIELDS OF @wa`,
/// `INTO @DATA(wa)`
pub(super) static SCALAR_RECEIVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s*\bINTO\s+(?:CORRESPONDING\s+FIELDS\s+OF\s+)?(@)?(?:DATA\(\s*(\w+)\s*\)|(<\w+>|\w+))"
    )
    .expect("valid regex")
});

static RECEIVER_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:INTO|APPENDING)\b").expect("valid regex"));

static JOIN_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bJOIN\b").expect("valid regex"));

/// Receiving clause extracted from a statement body.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Receiver {
    kind:         TargetKind,
    name:         CompactString,
    host_escaped: bool,
    appending:    bool,
    inline:       bool
}

/// Locate every fetch-all statement in one unit's text, in source order.
///
/// Spans are byte offsets into `text` itself.
///
/// # Example
///
/// ```
/// use select_star_analyzer::engine::{TargetKind, locate_statements};
///
/// let found = locate_statements("SELECT * FROM mara WHERE matnr = p INTO TABLE lt_mara.");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].table_name, "mara");
/// assert_eq!(found[0].target_kind, TargetKind::InternalTable);
/// assert_eq!(found[0].target_name, "lt_mara");
/// ```
pub fn locate_statements(text: &str) -> Vec<LocatedStatement> {
    let masked = mask_comments(text);
    statements(&masked)
        .into_iter()
        .filter_map(|stmt| {
            let body = stmt.body(&masked);
            let head = FETCH_ALL_HEAD.captures(body)?;
            let table = head.get(1)?;
            let head_end = head.get(0)?.end();
            let clauses = &body[head_end..];
            let receiver = find_receiver(clauses);

            let unsupported = if receiver.as_ref().is_some_and(|r| r.inline) {
                Some(Unsupported::InlineDeclaration)
            } else if JOIN_KEYWORD.is_match(clauses) {
                Some(Unsupported::Join)
            } else if receiver.is_none() && RECEIVER_KEYWORD.is_match(clauses) {
                Some(Unsupported::UnrecognizedReceiver)
            } else {
                None
            };

            let table_name = CompactString::from(table.as_str());
            let (target_kind, target_name, host_escaped, appending) = match receiver {
                Some(r) => (r.kind, r.name, r.host_escaped, r.appending),
                None => (TargetKind::Implicit, table_name.clone(), false, false)
            };

            Some(LocatedStatement {
                raw_text: text[stmt.span.clone()].to_string(),
                code: stmt.text(&masked).to_string(),
                table_name,
                target_kind,
                target_name,
                span: stmt.span,
                host_escaped,
                appending,
                unsupported
            })
        })
        .collect()
}

/// Find the receiving clause; the collection form wins over the scalar one.
fn find_receiver(clauses: &str) -> Option<Receiver> {
    if let Some(caps) = COLLECTION_RECEIVER.captures(clauses) {
        let (name, inline) = receiver_name(&caps, 3, 4)?;
        return Some(Receiver {
            kind: TargetKind::InternalTable,
            name,
            host_escaped: caps.get(2).is_some(),
            appending: caps[1].eq_ignore_ascii_case("APPENDING"),
            inline
        });
    }
    SCALAR_RECEIVER
        .captures_iter(clauses)
        .find(|caps| !is_table_keyword(caps))
        .and_then(|caps| {
            let (name, inline) = receiver_name(&caps, 2, 3)?;
            Some(Receiver {
                kind: TargetKind::WorkArea,
                name,
                host_escaped: caps.get(1).is_some(),
                appending: false,
                inline
            })
        })
}

fn receiver_name(
    caps: &Captures<'_>,
    inline_group: usize,
    plain_group: usize
) -> Option<(CompactString, bool)> {
    if let Some(m) = caps.get(inline_group) {
        return Some((m.as_str().into(), true));
    }
    caps.get(plain_group).map(|m| (m.as_str().into(), false))
}

/// `INTO TABLE` seen through the scalar pattern names the keyword, not a
/// variable.
pub(super) fn is_table_keyword(caps: &Captures<'_>) -> bool {
    caps.get(3)
        .is_some_and(|m| m.as_str().eq_ignore_ascii_case("TABLE"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiver_collection_precedence() {
        let r = find_receiver(" INTO TABLE lt INTO wa").unwrap();
        assert_eq!(r.kind, TargetKind::InternalTable);
        assert_eq!(r.name, "lt");
    }

    #[test]
    fn test_receiver_scalar_skips_table_keyword() {
        let r = find_receiver(" WHERE a = b INTO wa").unwrap();
        assert_eq!(r.kind, TargetKind::WorkArea);
        assert_eq!(r.name, "wa");
    }

    #[test]
    fn test_receiver_corresponding_prefix() {
        let r = find_receiver(" INTO CORRESPONDING FIELDS OF TABLE lt_x").unwrap();
        assert_eq!(r.kind, TargetKind::InternalTable);
        assert_eq!(r.name, "lt_x");

        let r = find_receiver(" INTO CORRESPONDING FIELDS OF ls_x").unwrap();
        assert_eq!(r.kind, TargetKind::WorkArea);
        assert_eq!(r.name, "ls_x");
    }

    #[test]
    fn test_receiver_host_escape_and_inline() {
        let r = find_receiver(" WHERE a = @b INTO TABLE @lt").unwrap();
        assert!(r.host_escaped);
        assert!(!r.inline);

        let r = find_receiver(" INTO TABLE @DATA(lt)").unwrap();
        assert!(r.inline);
        assert_eq!(r.name, "lt");
    }

    #[test]
    fn test_receiver_appending() {
        let r = find_receiver(" APPENDING TABLE lt").unwrap();
        assert!(r.appending);
        assert_eq!(r.kind, TargetKind::InternalTable);
    }

    #[test]
    fn test_receiver_absent() {
        assert!(find_receiver(" WHERE matnr = p_matnr").is_none());
    }
}
