//! Replacement statement synthesis.
//!
//! The statement is split into a head (`SELECT [SINGLE] * FROM table`) and
//! a body (all remaining clauses, terminator excluded). The wildcard in the
//! head becomes the explicit field list. For explicit targets every
//! receiving clause is removed from the body and a normalized
//! `INTO CORRESPONDING FIELDS OF [TABLE] target` clause is appended after
//! the remaining filter and ordering clauses.
//!
//! Clauses are located on the comment-masked statement and copied from the
//! original text, so comments between the remaining clauses survive. A
//! comment left behind the last clause is moved after the new terminator,
//! which keeps an end-of-line comment from swallowing the period. Comments
//! inside the head are dropped.

use std::ops::Range;

use compact_str::CompactString;

use super::{
    locate::{COLLECTION_RECEIVER, FETCH_ALL_HEAD, SCALAR_RECEIVER, is_table_keyword},
    types::{LocatedStatement, TargetKind}
};

/// Build the replacement text for a located statement.
///
/// `fields` are expected sorted and lower-cased, as produced by
/// [`UsageResult::sorted_fields`](super::UsageResult::sorted_fields).
/// An empty list leaves the wildcard in place.
///
/// # Example
///
/// ```
/// use select_star_analyzer::engine::{locate_statements, synthesize_statement};
///
/// let stmt = &locate_statements("SELECT * FROM spfli INTO wa_spfli.")[0];
/// let text = synthesize_statement(stmt, &["carrid".into(), "connid".into()]);
/// assert_eq!(
///     text,
///     "SELECT carrid connid FROM spfli INTO CORRESPONDING FIELDS OF wa_spfli."
/// );
/// ```
pub fn synthesize_statement(stmt: &LocatedStatement, fields: &[CompactString]) -> String {
    let code = stmt.code.strip_suffix('.').unwrap_or(&stmt.code);
    let Some(head) = FETCH_ALL_HEAD.find(code) else {
        return stmt.raw_text.clone();
    };

    let separator = if stmt.host_escaped { ", " } else { " " };
    let list = if fields.is_empty() {
        String::from("*")
    } else {
        fields
            .iter()
            .map(CompactString::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    };
    let mut out = head.as_str().replacen('*', &list, 1);
    let body = &code[head.end()..];
    let raw_body = stmt.raw_text.get(head.end()..code.len()).unwrap_or(body);

    let explicit = stmt.target_kind != TargetKind::Implicit;
    let ranges = if explicit {
        receiver_ranges(body, raw_body)
    } else {
        Vec::new()
    };
    let kept_code = remove_ranges(body, &ranges).unwrap_or_else(|| body.to_string());
    let kept_raw = remove_ranges(raw_body, &ranges)
        .filter(|raw| raw.len() == kept_code.len())
        .unwrap_or_else(|| kept_code.clone());

    let first = kept_code.len() - kept_code.trim_start().len();
    let last = kept_code.trim_end().len();
    let has_code = last > first;
    if has_code {
        let lead = &kept_raw[..first];
        if explicit && lead.trim().is_empty() {
            out.push(' ');
        } else {
            out.push_str(lead);
        }
        out.push_str(&kept_raw[first..last]);
    }
    if explicit {
        out.push(' ');
        out.push_str(&receiving_clause(stmt));
    }
    out.push('.');

    let tail = kept_raw[if has_code { last } else { 0 }..].trim_end();
    if !tail.trim_start().is_empty() {
        out.push_str(tail);
        out.push('\n');
    }
    out
}

/// Normalized receiving clause for an explicit target.
fn receiving_clause(stmt: &LocatedStatement) -> String {
    let verb = if stmt.appending { "APPENDING" } else { "INTO" };
    let table = if stmt.target_kind == TargetKind::InternalTable {
        "TABLE "
    } else {
        ""
    };
    let escape = if stmt.host_escaped { "@" } else { "" };
    format!(
        "{} CORRESPONDING FIELDS OF {}{}{}",
        verb, table, escape, stmt.target_name
    )
}

/// Byte ranges of every receiving clause in the masked body, each with
/// its leading whitespace, in source order.
fn receiver_ranges(body: &str, raw: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = COLLECTION_RECEIVER
        .find_iter(body)
        .map(|m| m.range())
        .collect();
    let scalar: Vec<Range<usize>> = SCALAR_RECEIVER
        .captures_iter(body)
        .filter(|caps| !is_table_keyword(caps))
        .filter_map(|caps| caps.get(0).map(|m| m.range()))
        .filter(|r| !ranges.iter().any(|c| c.start < r.end && r.start < c.end))
        .collect();
    ranges.extend(scalar);
    ranges.sort_by_key(|r| r.start);
    ranges
        .into_iter()
        .map(|r| keep_leading_comment(r, body, raw))
        .collect()
}

/// Shrink a range whose leading whitespace spans a comment so that the
/// comment and its line break stay in place.
fn keep_leading_comment(range: Range<usize>, body: &str, raw: &str) -> Range<usize> {
    let slice = &body[range.clone()];
    let keyword = range.start + (slice.len() - slice.trim_start().len());
    match raw.get(range.start..keyword) {
        Some(prefix) if !prefix.trim().is_empty() => match prefix.rfind('\n') {
            Some(nl) => range.start + nl + 1..range.end,
            None => range
        },
        _ => range
    }
}

/// Copy `text` without the given sorted ranges; `None` when a range does
/// not fall on character boundaries.
fn remove_ranges(text: &str, ranges: &[Range<usize>]) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in ranges {
        if range.start > cursor {
            out.push_str(text.get(cursor..range.start)?);
        }
        cursor = cursor.max(range.end);
    }
    out.push_str(text.get(cursor..)?);
    Some(out)
}
