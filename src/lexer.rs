//! Lexical preparation of ABAP source text.
//!
//! Pattern matching over raw program text is fragile: a `"` comment can
//! hide a keyword, and a period inside a literal looks like a statement
//! terminator. This module removes both problems without a grammar:
//!
//! 1. [`mask_comments`] blanks every comment byte with a space. The masked
//!    text has exactly the same byte length as the input, so every offset
//!    found in it is also a valid offset into the input.
//! 2. [`statements`] splits masked text into a flat stream of terminated
//!    statements, ignoring periods inside `'...'`, `` `...` `` and `|...|`
//!    literals.
//!
//! # Example
//!
//! ```
//! use select_star_analyzer::lexer::{mask_comments, statements};
//!
//! let source = "WRITE 'a.b'. \" trailing.\nCLEAR wa.";
//! let masked = mask_comments(source);
//! assert_eq!(masked.len(), source.len());
//!
//! let stmts = statements(&masked);
//! assert_eq!(stmts.len(), 2);
//! assert_eq!(stmts[0].text(&masked), "WRITE 'a.b'.");
//! assert_eq!(stmts[1].text(&masked), "CLEAR wa.");
//! ```

use std::ops::Range;

/// A terminated statement inside a masked source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Byte range from the first code byte through the terminating period.
    pub span: Range<usize>
}

impl Statement {
    /// Full statement text including the terminating period.
    pub fn text<'a>(&self, masked: &'a str) -> &'a str {
        &masked[self.span.clone()]
    }

    /// Statement text without the terminating period.
    pub fn body<'a>(&self, masked: &'a str) -> &'a str {
        &masked[self.span.start..self.span.end - 1]
    }
}

/// Replace comment characters with spaces, preserving byte offsets.
///
/// A `*` in the first column starts a full-line comment, a `"` outside of
/// a literal starts an end-of-line comment. Newlines are always kept.
#[must_use]
pub fn mask_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut scanner = LiteralScanner::default();
    let mut in_comment = false;
    let mut line_start = true;

    for c in text.chars() {
        if c == '\n' {
            in_comment = false;
            line_start = true;
            scanner.end_line();
            out.push(c);
            continue;
        }
        if in_comment {
            push_blank(&mut out, c);
            line_start = false;
            continue;
        }
        if scanner.inside() {
            scanner.feed(c);
            out.push(c);
        } else if (c == '*' && line_start) || c == '"' {
            in_comment = true;
            push_blank(&mut out, c);
        } else {
            scanner.feed(c);
            out.push(c);
        }
        line_start = false;
    }

    out
}

/// Split comment-masked text into terminated statements in source order.
///
/// Text after the last terminator is not a statement and is dropped.
#[must_use]
pub fn statements(masked: &str) -> Vec<Statement> {
    let mut out = Vec::new();
    let mut scanner = LiteralScanner::default();
    let mut start: Option<usize> = None;

    for (idx, c) in masked.char_indices() {
        if c == '\n' {
            scanner.end_line();
            continue;
        }
        if scanner.inside() {
            scanner.feed(c);
            continue;
        }
        if c.is_whitespace() {
            continue;
        }
        let begin = *start.get_or_insert(idx);
        if c == '.' {
            out.push(Statement {
                span: begin..idx + 1
            });
            start = None;
        } else {
            scanner.feed(c);
        }
    }

    out
}

fn push_blank(out: &mut String, c: char) {
    for _ in 0..c.len_utf8() {
        out.push(' ');
    }
}

/// Tracks whether the cursor is inside a character literal or template.
#[derive(Debug, Default)]
struct LiteralScanner {
    quote:   Option<char>,
    escaped: bool
}

impl LiteralScanner {
    fn inside(&self) -> bool {
        self.quote.is_some()
    }

    fn feed(&mut self, c: char) {
        match self.quote {
            None => {
                if matches!(c, '\'' | '`' | '|') {
                    self.quote = Some(c);
                }
            }
            Some(_) if self.escaped => self.escaped = false,
            Some('|') if c == '\\' => self.escaped = true,
            Some(q) if q == c => self.quote = None,
            Some(_) => {}
        }
    }

    /// `'` and `` ` `` literals cannot span lines; templates can.
    fn end_line(&mut self) {
        if matches!(self.quote, Some('\'') | Some('`')) {
            self.quote = None;
        }
        self.escaped = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_full_line_comment() {
        let src = "* SELECT * FROM mara.\nCLEAR wa.";
        let masked = mask_comments(src);
        assert_eq!(masked.len(), src.len());
        assert!(!masked.contains("SELECT"));
        assert!(masked.ends_with("CLEAR wa."));
    }

    #[test]
    fn test_mask_star_not_in_first_column() {
        let masked = mask_comments("  SELECT * FROM mara.");
        assert_eq!(masked, "  SELECT * FROM mara.");
    }

    #[test]
    fn test_mask_quote_comment_keeps_literal() {
        let src = "WRITE 'say \"hi\"'. \" comment";
        let masked = mask_comments(src);
        assert!(masked.starts_with("WRITE 'say \"hi\"'."));
        assert!(!masked.contains("comment"));
    }

    #[test]
    fn test_mask_multibyte_comment_preserves_length() {
        let src = "\" überprüfung\nCLEAR wa.";
        let masked = mask_comments(src);
        assert_eq!(masked.len(), src.len());
        assert_eq!(&masked[src.find('\n').unwrap()..], "\nCLEAR wa.");
    }

    #[test]
    fn test_statements_period_inside_literal() {
        let masked = mask_comments("SELECT * FROM t WHERE a = 'x.y' INTO wa. WRITE wa-a.");
        let stmts = statements(&masked);
        assert_eq!(stmts.len(), 2);
        assert_eq!(
            stmts[0].body(&masked),
            "SELECT * FROM t WHERE a = 'x.y' INTO wa"
        );
    }

    #[test]
    fn test_statements_template_with_escape() {
        let masked = mask_comments("DATA(s) = |a\\|.b|. CLEAR s.");
        let stmts = statements(&masked);
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[1].text(&masked), "CLEAR s.");
    }

    #[test]
    fn test_statements_unterminated_tail_dropped() {
        let masked = mask_comments("CLEAR a. SELECT * FROM mara INTO wa");
        let stmts = statements(&masked);
        assert_eq!(stmts.len(), 1);
        assert_eq!(stmts[0].span, 0..8);
    }

    #[test]
    fn test_statements_multiline() {
        let src = "SELECT *\n  FROM mara\n  INTO wa.";
        let stmts = statements(&mask_comments(src));
        assert_eq!(stmts.len(), 1);
        assert_eq!(stmts[0].span, 0..src.len());
    }

    #[test]
    fn test_statements_empty() {
        assert!(statements("").is_empty());
        assert!(statements("   \n  ").is_empty());
    }
}
