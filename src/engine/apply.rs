//! Span replacement over a unit's text.

use super::types::Replacement;

/// Replace every span in `source`, highest start offset first.
///
/// Applying from the end keeps lower spans valid, so the result does not
/// depend on the order of `replacements`. A replacement that falls outside
/// the text, splits a character, or overlaps one already applied is skipped.
///
/// # Example
///
/// ```
/// use select_star_analyzer::engine::{Replacement, apply_replacements};
///
/// let out = apply_replacements(
///     "a. b. c.",
///     vec![
///         Replacement { span: 0..2, text: "A.".into() },
///         Replacement { span: 6..8, text: "C.".into() },
///     ]
/// );
/// assert_eq!(out, "A. b. C.");
/// ```
pub fn apply_replacements(source: &str, mut replacements: Vec<Replacement>) -> String {
    replacements.sort_by(|a, b| b.span.start.cmp(&a.span.start));

    let mut out = source.to_string();
    let mut floor = source.len();
    for rep in replacements {
        let valid = rep.span.start <= rep.span.end
            && rep.span.end <= floor
            && source.is_char_boundary(rep.span.start)
            && source.is_char_boundary(rep.span.end);
        if !valid {
            tracing::warn!(
                "Skipping replacement {}..{}: out of range or overlapping",
                rep.span.start,
                rep.span.end
            );
            continue;
        }
        out.replace_range(rep.span.clone(), &rep.text);
        floor = rep.span.start;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rep(start: usize, end: usize, text: &str) -> Replacement {
        Replacement {
            span: start..end,
            text: text.to_string()
        }
    }

    #[test]
    fn test_empty_replacements_is_identity() {
        assert_eq!(apply_replacements("SELECT * FROM t.", vec![]), "SELECT * FROM t.");
    }

    #[test]
    fn test_order_independent() {
        let src = "x. SELECT * FROM a. y. SELECT * FROM b.";
        let forward = apply_replacements(src, vec![rep(3, 19, "A."), rep(23, 39, "B.")]);
        let backward = apply_replacements(src, vec![rep(23, 39, "B."), rep(3, 19, "A.")]);
        assert_eq!(forward, backward);
        assert_eq!(forward, "x. A. y. B.");
    }

    #[test]
    fn test_growing_replacement_keeps_earlier_span() {
        let src = "ab. cd.";
        let out = apply_replacements(src, vec![rep(0, 3, "long one."), rep(4, 7, "x.")]);
        assert_eq!(out, "long one. x.");
    }

    #[test]
    fn test_overlap_skipped() {
        let out = apply_replacements("abcdef", vec![rep(0, 4, "X"), rep(2, 6, "Y")]);
        assert_eq!(out, "abY");
    }

    #[test]
    fn test_out_of_range_skipped() {
        assert_eq!(apply_replacements("abc", vec![rep(2, 10, "X")]), "abc");
    }
}
