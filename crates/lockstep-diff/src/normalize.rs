//! Line normalization shared by both comparators.
//!
//! Policy is applied in a fixed order: trim both ends, collapse runs of
//! spaces, fold case. Equality is then plain string equality.

use std::borrow::Cow;

use lockstep_types::CompareOptions;

/// Returns `true` if every character of the line is whitespace.
pub fn is_empty(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// Compare two lines under the trim, space-compression and case policy.
pub fn are_equal(a: &str, b: &str, options: &CompareOptions) -> bool {
    normalize(a, options) == normalize(b, options)
}

/// Apply the normalization policy to one line.
pub fn normalize<'a>(line: &'a str, options: &CompareOptions) -> Cow<'a, str> {
    let mut line = Cow::Borrowed(if options.trim_lines { line.trim() } else { line });
    if options.compress_spaces && line.contains("  ") {
        line = Cow::Owned(compress_spaces(&line));
    }
    if options.ignore_case {
        line = Cow::Owned(line.to_lowercase());
    }
    line
}

/// Collapse every run of consecutive space characters into one space.
fn compress_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut previous_space = false;
    for c in line.chars() {
        let space = c == ' ';
        if !(space && previous_space) {
            out.push(c);
        }
        previous_space = space;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> CompareOptions {
        CompareOptions::default()
    }

    #[test]
    fn empty_lines() {
        assert!(is_empty(""));
        assert!(is_empty("  \t "));
        assert!(!is_empty("  x "));
    }

    #[test]
    fn strict_by_default() {
        assert!(are_equal("abc", "abc", &options()));
        assert!(!are_equal("abc ", "abc", &options()));
        assert!(!are_equal("a  b", "a b", &options()));
        assert!(!are_equal("ABC", "abc", &options()));
    }

    #[test]
    fn trim_and_compress() {
        let o = CompareOptions {
            trim_lines: true,
            compress_spaces: true,
            ..options()
        };
        assert!(are_equal("a   b ", "a b", &o));
        assert!(are_equal("  a b", "a  b", &o));
    }

    #[test]
    fn compress_only_touches_spaces() {
        let o = CompareOptions {
            compress_spaces: true,
            ..options()
        };
        assert!(are_equal("a    b", "a b", &o));
        assert!(!are_equal("a\t\tb", "a\tb", &o));
        // leading run collapses but is not removed without trimming
        assert_eq!(normalize("   x", &o), " x");
    }

    #[test]
    fn ignore_case() {
        let o = CompareOptions {
            ignore_case: true,
            ..options()
        };
        assert!(are_equal("ABC", "abc", &o));
        assert!(are_equal("ÄRGER", "ärger", &o));
        assert!(!are_equal("ABC", "abd", &o));
    }

    #[test]
    fn normalize_borrows_when_untouched() {
        let o = CompareOptions {
            trim_lines: true,
            compress_spaces: true,
            ..options()
        };
        assert!(matches!(normalize(" a b ", &o), Cow::Borrowed("a b")));
    }
}
