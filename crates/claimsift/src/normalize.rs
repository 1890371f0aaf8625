//! Text normalization for narrative comparison.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Canonicalizes free text: trims, collapses whitespace runs (newlines and
/// tabs included) to a single space, and lowercases.
///
/// ```
/// use claimsift::normalize;
///
/// assert_eq!(normalize("  The Claimant\n\twent  "), "the claimant went");
/// ```
pub fn normalize(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").to_lowercase()
}

/// Returns `true` when two texts are the same narrative.
///
/// This is exact equality of the normalized forms, not a similarity score:
/// one changed word makes two narratives different.
pub fn same_narrative(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("a  b\n\nc\td"), "a b c d");
        assert_eq!(normalize("\r\n a \u{a0} b"), "a b");
    }

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("  Hello World  "), "hello world");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn narrative_equality() {
        assert!(same_narrative("Police used force.", "police  used\nFORCE."));
        assert!(!same_narrative("Police used force.", "Police used gas."));
        assert!(!same_narrative("Police used force.", "Police used force"));
    }
}
