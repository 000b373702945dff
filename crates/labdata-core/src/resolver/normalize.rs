//! Name normalization for matching

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::text::collapse_whitespace;

lazy_static! {
    static ref SUPERSCRIPT_TAG_RE: Regex = Regex::new(r"<sup>.*?</sup>").unwrap();
    static ref ABBREVIATED_RE: Regex = Regex::new(r"^[a-z] [a-z]+$").unwrap();
}

/// Comparison key for a name
///
/// - Converts to lowercase
/// - Removes diacritics
/// - Removes periods
/// - Removes `<sup>...</sup>` markers
/// - Collapses whitespace
pub fn normalize_name(name: &str) -> String {
    let result: String = name
        .to_lowercase()
        // NFD to separate combining characters
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| *c != '.')
        .collect();

    let result = SUPERSCRIPT_TAG_RE.replace_all(&result, "");
    collapse_whitespace(&result)
}

/// Whether a normalized name is one initial plus a surname ("s choudhury").
/// Such names are too sparse for fuzzy matching.
pub fn is_abbreviated(normalized: &str) -> bool {
    ABBREVIATED_RE.is_match(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("J. Smith", "j smith")]
    #[case("H. Müller", "h muller")]
    #[case("J.A. Smith", "ja smith")]
    #[case("  J.  Smith  ", "j smith")]
    #[case("J. Smith<sup>*</sup>", "j smith")]
    #[case("José García", "jose garcia")]
    #[case("", "")]
    fn test_normalize_name(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(normalize_name(name), expected);
    }

    #[rstest]
    #[case("s choudhury", true)]
    #[case("h zhang", true)]
    #[case("j a smith", false)]
    #[case("john smith", false)]
    #[case("smith", false)]
    #[case("j smith-jones", false)]
    fn test_is_abbreviated(#[case] normalized: &str, #[case] expected: bool) {
        assert_eq!(is_abbreviated(normalized), expected);
    }
}
