//! String similarity ratios for fuzzy name matching

use rapidfuzz::distance::indel;
use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

/// Similarity ratio in `[0, 1]` used by fuzzy matching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// `2 * LCS / (|a| + |b|)`: insertion/deletion edit distance
    #[default]
    Indel,
    Levenshtein,
    JaroWinkler,
}

impl SimilarityMetric {
    pub fn ratio(self, a: &str, b: &str) -> f64 {
        match self {
            Self::Indel => indel_ratio(a, b),
            Self::Levenshtein => normalized_levenshtein(a, b),
            Self::JaroWinkler => jaro_winkler(a, b),
        }
    }
}

/// `2 * LCS(a, b) / (|a| + |b|)` over chars; 1.0 for two empty strings
pub fn indel_ratio(a: &str, b: &str) -> f64 {
    indel::normalized_similarity(a.chars(), b.chars())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_indel_ratio_known_values() {
        assert_eq!(indel_ratio("", ""), 1.0);
        assert_eq!(indel_ratio("abc", ""), 0.0);
        assert_eq!(indel_ratio("john smith", "john smith"), 1.0);
        // 7 shared chars over 9 + 7
        let ratio = indel_ratio("j a smith", "j smith");
        assert!((ratio - 14.0 / 16.0).abs() < 1e-9, "{ratio}");
    }

    #[test]
    fn test_near_spelling_clears_default_threshold() {
        assert!(indel_ratio("john a smith", "john smith") >= 0.85);
        assert!(indel_ratio("completely different name", "john smith") < 0.85);
    }

    #[test]
    fn test_metric_dispatch() {
        assert_eq!(SimilarityMetric::default(), SimilarityMetric::Indel);
        assert_eq!(SimilarityMetric::Levenshtein.ratio("abc", "abc"), 1.0);
        assert!(SimilarityMetric::JaroWinkler.ratio("martha", "marhta") > 0.9);
    }

    #[test]
    fn test_metric_names() {
        let metric: SimilarityMetric = serde_yaml::from_str("jaro_winkler").unwrap();
        assert_eq!(metric, SimilarityMetric::JaroWinkler);
    }

    proptest! {
        #[test]
        fn prop_indel_ratio_is_symmetric_and_bounded(a in "[a-z ]{0,12}", b in "[a-z ]{0,12}") {
            let ab = indel_ratio(&a, &b);
            prop_assert!((0.0..=1.0).contains(&ab));
            prop_assert!((ab - indel_ratio(&b, &a)).abs() < 1e-12);
        }
    }
}
