use crate::algorithm::similarity_ratio;
use crate::classifiers::{describe_unpaired, ChangeClassifier, ClassificationResult};
use crate::model::{DiffCategory, Span};

/// Thresholds for treating a differing word as a close variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpellingPolicy {
    /// Minimum character similarity ratio (inclusive)
    pub ratio_threshold: f64,
    /// Maximum difference in normalized word length (inclusive)
    pub max_length_delta: usize,
}

impl Default for SpellingPolicy {
    fn default() -> Self {
        Self {
            ratio_threshold: 0.82,
            max_length_delta: 2,
        }
    }
}

/// Whether `target` reads as a misspelling (or respelling) of `source`.
///
/// Both texts must have the same non-zero word count. Words are compared after
/// stripping non-alphanumerics and case folding; every differing word must
/// clear the policy, and at least one word must differ.
pub fn looks_like_spelling_variation(source: &str, target: &str, policy: &SpellingPolicy) -> bool {
    let source_words: Vec<&str> = source.split_whitespace().collect();
    let target_words: Vec<&str> = target.split_whitespace().collect();

    if source_words.is_empty() || target_words.is_empty() || source_words.len() != target_words.len() {
        return false;
    }

    let mut tolerated = 0;

    for (src_word, tgt_word) in source_words.iter().zip(&target_words) {
        let src = fold_word(src_word);
        let tgt = fold_word(tgt_word);

        if src == tgt {
            continue;
        }
        if src.is_empty() || tgt.is_empty() {
            return false;
        }

        let ratio = similarity_ratio(&src, &tgt);
        let length_delta = src.chars().count().abs_diff(tgt.chars().count());
        if ratio >= policy.ratio_threshold && length_delta <= policy.max_length_delta {
            tolerated += 1;
        } else {
            return false;
        }
    }

    tolerated > 0
}

/// Letters and digits of any script, case folded
fn fold_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Distinguishes close spelling variants from genuine mismatches
#[derive(Debug, Clone, Default)]
pub struct SpellingAwareClassifier {
    pub policy: SpellingPolicy,
}

impl SpellingAwareClassifier {
    pub fn new(policy: SpellingPolicy) -> Self {
        Self { policy }
    }
}

impl ChangeClassifier for SpellingAwareClassifier {
    fn classify(&self, source: Option<&Span>, target: Option<&Span>) -> ClassificationResult {
        let (src, tgt) = match (source, target) {
            (Some(src), Some(tgt)) => (src.trimmed(), tgt.trimmed()),
            (src, tgt) => return describe_unpaired(src, tgt),
        };

        if looks_like_spelling_variation(src, tgt, &self.policy) {
            ClassificationResult::new(
                DiffCategory::Spelling,
                format!("Spelling variation: '{}' -> '{}'", src, tgt),
            )
        } else {
            ClassificationResult::new(
                DiffCategory::Mismatch,
                format!("Mismatched text content: '{}' -> '{}'", src, tgt),
            )
        }
    }

    fn name(&self) -> &str {
        "spelling_aware"
    }

    fn clone_box(&self) -> Box<dyn ChangeClassifier> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variation(a: &str, b: &str) -> bool {
        looks_like_spelling_variation(a, b, &SpellingPolicy::default())
    }

    #[test]
    fn test_fold_word() {
        assert_eq!(fold_word("Colour,"), "colour");
        assert_eq!(fold_word("Co-op's #1!"), "coops1");
        assert_eq!(fold_word("--"), "");
        assert_eq!(fold_word("ÉTÉ"), "été");
    }

    #[test]
    fn test_case_and_punctuation_fold_before_scoring() {
        assert!(variation("COLOUR.", "color"));
        assert!(!variation("Colour!", "colour"));
    }

    #[test]
    fn test_single_word_boundary() {
        assert!(variation("color", "colour"));
        assert!(!variation("color", "gravy"));
    }

    #[test]
    fn test_word_count_must_match() {
        assert!(!variation("the colour red", "the color"));
        assert!(!variation("", "color"));
    }

    #[test]
    fn test_identical_text_is_not_a_variation() {
        assert!(!variation("Total due", "total  due"));
    }

    #[test]
    fn test_punctuation_only_word_disqualifies() {
        assert!(!variation("Total -", "Total x"));
        // Punctuation that normalizes away on both sides is a match
        assert!(!variation("Total: -", "Total -"));
    }

    #[test]
    fn test_one_dissimilar_word_rejects_whole_span() {
        assert!(!variation("colour of gravy", "color of sauce"));
    }

    #[test]
    fn test_length_delta_limit() {
        // High ratio but three extra characters
        let policy = SpellingPolicy {
            ratio_threshold: 0.5,
            max_length_delta: 2,
        };
        assert!(!looks_like_spelling_variation("organize", "organizations", &policy));
        assert!(looks_like_spelling_variation("organize", "organise", &policy));
    }

    #[test]
    fn test_transposition_falls_below_threshold() {
        // "world" / "wrold" share four characters in order: ratio 0.8
        assert!(!variation("Hello world", "Hello wrold"));
        assert!(variation("Hello world", "Hello worlds"));
    }

    #[test]
    fn test_classifier_details() {
        let classifier = SpellingAwareClassifier::default();
        let a = Span::new(" color ", (0.0, 0.0, 1.0, 1.0));
        let b = Span::new("colour", (0.0, 0.0, 1.0, 1.0));
        let c = Span::new("gravy", (0.0, 0.0, 1.0, 1.0));

        let spelling = classifier.classify(Some(&a), Some(&b));
        assert_eq!(spelling.category, DiffCategory::Spelling);
        assert_eq!(spelling.detail, "Spelling variation: 'color' -> 'colour'");

        let mismatch = classifier.classify(Some(&a), Some(&c));
        assert_eq!(mismatch.category, DiffCategory::Mismatch);
        assert_eq!(mismatch.detail, "Mismatched text content: 'color' -> 'gravy'");

        assert_eq!(classifier.classify(Some(&a), None).category, DiffCategory::Missing);
        assert_eq!(classifier.classify(None, Some(&b)).category, DiffCategory::Extra);
    }
}
