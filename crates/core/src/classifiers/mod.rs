//! Classifiers for categorizing textual span changes
//!
//! A classifier receives the spans on either side of a non-equal alignment
//! and decides the category and a human-readable detail line.

pub mod spelling;

pub use spelling::{looks_like_spelling_variation, SpellingAwareClassifier, SpellingPolicy};

use crate::model::{DiffCategory, Span};

/// Result of a classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// The assigned category
    pub category: DiffCategory,

    /// Explanation shown in reports
    pub detail: String,
}

impl ClassificationResult {
    pub fn new(category: DiffCategory, detail: impl Into<String>) -> Self {
        Self {
            category,
            detail: detail.into(),
        }
    }
}

/// Trait for change classifiers
pub trait ChangeClassifier: Send + Sync {
    /// Classify a span pair. Callers supply at least one side.
    fn classify(&self, source: Option<&Span>, target: Option<&Span>) -> ClassificationResult;

    /// Get the name of this classifier
    fn name(&self) -> &str;

    /// Clone into a box
    fn clone_box(&self) -> Box<dyn ChangeClassifier>;
}

impl Clone for Box<dyn ChangeClassifier> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// ============================================================================
// Verbatim Classifier
// ============================================================================

/// Reports every paired change as a plain mismatch
#[derive(Debug, Clone, Default)]
pub struct VerbatimClassifier;

impl ChangeClassifier for VerbatimClassifier {
    fn classify(&self, source: Option<&Span>, target: Option<&Span>) -> ClassificationResult {
        match (source, target) {
            (Some(src), Some(tgt)) => ClassificationResult::new(
                DiffCategory::Mismatch,
                format!("Mismatched text content: '{}' -> '{}'", src.trimmed(), tgt.trimmed()),
            ),
            (src, tgt) => describe_unpaired(src, tgt),
        }
    }

    fn name(&self) -> &str {
        "verbatim"
    }

    fn clone_box(&self) -> Box<dyn ChangeClassifier> {
        Box::new(self.clone())
    }
}

/// Shared wording for one-sided and degenerate pairs
pub(crate) fn describe_unpaired(source: Option<&Span>, target: Option<&Span>) -> ClassificationResult {
    match (source, target) {
        (Some(src), None) => ClassificationResult::new(
            DiffCategory::Missing,
            format!("Removed text: '{}'", src.trimmed()),
        ),
        (None, Some(tgt)) => ClassificationResult::new(
            DiffCategory::Extra,
            format!("Unexpected text: '{}'", tgt.trimmed()),
        ),
        _ => ClassificationResult::new(DiffCategory::Mismatch, "Text changed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_classifier() {
        let a = Span::new("color", (0.0, 0.0, 1.0, 1.0));
        let b = Span::new("colour", (0.0, 0.0, 1.0, 1.0));

        let result = VerbatimClassifier.classify(Some(&a), Some(&b));
        assert_eq!(result.category, DiffCategory::Mismatch);
        assert_eq!(result.detail, "Mismatched text content: 'color' -> 'colour'");
    }

    #[test]
    fn test_unpaired_wording() {
        let a = Span::new("  Goodbye ", (0.0, 0.0, 1.0, 1.0));

        let missing = describe_unpaired(Some(&a), None);
        assert_eq!(missing.category, DiffCategory::Missing);
        assert_eq!(missing.detail, "Removed text: 'Goodbye'");

        let extra = describe_unpaired(None, Some(&a));
        assert_eq!(extra.category, DiffCategory::Extra);
        assert_eq!(extra.detail, "Unexpected text: 'Goodbye'");

        let degenerate = describe_unpaired(None, None);
        assert_eq!(degenerate.category, DiffCategory::Mismatch);
        assert_eq!(degenerate.detail, "Text changed");
    }
}
