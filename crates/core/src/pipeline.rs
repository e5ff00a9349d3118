//! Text normalization pipeline
//!
//! Chains normalizers into the comparison key used to align spans.

use crate::normalizers::{Lowercase, Normalizer, UnicodeNormalizer, WhitespaceNormalizer};

/// A pipeline of text normalizers
#[derive(Default, Clone)]
pub struct TextPipeline {
    /// Ordered list of normalizers to apply
    normalizers: Vec<Box<dyn Normalizer>>,
}

impl TextPipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            normalizers: Vec::new(),
        }
    }

    /// Comparison key for a span: whitespace collapsed and trimmed, case folded.
    /// With `unicode` set, NFKC folding runs first.
    pub fn comparison_key(unicode: bool) -> Self {
        let mut pipeline = Self::new();
        if unicode {
            pipeline = pipeline.add_normalizer(Box::new(UnicodeNormalizer::nfkc()));
        }
        pipeline
            .add_normalizer(Box::new(WhitespaceNormalizer::new().with_trim(true)))
            .add_normalizer(Box::new(Lowercase))
    }

    /// Add a normalizer to the pipeline
    pub fn add_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizers.push(normalizer);
        self
    }

    /// Run the input through every normalizer and return the final text
    pub fn apply(&self, input: &str) -> String {
        self.normalizers
            .iter()
            .fold(input.to_string(), |text, normalizer| normalizer.normalize(&text))
    }

    /// Get the number of normalizers in the pipeline
    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }

    /// Get the names of all normalizers in the pipeline
    pub fn normalizer_names(&self) -> Vec<String> {
        self.normalizers
            .iter()
            .map(|n| n.name().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pipeline() {
        let pipeline = TextPipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply("Hello  World"), "Hello  World");
        assert!(pipeline.normalizer_names().is_empty());
    }

    #[test]
    fn test_comparison_key() {
        let pipeline = TextPipeline::comparison_key(false);
        assert_eq!(pipeline.apply("  Policy   Number:\t12345 "), "policy number: 12345");
        assert_eq!(pipeline.normalizer_names(), vec!["whitespace", "lowercase"]);
    }

    #[test]
    fn test_comparison_key_with_unicode() {
        let pipeline = TextPipeline::comparison_key(true);
        assert_eq!(pipeline.normalizer_names(), vec!["unicode", "whitespace", "lowercase"]);
        assert_eq!(pipeline.apply("\u{FB01}LE  Name"), "file name");
    }

    #[test]
    fn test_custom_normalizer_runs_last() {
        let pipeline = TextPipeline::new()
            .add_normalizer(Box::new(Lowercase))
            .add_normalizer(Box::new(WhitespaceNormalizer::new().with_trim(false)));
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.apply(" A\t\tB "), " a b ");
    }
}
