//! Text normalizers for span comparison keys
//!
//! Each normalizer is one string-to-string step; a
//! [`TextPipeline`](crate::pipeline::TextPipeline) chains them.

/// One text folding step
pub trait Normalizer: Send + Sync {
    fn normalize(&self, input: &str) -> String;

    /// Get the name of this normalizer
    fn name(&self) -> &str;

    fn clone_box(&self) -> Box<dyn Normalizer>;
}

impl Clone for Box<dyn Normalizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Unicode-aware case folding
#[derive(Debug, Clone)]
pub struct Lowercase;

impl Normalizer for Lowercase {
    fn normalize(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &str {
        "lowercase"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Collapses every whitespace run (tabs, newlines, non-breaking spaces) into a
/// single space, optionally dropping it at the edges
#[derive(Debug, Clone)]
pub struct WhitespaceNormalizer {
    pub trim: bool,
}

impl Default for WhitespaceNormalizer {
    fn default() -> Self {
        Self { trim: true }
    }
}

impl WhitespaceNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

impl Normalizer for WhitespaceNormalizer {
    fn normalize(&self, input: &str) -> String {
        let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
        if self.trim || collapsed.is_empty() {
            return collapsed;
        }

        let lead = input.starts_with(char::is_whitespace);
        let tail = input.ends_with(char::is_whitespace);
        format!(
            "{}{}{}",
            if lead { " " } else { "" },
            collapsed,
            if tail { " " } else { "" }
        )
    }

    fn name(&self) -> &str {
        "whitespace"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Applies NFKC compatibility normalization, folding ligatures such as `ﬁ`
/// that extractors commonly emit for one document and not the other.
#[derive(Debug, Clone, Default)]
pub struct UnicodeNormalizer;

impl UnicodeNormalizer {
    pub fn nfkc() -> Self {
        Self
    }
}

impl Normalizer for UnicodeNormalizer {
    fn normalize(&self, input: &str) -> String {
        use unicode_normalization::UnicodeNormalization;

        input.nfkc().collect()
    }

    fn name(&self) -> &str {
        "unicode"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}
