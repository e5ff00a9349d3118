//! Variable-field tagging
//!
//! Marks spans whose content is expected to differ between the golden and the
//! target document (names, policy numbers, dates). Tagged spans stay on the
//! page for rendering but are skipped by matching.

use crate::model::{PageContent, Span};
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

/// Marks spans as variable in place
pub trait VariableFieldTagger: Send + Sync {
    fn tag(&self, pages: &mut [PageContent]);

    /// Get the name of this tagger
    fn name(&self) -> &str;
}

/// Treats every span as fixed content
#[derive(Debug, Clone, Default)]
pub struct NoopTagger;

impl VariableFieldTagger for NoopTagger {
    fn tag(&self, _pages: &mut [PageContent]) {}

    fn name(&self) -> &str {
        "noop"
    }
}

lazy_static! {
    /// Field labels that introduce personal or policy-specific values
    static ref LABEL_PATTERNS: Vec<Regex> = [
        r"(?i)policy\s*(?:number|no\.?|#)\s*[:\-]?\s*\w+",
        r"(?i)claim\s*(?:number|no\.?|#)\s*[:\-]?\s*\w+",
        r"(?i)member\s*(?:id|number)\s*[:\-]?\s*\w+",
        r"(?i)(?:insured|customer|patient)\s*name\b",
        r"(?i)address[:\-]?\s*",
        r"(?i)effective\s*date\b",
        r"(?i)date\s*of\s*birth\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();

    /// Four or more consecutive digits
    static ref LONG_NUMBER: Regex = Regex::new(r"\b\d{4,}\b").unwrap();

    /// Loose e-mail address shape
    static ref EMAIL: Regex = Regex::new(r"[\w.]+@[\w.]+").unwrap();
}

const IDENTIFIER_KEYWORDS: &[&str] = &[
    "policy", "claim", "member", "account", "invoice", "customer", "insured", "reference", "number",
    "id",
];

const SENSITIVE_TOKENS: &[&str] = &["ssn", "tax id", "zip"];

/// Pattern-based tagger for insurance and billing paperwork
#[derive(Debug, Clone, Default)]
pub struct HeuristicTagger {
    extra_patterns: Vec<Regex>,
}

impl HeuristicTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a case-insensitive pattern that marks matching spans as variable
    pub fn with_pattern(mut self, pattern: &str) -> crate::Result<Self> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        self.extra_patterns.push(regex);
        Ok(self)
    }

    /// Whether a single span looks like variable content
    pub fn is_variable(&self, span: &Span) -> bool {
        let text = span.text.trim();
        if text.is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();

        LABEL_PATTERNS.iter().any(|re| re.is_match(text))
            || self.extra_patterns.iter().any(|re| re.is_match(text))
            || (LONG_NUMBER.is_match(text)
                && IDENTIFIER_KEYWORDS.iter().any(|kw| lowered.contains(kw)))
            || EMAIL.is_match(text)
            || SENSITIVE_TOKENS.iter().any(|token| lowered.contains(token))
    }
}

impl VariableFieldTagger for HeuristicTagger {
    fn tag(&self, pages: &mut [PageContent]) {
        for page in pages.iter_mut() {
            let mut hits = 0;
            for span in page.spans.iter_mut() {
                if self.is_variable(span) {
                    span.is_variable = true;
                    hits += 1;
                }
            }
            if hits > 0 {
                log::debug!("page {}: tagged {} variable spans", page.page_number, hits);
            }
        }
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
