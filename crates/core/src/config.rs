//! Configuration for the comparison engine

use crate::classifiers::SpellingPolicy;
use crate::layout::LayoutComparator;
use serde::{Deserialize, Serialize};

/// Settings for one comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorSettings {
    /// Max allowed |delta| on any bbox edge before flagging a layout shift, in points
    pub layout_tolerance: f64,

    /// Max allowed |delta| in font size
    pub size_tolerance: f64,

    /// Hand results to the renderer for highlighted documents and previews
    pub enable_visuals: bool,

    /// First page to compare, 1-based inclusive
    pub start_page: Option<usize>,

    /// Last page to compare, 1-based inclusive
    pub end_page: Option<usize>,

    /// Minimum per-word similarity ratio for a spelling variation
    pub spelling_ratio_threshold: f64,

    /// Maximum per-word length difference for a spelling variation
    pub spelling_max_length_delta: usize,

    /// Fold comparison keys with NFKC before whitespace and case folding
    pub unicode_normalization: bool,
}

impl Default for ComparatorSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparatorSettings {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            layout_tolerance: 6.0,
            size_tolerance: 0.75,
            enable_visuals: true,
            start_page: None,
            end_page: None,
            spelling_ratio_threshold: 0.82,
            spelling_max_length_delta: 2,
            unicode_normalization: false,
        }
    }

    /// Any drift is reported; no rendering
    pub fn strict() -> Self {
        Self {
            layout_tolerance: 0.0,
            size_tolerance: 0.0,
            enable_visuals: false,
            ..Self::new()
        }
    }

    /// Wider tolerances for documents regenerated by a different producer
    pub fn lenient() -> Self {
        Self {
            layout_tolerance: 12.0,
            size_tolerance: 1.5,
            unicode_normalization: true,
            ..Self::new()
        }
    }

    /// Parse settings from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_layout_tolerance(mut self, tolerance: f64) -> Self {
        self.layout_tolerance = tolerance;
        self
    }

    pub fn with_size_tolerance(mut self, tolerance: f64) -> Self {
        self.size_tolerance = tolerance;
        self
    }

    pub fn with_visuals(mut self, enable: bool) -> Self {
        self.enable_visuals = enable;
        self
    }

    /// Restrict the comparison to a 1-based inclusive page range
    pub fn with_page_range(mut self, start_page: Option<usize>, end_page: Option<usize>) -> Self {
        self.start_page = start_page;
        self.end_page = end_page;
        self
    }

    pub fn with_spelling_policy(mut self, policy: SpellingPolicy) -> Self {
        self.spelling_ratio_threshold = policy.ratio_threshold;
        self.spelling_max_length_delta = policy.max_length_delta;
        self
    }

    pub fn with_unicode_normalization(mut self, enable: bool) -> Self {
        self.unicode_normalization = enable;
        self
    }

    pub fn layout_comparator(&self) -> LayoutComparator {
        LayoutComparator::new(self.layout_tolerance, self.size_tolerance)
    }

    pub fn spelling_policy(&self) -> SpellingPolicy {
        SpellingPolicy {
            ratio_threshold: self.spelling_ratio_threshold,
            max_length_delta: self.spelling_max_length_delta,
        }
    }
}
