//! Comparison data model
//!
//! Spans and pages come in from an extractor; everything else is produced by a
//! single comparison run and owned by the resulting [`ComparisonResult`].

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// Axis-aligned bounding box in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Per-edge delta `other - self`
    pub fn delta_to(&self, other: &BBox) -> BBoxDelta {
        BBoxDelta {
            dx0: other.x0 - self.x0,
            dy0: other.y0 - self.y0,
            dx1: other.x1 - self.x1,
            dy1: other.y1 - self.y1,
        }
    }
}

impl From<(f64, f64, f64, f64)> for BBox {
    fn from((x0, y0, x1, y1): (f64, f64, f64, f64)) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}

/// Four-component bounding box delta
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BBoxDelta {
    pub dx0: f64,
    pub dy0: f64,
    pub dx1: f64,
    pub dy1: f64,
}

impl BBoxDelta {
    pub fn components(&self) -> [f64; 4] {
        [self.dx0, self.dy0, self.dx1, self.dy1]
    }

    /// Largest absolute edge movement
    pub fn max_abs(&self) -> f64 {
        self.components().iter().fold(0.0_f64, |acc, d| acc.max(d.abs()))
    }
}

/// Smallest unit of positioned text extracted from a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub bbox: BBox,
    #[serde(default)]
    pub page_number: usize,
    #[serde(default)]
    pub block_index: usize,
    #[serde(default)]
    pub line_index: usize,
    #[serde(default)]
    pub span_index: usize,
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub size: Option<f64>,
    /// Set by a variable-field tagger; variable spans are skipped during matching
    #[serde(default)]
    pub is_variable: bool,
}

impl Span {
    pub fn new(text: impl Into<String>, bbox: impl Into<BBox>) -> Self {
        Self {
            text: text.into(),
            bbox: bbox.into(),
            page_number: 0,
            block_index: 0,
            line_index: 0,
            span_index: 0,
            font: None,
            size: None,
            is_variable: false,
        }
    }

    pub fn with_page(mut self, page_number: usize) -> Self {
        self.page_number = page_number;
        self
    }

    pub fn with_indices(mut self, block: usize, line: usize, span: usize) -> Self {
        self.block_index = block;
        self.line_index = line;
        self.span_index = span;
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_variable(mut self, is_variable: bool) -> Self {
        self.is_variable = is_variable;
        self
    }

    /// Text with surrounding whitespace removed, as quoted in diff details
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// One page of spans in reading order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageContent {
    pub page_number: usize,
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl PageContent {
    pub fn new(page_number: usize) -> Self {
        Self {
            page_number,
            spans: Vec::new(),
        }
    }

    /// Append a span, stamping it with this page's number
    pub fn with_span(mut self, span: Span) -> Self {
        self.spans.push(span.with_page(self.page_number));
        self
    }

    /// Spans that take part in matching, with their position on the page
    pub fn fixed_spans(&self) -> impl Iterator<Item = (usize, &Span)> {
        self.spans.iter().enumerate().filter(|(_, span)| !span.is_variable)
    }
}

/// Outcome assigned to a span during a comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStatus {
    Match,
    Missing,
    Extra,
    Modified,
}

impl SpanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanStatus::Match => "match",
            SpanStatus::Missing => "missing",
            SpanStatus::Extra => "extra",
            SpanStatus::Modified => "modified",
        }
    }
}

impl fmt::Display for SpanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Span statuses for one side of a page, keyed by the span's position in
/// [`PageContent::spans`].
///
/// Reading-order indices are not unique within a page, positions are. The
/// first status recorded for a position sticks for the rest of the run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusMap {
    statuses: BTreeMap<usize, SpanStatus>,
}

impl StatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `status` at `position` unless it already has one. Returns whether it was recorded.
    pub fn assign(&mut self, position: usize, status: SpanStatus) -> bool {
        match self.statuses.entry(position) {
            Entry::Vacant(slot) => {
                slot.insert(status);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, position: usize) -> Option<SpanStatus> {
        self.statuses.get(&position).copied()
    }

    pub fn count(&self, status: SpanStatus) -> usize {
        self.statuses.values().filter(|s| **s == status).count()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Positions and statuses in page order
    pub fn iter(&self) -> impl Iterator<Item = (usize, SpanStatus)> + '_ {
        self.statuses.iter().map(|(position, status)| (*position, *status))
    }
}

/// Kind of difference, as grouped in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiffType {
    #[serde(rename = "textual")]
    Text,
    #[serde(rename = "layout")]
    Layout,
    #[serde(rename = "structural")]
    Structure,
}

impl DiffType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffType::Text => "textual",
            DiffType::Layout => "layout",
            DiffType::Structure => "structural",
        }
    }
}

impl fmt::Display for DiffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a textual divergence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffCategory {
    /// Verbatim text mismatch
    Mismatch,
    /// Same word count, every differing word a close variant
    Spelling,
    /// Present only in the target
    Extra,
    /// Present only in the source
    Missing,
}

impl DiffCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffCategory::Mismatch => "mismatch",
            DiffCategory::Spelling => "spelling",
            DiffCategory::Extra => "extra",
            DiffCategory::Missing => "missing",
        }
    }
}

impl fmt::Display for DiffCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The spans involved in a textual difference. At least one side is always present.
#[derive(Debug, Clone, PartialEq)]
pub enum SpanPair {
    Both { source: Span, target: Span },
    SourceOnly(Span),
    TargetOnly(Span),
}

impl SpanPair {
    /// Build a pair from two optional spans; `None` when both are absent
    pub fn from_options(source: Option<&Span>, target: Option<&Span>) -> Option<Self> {
        match (source, target) {
            (Some(s), Some(t)) => Some(SpanPair::Both {
                source: s.clone(),
                target: t.clone(),
            }),
            (Some(s), None) => Some(SpanPair::SourceOnly(s.clone())),
            (None, Some(t)) => Some(SpanPair::TargetOnly(t.clone())),
            (None, None) => None,
        }
    }

    pub fn source(&self) -> Option<&Span> {
        match self {
            SpanPair::Both { source, .. } | SpanPair::SourceOnly(source) => Some(source),
            SpanPair::TargetOnly(_) => None,
        }
    }

    pub fn target(&self) -> Option<&Span> {
        match self {
            SpanPair::Both { target, .. } | SpanPair::TargetOnly(target) => Some(target),
            SpanPair::SourceOnly(_) => None,
        }
    }

    pub fn is_both(&self) -> bool {
        matches!(self, SpanPair::Both { .. })
    }
}

/// One unit of textual divergence
#[derive(Debug, Clone, PartialEq)]
pub struct SpanDiff {
    pub pair: SpanPair,
    pub diff_type: DiffType,
    pub detail: String,
    pub category: DiffCategory,
}

impl SpanDiff {
    pub fn new(pair: SpanPair, detail: impl Into<String>, category: DiffCategory) -> Self {
        Self {
            pair,
            diff_type: DiffType::Text,
            detail: detail.into(),
            category,
        }
    }

    pub fn source(&self) -> Option<&Span> {
        self.pair.source()
    }

    pub fn target(&self) -> Option<&Span> {
        self.pair.target()
    }

    /// Highlight box: the target span's box when present, else the source's
    pub fn bbox(&self) -> BBox {
        match &self.pair {
            SpanPair::Both { target, .. } | SpanPair::TargetOnly(target) => target.bbox,
            SpanPair::SourceOnly(source) => source.bbox,
        }
    }
}

/// Positional or typographic drift between two matched spans
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDiff {
    pub source: Span,
    pub target: Span,
    pub delta_bbox: BBoxDelta,
    /// Target font, when the font changed
    pub delta_font: Option<String>,
    /// `target.size - source.size`, when the size changed beyond tolerance
    pub delta_size: Option<f64>,
    pub detail: String,
}

impl LayoutDiff {
    pub fn bbox(&self) -> BBox {
        self.target.bbox
    }
}

/// Page-level or deletion-level structural event
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralDiff {
    pub description: String,
    pub bbox: Option<BBox>,
    pub related_spans: Vec<Span>,
}

impl StructuralDiff {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            bbox: None,
            related_spans: Vec::new(),
        }
    }

    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_spans(mut self, spans: Vec<Span>) -> Self {
        self.related_spans = spans;
        self
    }
}

/// Counts of differences by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifferenceSummary {
    pub textual: usize,
    pub layout: usize,
    pub structural: usize,
}

impl std::ops::AddAssign for DifferenceSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.textual += rhs.textual;
        self.layout += rhs.layout;
        self.structural += rhs.structural;
    }
}

/// Counts of span outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub missing: usize,
    pub extra: usize,
    pub modified: usize,
}

impl std::ops::AddAssign for CategoryCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.missing += rhs.missing;
        self.extra += rhs.extra;
        self.modified += rhs.modified;
    }
}

/// Differences found on one page index
#[derive(Debug, Clone, PartialEq)]
pub struct PageDiff {
    /// Zero-based page index
    pub page_number: usize,
    pub span_diffs: Vec<SpanDiff>,
    pub layout_diffs: Vec<LayoutDiff>,
    pub structural_diffs: Vec<StructuralDiff>,
    pub source_page: Option<PageContent>,
    pub target_page: Option<PageContent>,
    pub source_status: StatusMap,
    pub target_status: StatusMap,
}

impl PageDiff {
    pub fn new(
        page_number: usize,
        source_page: Option<PageContent>,
        target_page: Option<PageContent>,
    ) -> Self {
        Self {
            page_number,
            span_diffs: Vec::new(),
            layout_diffs: Vec::new(),
            structural_diffs: Vec::new(),
            source_page,
            target_page,
            source_status: StatusMap::new(),
            target_status: StatusMap::new(),
        }
    }

    pub fn has_differences(&self) -> bool {
        !self.span_diffs.is_empty()
            || !self.layout_diffs.is_empty()
            || !self.structural_diffs.is_empty()
    }

    pub fn difference_summary(&self) -> DifferenceSummary {
        DifferenceSummary {
            textual: self
                .span_diffs
                .iter()
                .filter(|d| d.diff_type == DiffType::Text)
                .count(),
            layout: self.layout_diffs.len(),
            structural: self.structural_diffs.len(),
        }
    }

    /// Missing source spans, extra target spans, and paired modifications
    pub fn category_counts(&self) -> CategoryCounts {
        let missing = self.source_statuses().filter(|(_, s)| *s == Some(SpanStatus::Missing)).count();
        let extra = self.target_statuses().filter(|(_, s)| *s == Some(SpanStatus::Extra)).count();
        let modified = self.span_diffs.iter().filter(|d| d.pair.is_both()).count();

        CategoryCounts {
            missing,
            extra,
            modified,
        }
    }

    /// Status of the source span at `position` on this page
    pub fn source_status_at(&self, position: usize) -> Option<SpanStatus> {
        self.source_status.get(position)
    }

    pub fn target_status_at(&self, position: usize) -> Option<SpanStatus> {
        self.target_status.get(position)
    }

    /// Every source span with its status, in page order
    pub fn source_statuses(&self) -> impl Iterator<Item = (&Span, Option<SpanStatus>)> {
        statuses_of(self.source_page.as_ref(), &self.source_status)
    }

    pub fn target_statuses(&self) -> impl Iterator<Item = (&Span, Option<SpanStatus>)> {
        statuses_of(self.target_page.as_ref(), &self.target_status)
    }
}

fn statuses_of<'a>(
    page: Option<&'a PageContent>,
    statuses: &'a StatusMap,
) -> impl Iterator<Item = (&'a Span, Option<SpanStatus>)> {
    page.into_iter()
        .flat_map(|page| page.spans.iter().enumerate())
        .map(move |(position, span)| (span, statuses.get(position)))
}

/// Overall verdict of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    Pass,
    Fail,
}

impl ComparisonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonStatus::Pass => "pass",
            ComparisonStatus::Fail => "fail",
        }
    }
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered outputs produced by a [`Renderer`](crate::render::Renderer)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Artifacts {
    pub annotated_target: Option<Vec<u8>>,
    pub annotated_source: Option<Vec<u8>>,
    /// Preview image bytes keyed by zero-based page index
    pub previews_source: BTreeMap<usize, Vec<u8>>,
    pub previews_target: BTreeMap<usize, Vec<u8>>,
}

impl Artifacts {
    pub fn is_empty(&self) -> bool {
        self.annotated_target.is_none()
            && self.annotated_source.is_none()
            && self.previews_source.is_empty()
            && self.previews_target.is_empty()
    }
}

/// Complete result of comparing a golden document against a target
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub source_name: String,
    pub target_name: String,
    pub pages: Vec<PageDiff>,
    pub status: ComparisonStatus,
    pub notes: Vec<String>,
    pub artifacts: Artifacts,
}

impl ComparisonResult {
    pub fn new(source_name: impl Into<String>, target_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            target_name: target_name.into(),
            pages: Vec::new(),
            status: ComparisonStatus::Pass,
            notes: Vec::new(),
            artifacts: Artifacts::default(),
        }
    }

    pub fn add_page(&mut self, page: PageDiff) {
        self.pages.push(page);
    }

    pub fn has_differences(&self) -> bool {
        self.pages.iter().any(PageDiff::has_differences)
    }

    /// Derive `status` from the collected pages
    pub fn finalize(&mut self) {
        self.status = if self.has_differences() {
            ComparisonStatus::Fail
        } else {
            ComparisonStatus::Pass
        };
    }

    pub fn summary_counts(&self) -> DifferenceSummary {
        let mut totals = DifferenceSummary::default();
        for page in &self.pages {
            totals += page.difference_summary();
        }
        totals
    }

    pub fn category_totals(&self) -> CategoryCounts {
        let mut totals = CategoryCounts::default();
        for page in &self.pages {
            totals += page.category_counts();
        }
        totals
    }

    pub fn summary(&self) -> String {
        let counts = self.summary_counts();
        let categories = self.category_totals();
        format!(
            "{} vs {}: {} ({} pages, {} textual, {} layout, {} structural; \
             {} missing, {} extra, {} modified)",
            self.source_name,
            self.target_name,
            self.status.as_str().to_uppercase(),
            self.pages.len(),
            counts.textual,
            counts.layout,
            counts.structural,
            categories.missing,
            categories.extra,
            categories.modified
        )
    }
}
