//! # PageDiff Library
//!
//! Compares a golden paginated document against a target version and reports
//! which text went missing, which text is new or modified, which spans moved or
//! changed typography, and which pages were added or removed.
//!
//! ## Core Concepts
//!
//! - **Extractors**: Turn document bytes into pages of positioned spans
//! - **Taggers**: Mark variable fields (names, IDs, dates) to skip during matching
//! - **PageComparator**: Aligns span sequences and classifies every difference
//! - **DocumentComparator**: Resolves the page range and aggregates a pass/fail result
//! - **Renderers**: Turn the result into highlighted previews, best-effort
//!
//! ## Example
//!
//! ```rust
//! use pagediff_core::{ComparatorSettings, ComparisonStatus, DocumentComparator};
//!
//! let golden = br#"{"pages": [{"spans": [{"text": "Total: $100", "bbox": [10, 10, 90, 22]}]}]}"#;
//! let target = br#"{"pages": [{"spans": [{"text": "Total: $120", "bbox": [10, 10, 90, 22]}]}]}"#;
//!
//! let comparator = DocumentComparator::new(ComparatorSettings::default().with_visuals(false));
//! let result = comparator.compare(golden, target, "golden.json", "target.json").unwrap();
//! assert_eq!(result.status, ComparisonStatus::Fail);
//! ```

pub mod algorithm;
pub mod classifiers;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod layout;
pub mod model;
pub mod normalizers;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod tagger;

// Re-export main types
pub use config::ComparatorSettings;
pub use engine::{DocumentComparator, PageRange};
pub use error::{Error, ExtractError, RenderError, Result};
pub use model::{
    Artifacts, BBox, ComparisonResult, ComparisonStatus, DiffCategory, DiffType, LayoutDiff,
    PageContent, PageDiff, Span, SpanDiff, SpanPair, SpanStatus, StructuralDiff,
};
pub use page::PageComparator;
pub use pipeline::TextPipeline;

/// Main entry point for comparing two JSON page layouts
///
/// # Arguments
///
/// * `source` - The golden document layout
/// * `target` - The layout under test
/// * `settings` - Optional settings (uses default if None)
///
/// # Example
///
/// ```rust
/// use pagediff_core::compare_documents;
///
/// let doc = br#"{"pages": [{"spans": [{"text": "Hello", "bbox": [0, 0, 40, 12]}]}]}"#;
/// let result = compare_documents(doc, doc, None).unwrap();
/// println!("{}", result.summary());
/// ```
pub fn compare_documents(
    source: &[u8],
    target: &[u8],
    settings: Option<ComparatorSettings>,
) -> Result<ComparisonResult> {
    let comparator = DocumentComparator::new(settings.unwrap_or_default());
    comparator.compare(source, target, "source", "target")
}
