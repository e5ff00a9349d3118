//! Document extraction boundary
//!
//! An [`Extractor`] turns raw document bytes into pages of positioned spans in
//! natural reading order. PDF parsing lives outside this crate; the bundled
//! [`JsonExtractor`] reads a pre-extracted layout.

use crate::error::ExtractError;
use crate::model::{BBox, PageContent, Span};
use serde::Deserialize;

/// Turns document bytes into ordered pages
pub trait Extractor: Send + Sync {
    /// Extract every page. Spans must be in reading order with a consistent
    /// per-page coordinate system.
    fn extract(&self, bytes: &[u8]) -> Result<Vec<PageContent>, ExtractError>;

    /// Get the name of this extractor
    fn name(&self) -> &str;
}

#[derive(Debug, Deserialize)]
struct LayoutDocument {
    #[serde(default)]
    pages: Vec<LayoutPage>,
}

#[derive(Debug, Deserialize)]
struct LayoutPage {
    page_number: Option<usize>,
    #[serde(default)]
    spans: Vec<LayoutSpan>,
}

#[derive(Debug, Deserialize)]
struct LayoutSpan {
    text: String,
    bbox: [f64; 4],
    block: Option<usize>,
    line: Option<usize>,
    span: Option<usize>,
    font: Option<String>,
    size: Option<f64>,
}

/// Reads a JSON layout of the form
///
/// ```json
/// {"pages": [{"spans": [{"text": "Total", "bbox": [10, 20, 60, 32],
///                        "block": 0, "line": 0, "span": 0,
///                        "font": "Helvetica", "size": 11.0}]}]}
/// ```
///
/// Pages without a `page_number` are numbered by position. Whitespace-only
/// spans are dropped. Spans without reading-order indices get `(position, 0, 0)`.
#[derive(Debug, Clone, Default)]
pub struct JsonExtractor;

impl JsonExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for JsonExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Vec<PageContent>, ExtractError> {
        let text = std::str::from_utf8(bytes)?;
        if text.trim().is_empty() {
            return Err(ExtractError::Malformed("empty input".to_string()));
        }
        let document: LayoutDocument = serde_json::from_str(text)?;

        let pages = document
            .pages
            .into_iter()
            .enumerate()
            .map(|(position, page)| {
                let page_number = page.page_number.unwrap_or(position);
                let spans = page
                    .spans
                    .into_iter()
                    .enumerate()
                    .filter(|(_, raw)| !raw.text.trim().is_empty())
                    .map(|(index, raw)| to_span(page_number, index, raw))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok::<_, ExtractError>(PageContent { page_number, spans })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("extracted {} pages from JSON layout", pages.len());
        Ok(pages)
    }

    fn name(&self) -> &str {
        "json"
    }
}

fn to_span(page_number: usize, position: usize, raw: LayoutSpan) -> Result<Span, ExtractError> {
    let [x0, y0, x1, y1] = raw.bbox;
    if raw.bbox.iter().any(|v| !v.is_finite()) {
        return Err(ExtractError::Unsupported(format!(
            "non-finite bounding box on page {} span {}",
            page_number, position
        )));
    }

    let (block, line, span) = match (raw.block, raw.line, raw.span) {
        (Some(block), Some(line), Some(span)) => (block, line, span),
        _ => (position, 0, 0),
    };

    Ok(Span {
        text: raw.text,
        bbox: BBox::new(x0, y0, x1, y1),
        page_number,
        block_index: block,
        line_index: line,
        span_index: span,
        font: raw.font,
        size: raw.size,
        is_variable: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_layout() {
        let json = br#"{"pages": [
            {"spans": [
                {"text": "Total", "bbox": [10, 20, 60, 32], "block": 2, "line": 1, "span": 0, "font": "Helvetica", "size": 11.0},
                {"text": "   ", "bbox": [0, 0, 0, 0]},
                {"text": "$100", "bbox": [70, 20, 90, 32]}
            ]},
            {"page_number": 7, "spans": []}
        ]}"#;

        let pages = JsonExtractor::new().extract(json).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].spans.len(), 2);

        let total = &pages[0].spans[0];
        assert_eq!(total.font.as_deref(), Some("Helvetica"));
        assert_eq!((total.block_index, total.line_index), (2, 1));

        let amount = &pages[0].spans[1];
        assert_eq!(amount.block_index, 2);
        assert_eq!(amount.bbox, BBox::new(70.0, 20.0, 90.0, 32.0));
        assert!(amount.size.is_none());

        assert_eq!(pages[0].page_number, 0);
        assert_eq!(pages[1].page_number, 7);
    }

    #[test]
    fn test_malformed_input() {
        let extractor = JsonExtractor::new();
        assert!(matches!(extractor.extract(b""), Err(ExtractError::Malformed(_))));
        assert!(matches!(extractor.extract(b"{pages"), Err(ExtractError::Json(_))));
        assert!(matches!(extractor.extract(&[0xff, 0xfe]), Err(ExtractError::Utf8(_))));
    }

    #[test]
    fn test_empty_document() {
        let pages = JsonExtractor::new().extract(br#"{"pages": []}"#).unwrap();
        assert!(pages.is_empty());
    }
}
