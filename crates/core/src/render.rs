//! Visual output for comparison results
//!
//! A [`Renderer`] receives the compared pages and the raw document bytes and
//! produces [`Artifacts`]. Rendering is best-effort: the engine turns any
//! [`RenderError`] into a note on the result.

use crate::error::RenderError;
use crate::model::{Artifacts, BBox, PageDiff, SpanStatus};
use std::fmt::Write as _;

/// Inputs handed to a renderer after comparison
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub source_bytes: &'a [u8],
    pub target_bytes: &'a [u8],
    pub pages: &'a [PageDiff],
}

/// Builds highlighted documents and page previews
pub trait Renderer: Send + Sync {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Artifacts, RenderError>;

    /// Get the name of this renderer
    fn name(&self) -> &str;
}

/// Produces no artifacts
#[derive(Debug, Clone, Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render(&self, _request: &RenderRequest<'_>) -> Result<Artifacts, RenderError> {
        Ok(Artifacts::default())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Which document a highlight belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }
}

/// What a highlight marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Missing,
    Extra,
    Modified,
    Layout,
    Structural,
}

impl HighlightKind {
    /// RGB stroke colour
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            HighlightKind::Missing => (255, 64, 64),
            HighlightKind::Extra => (51, 102, 255),
            HighlightKind::Modified => (255, 242, 102),
            HighlightKind::Layout => (255, 153, 51),
            HighlightKind::Structural => (153, 0, 153),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightKind::Missing => "missing",
            HighlightKind::Extra => "extra",
            HighlightKind::Modified => "modified",
            HighlightKind::Layout => "layout",
            HighlightKind::Structural => "structural",
        }
    }
}

/// One rectangle to draw on a page
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub bbox: BBox,
    pub kind: HighlightKind,
    pub title: &'static str,
    pub content: String,
}

/// Highlights for one side of a compared page.
///
/// Source pages show missing and modified spans. Target pages show every
/// non-matching span, layout shifts, and deleted-content markers at the
/// position they occupied in the source.
pub fn highlights(page: &PageDiff, side: Side) -> Vec<Highlight> {
    let mut out = Vec::new();

    match side {
        Side::Source => {
            for (span, status) in page.source_statuses() {
                let kind = match status {
                    Some(SpanStatus::Missing) => HighlightKind::Missing,
                    Some(SpanStatus::Modified) => HighlightKind::Modified,
                    _ => continue,
                };
                out.push(Highlight {
                    bbox: span.bbox,
                    kind,
                    title: "Source difference",
                    content: span.trimmed().to_string(),
                });
            }
        }
        Side::Target => {
            for (span, status) in page.target_statuses() {
                let kind = match status {
                    Some(SpanStatus::Extra) => HighlightKind::Extra,
                    Some(SpanStatus::Modified) => HighlightKind::Modified,
                    Some(SpanStatus::Missing) => HighlightKind::Missing,
                    _ => continue,
                };
                out.push(Highlight {
                    bbox: span.bbox,
                    kind,
                    title: "Target difference",
                    content: span.trimmed().to_string(),
                });
            }
            for layout in &page.layout_diffs {
                out.push(Highlight {
                    bbox: layout.bbox(),
                    kind: HighlightKind::Layout,
                    title: "Layout difference",
                    content: layout.detail.clone(),
                });
            }
            for structural in &page.structural_diffs {
                if let Some(bbox) = structural.bbox {
                    out.push(Highlight {
                        bbox,
                        kind: HighlightKind::Missing,
                        title: "Missing content",
                        content: structural.description.clone(),
                    });
                }
            }
        }
    }

    out
}

/// Draws span outlines as SVG page previews.
///
/// Works purely from extracted geometry, so it needs no rasterizer and ignores
/// the document bytes. The canvas covers at least `page_size` and grows to fit
/// any span that lies outside it.
#[derive(Debug, Clone)]
pub struct SvgPreviewRenderer {
    page_size: (f64, f64),
    inflate: f64,
    line_width: f64,
}

impl Default for SvgPreviewRenderer {
    fn default() -> Self {
        Self {
            page_size: (612.0, 792.0),
            inflate: 1.0,
            line_width: 1.5,
        }
    }
}

impl SvgPreviewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_size = (width, height);
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    /// Render one side of one page, or `None` if that side has no page
    pub fn render_page(&self, page: &PageDiff, side: Side) -> Result<Option<String>, RenderError> {
        let content = match side {
            Side::Source => page.source_page.as_ref(),
            Side::Target => page.target_page.as_ref(),
        };
        let Some(content) = content else {
            return Ok(None);
        };

        let invalid = || RenderError::InvalidGeometry {
            page: page.page_number,
            doc: side.as_str().to_string(),
        };

        let (mut width, mut height) = self.page_size;
        for span in &content.spans {
            if !is_finite(&span.bbox) {
                return Err(invalid());
            }
            width = width.max(span.bbox.x1);
            height = height.max(span.bbox.y1);
        }

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        );
        svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);

        // Outline every span faintly so highlights have context
        for span in &content.spans {
            let b = span.bbox;
            let _ = write!(
                svg,
                r##"<rect class="span" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#cccccc" stroke-width="0.5"/>"##,
                b.x0,
                b.y0,
                b.x1 - b.x0,
                b.y1 - b.y0
            );
        }

        for highlight in highlights(page, side) {
            if !is_finite(&highlight.bbox) {
                return Err(invalid());
            }
            let b = highlight.bbox;
            let (r, g, bl) = highlight.kind.color();
            let _ = write!(
                svg,
                r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="rgb({},{},{})" stroke-width="{}"><title>{}: {}</title></rect>"#,
                highlight.kind.as_str(),
                b.x0 - self.inflate,
                b.y0 - self.inflate,
                b.x1 - b.x0 + 2.0 * self.inflate,
                b.y1 - b.y0 + 2.0 * self.inflate,
                r,
                g,
                bl,
                self.line_width,
                highlight.title,
                escape_xml(&highlight.content)
            );
        }

        svg.push_str("</svg>");
        Ok(Some(svg))
    }
}

impl Renderer for SvgPreviewRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Artifacts, RenderError> {
        let mut artifacts = Artifacts::default();

        for page in request.pages {
            if let Some(svg) = self.render_page(page, Side::Source)? {
                artifacts.previews_source.insert(page.page_number, svg.into_bytes());
            }
            if let Some(svg) = self.render_page(page, Side::Target)? {
                artifacts.previews_target.insert(page.page_number, svg.into_bytes());
            }
        }

        log::debug!(
            "rendered {} source / {} target previews",
            artifacts.previews_source.len(),
            artifacts.previews_target.len()
        );
        Ok(artifacts)
    }

    fn name(&self) -> &str {
        "svg-preview"
    }
}

fn is_finite(bbox: &BBox) -> bool {
    [bbox.x0, bbox.y0, bbox.x1, bbox.y1].iter().all(|v| v.is_finite())
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
