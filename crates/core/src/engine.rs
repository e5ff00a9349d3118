//! Document comparison engine that orchestrates the whole run

use crate::classifiers::ChangeClassifier;
use crate::config::ComparatorSettings;
use crate::error::{Error, Result};
use crate::extractor::{Extractor, JsonExtractor};
use crate::model::{ComparisonResult, PageContent};
use crate::page::PageComparator;
use crate::render::{RenderRequest, Renderer, SvgPreviewRenderer};
use crate::tagger::{HeuristicTagger, VariableFieldTagger};

/// Inclusive zero-based page index range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
}

impl PageRange {
    /// Resolve optional 1-based inclusive bounds against `total_pages`.
    ///
    /// Out-of-range bounds clamp to `[0, total_pages - 1]` and reversed bounds
    /// are swapped. Returns `None` when there are no pages.
    pub fn resolve(total_pages: usize, start_page: Option<usize>, end_page: Option<usize>) -> Option<Self> {
        let last = total_pages.checked_sub(1)?;

        let start = start_page.map_or(0, |p| p.saturating_sub(1)).min(last);
        let end = end_page.map_or(last, |p| p.saturating_sub(1)).min(last);

        Some(if start > end {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        })
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Compares a golden document against a target document
pub struct DocumentComparator {
    settings: ComparatorSettings,
    extractor: Box<dyn Extractor>,
    tagger: Box<dyn VariableFieldTagger>,
    renderer: Box<dyn Renderer>,
    pages: PageComparator,
}

impl DocumentComparator {
    /// Create a comparator reading JSON layouts, with heuristic tagging and
    /// SVG previews
    pub fn new(settings: ComparatorSettings) -> Self {
        Self {
            pages: PageComparator::new(&settings),
            settings,
            extractor: Box::new(JsonExtractor::new()),
            tagger: Box::new(HeuristicTagger::new()),
            renderer: Box::new(SvgPreviewRenderer::new()),
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_tagger(mut self, tagger: Box<dyn VariableFieldTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn ChangeClassifier>) -> Self {
        self.pages = self.pages.with_classifier(classifier);
        self
    }

    pub fn settings(&self) -> &ComparatorSettings {
        &self.settings
    }

    /// Compare two documents given as raw bytes.
    ///
    /// Only extraction failures are returned as errors; everything else ends
    /// up in the result.
    pub fn compare(
        &self,
        source: &[u8],
        target: &[u8],
        source_name: &str,
        target_name: &str,
    ) -> Result<ComparisonResult> {
        let source_pages = self.extract(source, source_name)?;
        let target_pages = self.extract(target, target_name)?;

        Ok(self.run(source_pages, target_pages, source, target, source_name, target_name))
    }

    /// Compare already-extracted pages. The renderer receives empty byte
    /// buffers.
    pub fn compare_pages(
        &self,
        source_pages: Vec<PageContent>,
        target_pages: Vec<PageContent>,
        source_name: &str,
        target_name: &str,
    ) -> ComparisonResult {
        self.run(source_pages, target_pages, &[], &[], source_name, target_name)
    }

    fn extract(&self, bytes: &[u8], name: &str) -> Result<Vec<PageContent>> {
        self.extractor.extract(bytes).map_err(|source| Error::Extraction {
            name: name.to_string(),
            source,
        })
    }

    fn run(
        &self,
        mut source_pages: Vec<PageContent>,
        mut target_pages: Vec<PageContent>,
        source_bytes: &[u8],
        target_bytes: &[u8],
        source_name: &str,
        target_name: &str,
    ) -> ComparisonResult {
        self.tagger.tag(&mut source_pages);
        self.tagger.tag(&mut target_pages);

        let mut result = ComparisonResult::new(source_name, target_name);
        let total_pages = source_pages.len().max(target_pages.len());

        let Some(range) = PageRange::resolve(total_pages, self.settings.start_page, self.settings.end_page)
        else {
            log::info!("{} vs {}: no pages to compare", source_name, target_name);
            return result;
        };

        log::debug!(
            "comparing pages {}..={} of {} ({} source, {} target)",
            range.start,
            range.end,
            total_pages,
            source_pages.len(),
            target_pages.len()
        );

        for index in range.iter() {
            let page_diff = self
                .pages
                .compare_page(index, source_pages.get(index), target_pages.get(index));
            result.add_page(page_diff);
        }
        result.finalize();

        if self.settings.enable_visuals && !result.pages.is_empty() {
            let request = RenderRequest {
                source_bytes,
                target_bytes,
                pages: &result.pages,
            };
            match self.renderer.render(&request) {
                Ok(artifacts) => result.artifacts = artifacts,
                Err(e) => {
                    log::warn!("renderer '{}' failed: {}", self.renderer.name(), e);
                    result.notes.push(format!("Visualization failed: {}", e));
                }
            }
        }

        log::info!("{}", result.summary());
        result
    }
}

impl Default for DocumentComparator {
    fn default() -> Self {
        Self::new(ComparatorSettings::default())
    }
}
