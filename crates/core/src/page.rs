//! Per-page comparison
//!
//! Aligns the fixed (non-variable) spans of two pages by comparison key and
//! turns every alignment run into span, layout and structural diffs.

use crate::algorithm::{LcsAligner, OpTag, Opcode, SequenceAligner};
use crate::classifiers::{ChangeClassifier, SpellingAwareClassifier};
use crate::config::ComparatorSettings;
use crate::layout::LayoutComparator;
use crate::model::{PageContent, PageDiff, Span, SpanDiff, SpanPair, SpanStatus, StructuralDiff};
use crate::pipeline::TextPipeline;

/// A fixed span with its position in [`PageContent::spans`]
type Placed<'a> = (usize, &'a Span);

/// Compares one page index of the golden document against the target
#[derive(Clone)]
pub struct PageComparator {
    layout: LayoutComparator,
    classifier: Box<dyn ChangeClassifier>,
    aligner: Box<dyn SequenceAligner>,
    key_pipeline: TextPipeline,
}

impl Default for PageComparator {
    fn default() -> Self {
        Self::new(&ComparatorSettings::default())
    }
}

impl PageComparator {
    pub fn new(settings: &ComparatorSettings) -> Self {
        Self {
            layout: settings.layout_comparator(),
            classifier: Box::new(SpellingAwareClassifier::new(settings.spelling_policy())),
            aligner: Box::new(LcsAligner::new()),
            key_pipeline: TextPipeline::comparison_key(settings.unicode_normalization),
        }
    }

    /// Replace the change classifier
    pub fn with_classifier(mut self, classifier: Box<dyn ChangeClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replace the sequence aligner
    pub fn with_aligner(mut self, aligner: Box<dyn SequenceAligner>) -> Self {
        self.aligner = aligner;
        self
    }

    /// Comparison key of a span's text
    pub fn comparison_key(&self, span: &Span) -> String {
        self.key_pipeline.apply(&span.text)
    }

    /// Compare the pages found at `page_number` in each document
    pub fn compare_page(
        &self,
        page_number: usize,
        source: Option<&PageContent>,
        target: Option<&PageContent>,
    ) -> PageDiff {
        let mut page_diff = PageDiff::new(page_number, source.cloned(), target.cloned());

        match (source, target) {
            (None, Some(target)) => {
                for position in 0..target.spans.len() {
                    page_diff.target_status.assign(position, SpanStatus::Extra);
                }
                page_diff.structural_diffs.push(
                    StructuralDiff::new("Extra page present in target document")
                        .with_spans(target.spans.clone()),
                );
                log::debug!("page {}: extra page in target ({} spans)", page_number, target.spans.len());
            }
            (Some(source), None) => {
                for position in 0..source.spans.len() {
                    page_diff.source_status.assign(position, SpanStatus::Missing);
                }
                page_diff.structural_diffs.push(
                    StructuralDiff::new("Missing page in target document")
                        .with_spans(source.spans.clone()),
                );
                log::debug!("page {}: missing page in target ({} spans)", page_number, source.spans.len());
            }
            (None, None) => {}
            (Some(source), Some(target)) => self.diff_spans(&mut page_diff, source, target),
        }

        page_diff
    }

    fn diff_spans(&self, page_diff: &mut PageDiff, source: &PageContent, target: &PageContent) {
        let src_spans: Vec<Placed<'_>> = source.fixed_spans().collect();
        let tgt_spans: Vec<Placed<'_>> = target.fixed_spans().collect();

        let src_keys: Vec<String> = src_spans.iter().map(|(_, s)| self.comparison_key(s)).collect();
        let tgt_keys: Vec<String> = tgt_spans.iter().map(|(_, s)| self.comparison_key(s)).collect();

        let opcodes = self.aligner.align(&src_keys, &tgt_keys);
        log::debug!(
            "page {}: {} source / {} target fixed spans, {} opcodes via {}",
            page_diff.page_number,
            src_spans.len(),
            tgt_spans.len(),
            opcodes.len(),
            self.aligner.name()
        );

        for op in &opcodes {
            match op.tag {
                OpTag::Equal => self.apply_equal(page_diff, op, &src_spans, &tgt_spans),
                OpTag::Replace => self.apply_replace(page_diff, op, &src_spans, &tgt_spans),
                OpTag::Delete => self.apply_delete(page_diff, op, &src_spans),
                OpTag::Insert => self.apply_insert(page_diff, op, &tgt_spans),
            }
        }
    }

    fn apply_equal(&self, page_diff: &mut PageDiff, op: &Opcode, src: &[Placed<'_>], tgt: &[Placed<'_>]) {
        let pairs = src[op.source.clone()].iter().zip(&tgt[op.target.clone()]);
        for (&(src_pos, source), &(tgt_pos, target)) in pairs {
            match self.layout.compare(source, target) {
                Some(layout_diff) => page_diff.layout_diffs.push(layout_diff),
                None => {
                    page_diff.source_status.assign(src_pos, SpanStatus::Match);
                    page_diff.target_status.assign(tgt_pos, SpanStatus::Match);
                }
            }
        }
    }

    /// Pairs spans by offset within the run; the shorter side runs out into one-sided diffs
    fn apply_replace(&self, page_diff: &mut PageDiff, op: &Opcode, src: &[Placed<'_>], tgt: &[Placed<'_>]) {
        let run = op.source_len().max(op.target_len());

        for offset in 0..run {
            let source = src[op.source.clone()].get(offset).copied();
            let target = tgt[op.target.clone()].get(offset).copied();

            match (source, target) {
                (Some((s, _)), Some((t, _))) => {
                    page_diff.source_status.assign(s, SpanStatus::Modified);
                    page_diff.target_status.assign(t, SpanStatus::Modified);
                }
                (Some((s, _)), None) => {
                    page_diff.source_status.assign(s, SpanStatus::Missing);
                }
                (None, Some((t, _))) => {
                    page_diff.target_status.assign(t, SpanStatus::Extra);
                }
                (None, None) => continue,
            }

            self.push_span_diff(page_diff, source.map(|(_, s)| s), target.map(|(_, t)| t));
        }
    }

    fn apply_delete(&self, page_diff: &mut PageDiff, op: &Opcode, src: &[Placed<'_>]) {
        for &(position, source) in &src[op.source.clone()] {
            page_diff.source_status.assign(position, SpanStatus::Missing);
            page_diff.structural_diffs.push(
                StructuralDiff::new(format!("Missing in target: '{}'", source.trimmed()))
                    .with_bbox(source.bbox)
                    .with_spans(vec![source.clone()]),
            );
            self.push_span_diff(page_diff, Some(source), None);
        }
    }

    fn apply_insert(&self, page_diff: &mut PageDiff, op: &Opcode, tgt: &[Placed<'_>]) {
        for &(position, target) in &tgt[op.target.clone()] {
            page_diff.target_status.assign(position, SpanStatus::Extra);
            self.push_span_diff(page_diff, None, Some(target));
        }
    }

    fn push_span_diff(&self, page_diff: &mut PageDiff, source: Option<&Span>, target: Option<&Span>) {
        if let Some(pair) = SpanPair::from_options(source, target) {
            let classification = self.classifier.classify(source, target);
            page_diff
                .span_diffs
                .push(SpanDiff::new(pair, classification.detail, classification.category));
        }
    }
}
