use pagediff_core::classifiers::{looks_like_spelling_variation, SpellingPolicy};
use pagediff_core::tagger::NoopTagger;
use pagediff_core::{
    ComparatorSettings, ComparisonStatus, DiffCategory, DocumentComparator, PageContent, Span,
    SpanStatus,
};
use pretty_assertions::assert_eq;

fn page(number: usize, texts: &[&str]) -> PageContent {
    texts.iter().enumerate().fold(PageContent::new(number), |page, (i, text)| {
        let y = 72.0 + 18.0 * i as f64;
        page.with_span(
            Span::new(*text, (72.0, y, 300.0, y + 12.0))
                .with_indices(i, 0, 0)
                .with_font("Helvetica")
                .with_size(11.0),
        )
    })
}

fn quiet() -> DocumentComparator {
    DocumentComparator::new(ComparatorSettings::default().with_visuals(false))
}

#[test]
fn identical_documents_pass_with_every_span_matched() {
    let doc = vec![
        page(0, &["Declarations", "Coverage A: Dwelling", "Coverage B: Other Structures"]),
        page(1, &["Signature", "Date"]),
    ];
    let result = quiet().compare_pages(doc.clone(), doc.clone(), "golden", "copy");

    assert_eq!(result.status, ComparisonStatus::Pass);
    for (page_diff, content) in result.pages.iter().zip(&doc) {
        assert!(page_diff.span_diffs.is_empty());
        assert!(page_diff.layout_diffs.is_empty());
        assert!(page_diff.structural_diffs.is_empty());
        for position in 0..content.spans.len() {
            assert_eq!(page_diff.source_status_at(position), Some(SpanStatus::Match));
            assert_eq!(page_diff.target_status_at(position), Some(SpanStatus::Match));
        }
    }
}

#[test]
fn variable_fields_are_ignored() {
    let source = vec![page(0, &["Policy Number: 12345", "Total: $100"])];
    let target = vec![page(0, &["Policy Number: 54321", "Total: $100"])];

    let result = quiet().compare_pages(source, target, "golden", "target");

    assert_eq!(result.status, ComparisonStatus::Pass);
    assert!(!result.pages[0].has_differences());
}

#[test]
fn noop_tagger_treats_every_span_as_fixed() {
    let source = vec![page(0, &["Total: $100"])];
    let target = vec![page(0, &["Total: $100"])];

    let tagged = quiet().compare_pages(source.clone(), target.clone(), "a", "b");
    let untagged = quiet()
        .with_tagger(Box::new(NoopTagger))
        .compare_pages(source, target, "a", "b");

    assert_eq!(tagged.pages, untagged.pages);
}

#[test]
fn typo_and_removed_span_in_one_replace_run() {
    let source = vec![page(0, &["Hello world", "Goodbye"])];
    let target = vec![page(0, &["Hello wrold"])];

    let result = quiet().compare_pages(source.clone(), target.clone(), "golden", "target");
    let diffs = &result.pages[0].span_diffs;

    assert_eq!(result.status, ComparisonStatus::Fail);
    assert_eq!(diffs.len(), 2);

    assert!(diffs[0].pair.is_both());
    assert_eq!(diffs[0].source().map(|s| s.text.as_str()), Some("Hello world"));
    assert_eq!(diffs[0].target().map(|s| s.text.as_str()), Some("Hello wrold"));
    // The transposition scores 0.8, just under the default 0.82 threshold
    assert_eq!(diffs[0].category, DiffCategory::Mismatch);

    assert_eq!(diffs[1].source().map(|s| s.text.as_str()), Some("Goodbye"));
    assert!(diffs[1].target().is_none());
    assert_eq!(diffs[1].category, DiffCategory::Missing);

    let statuses = &result.pages[0];
    assert_eq!(statuses.source_status_at(0), Some(SpanStatus::Modified));
    assert_eq!(statuses.source_status_at(1), Some(SpanStatus::Missing));
    assert_eq!(statuses.target_status_at(0), Some(SpanStatus::Modified));
}

#[test]
fn spelling_variation_in_replace_run() {
    let source = vec![page(0, &["Colour of the roof"])];
    let target = vec![page(0, &["Color of the roof"])];

    let result = quiet().compare_pages(source, target, "golden", "target");
    let diff = &result.pages[0].span_diffs[0];

    assert_eq!(diff.category, DiffCategory::Spelling);
    assert_eq!(diff.detail, "Spelling variation: 'Colour of the roof' -> 'Color of the roof'");
}

#[test]
fn spelling_boundary() {
    let policy = SpellingPolicy::default();
    assert!(looks_like_spelling_variation("color", "colour", &policy));
    assert!(!looks_like_spelling_variation("color", "gravy", &policy));
}

#[test]
fn missing_and_extra_are_symmetric() {
    let short = vec![page(0, &["Intro", "Body"])];
    let long = vec![page(0, &["Intro", "Exclusions apply", "Body"])];

    let forward = quiet().compare_pages(short.clone(), long.clone(), "short", "long");
    let backward = quiet().compare_pages(long.clone(), short.clone(), "long", "short");

    let fwd = &forward.pages[0];
    assert_eq!(fwd.span_diffs.len(), 1);
    assert_eq!(fwd.span_diffs[0].category, DiffCategory::Extra);
    assert_eq!(fwd.target_status_at(1), Some(SpanStatus::Extra));

    let bwd = &backward.pages[0];
    assert_eq!(bwd.span_diffs.len(), 1);
    assert_eq!(bwd.span_diffs[0].category, DiffCategory::Missing);
    assert_eq!(bwd.source_status_at(1), Some(SpanStatus::Missing));
    assert_eq!(bwd.structural_diffs.len(), 1);

    for result in [&forward, &backward] {
        let counts = result.category_totals();
        assert_eq!(counts.modified, 0);
    }
}

#[test]
fn layout_tolerance_is_strict() {
    let source = vec![page(0, &["Premium"])];

    let mut at_limit = source.clone();
    at_limit[0].spans[0].bbox.x0 += 6.0;
    let result = quiet().compare_pages(source.clone(), at_limit, "a", "b");
    assert_eq!(result.status, ComparisonStatus::Pass);

    let mut past_limit = source.clone();
    past_limit[0].spans[0].bbox.x0 += 6.01;
    let result = quiet().compare_pages(source, past_limit, "a", "b");
    assert_eq!(result.status, ComparisonStatus::Fail);
    assert_eq!(result.pages[0].layout_diffs.len(), 1);
    assert!(result.pages[0].span_diffs.is_empty());
}

#[test]
fn font_change_is_a_layout_difference() {
    let source = vec![page(0, &["Premium"])];
    let mut target = source.clone();
    target[0].spans[0].font = Some("Times-Roman".to_string());

    let result = quiet().compare_pages(source, target, "a", "b");
    let layout = &result.pages[0].layout_diffs[0];
    assert_eq!(layout.delta_font.as_deref(), Some("Times-Roman"));
    assert!(layout.detail.contains("Font changed Helvetica -> Times-Roman"));
}

#[test]
fn one_failing_page_fails_the_document() {
    let source = vec![page(0, &["A"]), page(1, &["B"]), page(2, &["C"])];
    let mut target = source.clone();
    target[1].spans[0].text = "B2".to_string();

    let result = quiet().compare_pages(source, target, "a", "b");

    assert_eq!(result.status, ComparisonStatus::Fail);
    let failing: Vec<bool> = result.pages.iter().map(|p| p.has_differences()).collect();
    assert_eq!(failing, vec![false, true, false]);
}

#[test]
fn reversed_page_range_is_swapped() {
    let source = vec![page(0, &["A"]), page(1, &["B"]), page(2, &["C"]), page(3, &["D"])];
    let settings = ComparatorSettings::default()
        .with_visuals(false)
        .with_page_range(Some(3), Some(2));

    let result = DocumentComparator::new(settings).compare_pages(source.clone(), source, "a", "b");
    let compared: Vec<usize> = result.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(compared, vec![1, 2]);
}

#[test]
fn compare_json_layouts_end_to_end() {
    let golden = br#"{"pages": [
        {"spans": [
            {"text": "Policy Number: 12345", "bbox": [72, 72, 300, 84], "block": 0, "line": 0, "span": 0},
            {"text": "Total: $100", "bbox": [72, 90, 300, 102], "block": 1, "line": 0, "span": 0}
        ]},
        {"spans": [{"text": "Signature", "bbox": [72, 700, 200, 712]}]}
    ]}"#;
    let target = br#"{"pages": [
        {"spans": [
            {"text": "Policy Number: 99999", "bbox": [72, 72, 300, 84], "block": 0, "line": 0, "span": 0},
            {"text": "Total: $100", "bbox": [72, 90, 300, 102], "block": 1, "line": 0, "span": 0}
        ]}
    ]}"#;

    let result = DocumentComparator::default()
        .compare(golden, target, "golden.json", "target.json")
        .unwrap();

    assert_eq!(result.status, ComparisonStatus::Fail);
    assert!(!result.pages[0].has_differences());
    assert_eq!(
        result.pages[1].structural_diffs[0].description,
        "Missing page in target document"
    );
    assert!(result.notes.is_empty());
    assert!(result.artifacts.previews_source.contains_key(&1));
    assert!(!result.artifacts.previews_target.contains_key(&1));
}

#[test]
fn spans_with_clashing_indices_get_separate_statuses() {
    // "Removed line" has no indices and falls back to (1, 0, 0), the same as "Header"
    let golden = br#"{"pages": [{"spans": [
        {"text": "Header", "bbox": [72, 72, 300, 84], "block": 1, "line": 0, "span": 0},
        {"text": "Removed line", "bbox": [72, 90, 300, 102]}
    ]}]}"#;
    let target = br#"{"pages": [{"spans": [
        {"text": "Header", "bbox": [72, 72, 300, 84], "block": 1, "line": 0, "span": 0}
    ]}]}"#;

    let result = quiet().compare(golden, target, "golden.json", "target.json").unwrap();
    let page = &result.pages[0];

    assert_eq!(page.source_status_at(0), Some(SpanStatus::Match));
    assert_eq!(page.source_status_at(1), Some(SpanStatus::Missing));
    assert_eq!(page.category_counts().missing, 1);
    assert_eq!(result.category_totals().missing, 1);
}
