//! Basic usage example of the pagediff library
//!
//! Run with `RUST_LOG=debug` to see per-page alignment details.

use pagediff_core::report::{detail_rows, page_table, Report};
use pagediff_core::tagger::NoopTagger;
use pagediff_core::{compare_documents, ComparatorSettings, DocumentComparator};

const LINE: &str = "----------------------------------------";

const GOLDEN: &str = r#"{"pages": [
    {"spans": [
        {"text": "Policy Number: 12345", "bbox": [72, 72, 300, 84], "font": "Helvetica", "size": 11},
        {"text": "Coverage applies to the dwelling", "bbox": [72, 90, 400, 102], "font": "Helvetica", "size": 11},
        {"text": "Premium: $1,200", "bbox": [72, 108, 300, 120], "font": "Helvetica", "size": 11},
        {"text": "Goodbye", "bbox": [72, 126, 300, 138], "font": "Helvetica", "size": 11}
    ]},
    {"spans": [{"text": "Signature", "bbox": [72, 700, 200, 712]}]}
]}"#;

const TARGET: &str = r#"{"pages": [
    {"spans": [
        {"text": "Policy Number: 98765", "bbox": [72, 72, 300, 84], "font": "Helvetica", "size": 11},
        {"text": "Coverage aplies to the dwelling", "bbox": [72, 90, 400, 102], "font": "Helvetica", "size": 11},
        {"text": "Premium: $1,200", "bbox": [90, 108, 318, 120], "font": "Helvetica-Bold", "size": 11}
    ]}
]}"#;

fn main() {
    env_logger::init();

    println!("=== PageDiff Examples ===\n");

    // Example 1: Default settings
    example_simple_comparison();

    // Example 2: Custom settings and tagging
    example_custom_settings();

    // Example 3: Reporting
    example_report();
}

fn example_simple_comparison() {
    println!("Example 1: Simple Comparison");
    println!("{}", LINE);

    match compare_documents(GOLDEN.as_bytes(), TARGET.as_bytes(), None) {
        Ok(result) => println!("{}", result),
        Err(e) => eprintln!("comparison failed: {}", e),
    }
}

fn example_custom_settings() {
    println!("Example 2: Custom Settings");
    println!("{}", LINE);

    let settings = ComparatorSettings::lenient()
        .with_layout_tolerance(20.0)
        .with_page_range(Some(1), Some(1))
        .with_visuals(false);
    let comparator = DocumentComparator::new(settings).with_tagger(Box::new(NoopTagger));

    match comparator.compare(GOLDEN.as_bytes(), TARGET.as_bytes(), "golden.json", "target.json") {
        Ok(result) => {
            println!("{}", result.summary());
            for row in detail_rows(&result) {
                println!("  [{}] {}", row.diff_type, row.description);
            }
        }
        Err(e) => eprintln!("comparison failed: {}", e),
    }
    println!();
}

fn example_report() {
    println!("Example 3: Reporting");
    println!("{}", LINE);

    let comparator = DocumentComparator::default();
    let result = match comparator.compare(GOLDEN.as_bytes(), TARGET.as_bytes(), "golden.json", "target.json") {
        Ok(result) => result,
        Err(e) => {
            eprintln!("comparison failed: {}", e);
            return;
        }
    };

    for row in page_table(&result) {
        println!(
            "page {}: {} ({} textual, {} layout, {} structural)",
            row.page, row.status, row.textual, row.layout, row.structural
        );
    }
    println!(
        "{} source / {} target previews rendered",
        result.artifacts.previews_source.len(),
        result.artifacts.previews_target.len()
    );

    match Report::new(&result).to_json() {
        Ok(json) => println!("\n{}", json),
        Err(e) => eprintln!("could not serialize report: {}", e),
    }
}
