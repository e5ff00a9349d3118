//! Tabular views of comparison results for reporting layers

use crate::model::{ComparisonResult, DiffCategory, DiffType, PageDiff};
use serde::Serialize;
use std::fmt;

/// One row per compared document pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub golden: String,
    pub target: String,
    /// "PASS" or "FAIL"
    pub status: String,
    pub textual: usize,
    pub layout: usize,
    pub structural: usize,
    pub missing: usize,
    pub extra: usize,
    pub modified: usize,
}

impl SummaryRow {
    pub fn from_result(result: &ComparisonResult) -> Self {
        let counts = result.summary_counts();
        let categories = result.category_totals();
        Self {
            golden: result.source_name.clone(),
            target: result.target_name.clone(),
            status: result.status.as_str().to_uppercase(),
            textual: counts.textual,
            layout: counts.layout,
            structural: counts.structural,
            missing: categories.missing,
            extra: categories.extra,
            modified: categories.modified,
        }
    }
}

/// One row per compared page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRow {
    pub target: String,
    /// 1-based page number
    pub page: usize,
    pub textual: usize,
    pub layout: usize,
    pub structural: usize,
    pub missing: usize,
    pub extra: usize,
    pub modified: usize,
    pub status: String,
}

impl PageRow {
    pub fn from_page(target: &str, page: &PageDiff) -> Self {
        let summary = page.difference_summary();
        let categories = page.category_counts();
        Self {
            target: target.to_string(),
            page: page.page_number + 1,
            textual: summary.textual,
            layout: summary.layout,
            structural: summary.structural,
            missing: categories.missing,
            extra: categories.extra,
            modified: categories.modified,
            status: if page.has_differences() { "FAIL" } else { "PASS" }.to_string(),
        }
    }
}

/// One row per individual difference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    /// `"<golden> ➜ <target>"`
    pub pair_label: String,
    /// 1-based page number
    pub page: usize,
    pub diff_type: DiffType,
    /// Only set for textual differences
    pub category: Option<DiffCategory>,
    pub description: String,
    /// Key of the page preview, `page-<zero-based index>`
    pub preview_ref: String,
}

/// Summary rows for a batch of results
pub fn summary_table<'a>(results: impl IntoIterator<Item = &'a ComparisonResult>) -> Vec<SummaryRow> {
    results.into_iter().map(SummaryRow::from_result).collect()
}

pub fn page_table(result: &ComparisonResult) -> Vec<PageRow> {
    result
        .pages
        .iter()
        .map(|page| PageRow::from_page(&result.target_name, page))
        .collect()
}

/// Every difference of a result, textual first, then layout, then structural, page by page
pub fn detail_rows(result: &ComparisonResult) -> Vec<DetailRow> {
    let pair_label = format!("{} ➜ {}", result.source_name, result.target_name);
    let mut rows = Vec::new();

    for page in &result.pages {
        let row = |diff_type, category, description: String| DetailRow {
            pair_label: pair_label.clone(),
            page: page.page_number + 1,
            diff_type,
            category,
            description,
            preview_ref: format!("page-{}", page.page_number),
        };

        for diff in &page.span_diffs {
            let description = if diff.detail.is_empty() {
                diff.target()
                    .map_or_else(|| "Text changed".to_string(), |span| span.text.clone())
            } else {
                diff.detail.clone()
            };
            rows.push(row(diff.diff_type, Some(diff.category), description));
        }
        for diff in &page.layout_diffs {
            let description = if diff.detail.is_empty() {
                "Layout difference".to_string()
            } else {
                diff.detail.clone()
            };
            rows.push(row(DiffType::Layout, None, description));
        }
        for diff in &page.structural_diffs {
            rows.push(row(DiffType::Structure, None, diff.description.clone()));
        }
    }

    rows
}

/// Serializable report of one comparison
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub summary: SummaryRow,
    pub pages: Vec<PageRow>,
    pub details: Vec<DetailRow>,
    pub notes: Vec<String>,
}

impl Report {
    pub fn new(result: &ComparisonResult) -> Self {
        Self {
            summary: SummaryRow::from_result(result),
            pages: page_table(result),
            details: detail_rows(result),
            notes: result.notes.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Comparison Result ===")?;
        writeln!(f, "{}", self.summary())?;

        let details = detail_rows(self);
        if !details.is_empty() {
            writeln!(f, "\nDifferences:")?;
            for row in &details {
                writeln!(f, "  [page {}] {}: {}", row.page, row.diff_type, row.description)?;
            }
        }

        if !self.notes.is_empty() {
            writeln!(f, "\nNotes:")?;
            for note in &self.notes {
                writeln!(f, "  - {}", note)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageContent, Span};
    use crate::page::PageComparator;

    fn page(texts: &[&str]) -> PageContent {
        texts.iter().enumerate().fold(PageContent::new(0), |page, (i, text)| {
            let y = 20.0 * i as f64;
            page.with_span(Span::new(*text, (10.0, y, 200.0, y + 12.0)).with_indices(i, 0, 0))
        })
    }

    fn result() -> ComparisonResult {
        let comparator = PageComparator::default();
        let mut result = ComparisonResult::new("golden.pdf", "target.pdf");
        result.add_page(comparator.compare_page(0, Some(&page(&["Same"])), Some(&page(&["Same"]))));
        result.add_page(comparator.compare_page(
            1,
            Some(&page(&["Keep", "Drop"])),
            Some(&page(&["Keep"])),
        ));
        result.finalize();
        result
    }

    #[test]
    fn test_summary_row() {
        let result = result();
        let rows = summary_table([&result]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, "FAIL");
        assert_eq!(rows[0].textual, 1);
        assert_eq!(rows[0].structural, 1);
        assert_eq!(rows[0].missing, 1);
        assert_eq!(rows[0].modified, 0);
    }

    #[test]
    fn test_page_rows_are_one_based() {
        let rows = page_table(&result());
        assert_eq!(rows.iter().map(|r| r.page).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(rows[0].status, "PASS");
        assert_eq!(rows[1].status, "FAIL");
    }

    #[test]
    fn test_detail_rows() {
        let rows = detail_rows(&result());
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].pair_label, "golden.pdf ➜ target.pdf");
        assert_eq!(rows[0].page, 2);
        assert_eq!(rows[0].diff_type, DiffType::Text);
        assert_eq!(rows[0].category, Some(DiffCategory::Missing));
        assert_eq!(rows[0].preview_ref, "page-1");

        assert_eq!(rows[1].diff_type, DiffType::Structure);
        assert_eq!(rows[1].description, "Missing in target: 'Drop'");
    }

    #[test]
    fn test_json_report() {
        let json = Report::new(&result()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["status"], "FAIL");
        assert_eq!(value["details"][0]["diff_type"], "textual");
        assert_eq!(value["details"][0]["category"], "missing");
        assert_eq!(value["details"][1]["category"], serde_json::Value::Null);
    }

    #[test]
    fn test_display() {
        let mut result = result();
        result.notes.push("Visualization failed: boom".to_string());
        let text = result.to_string();

        assert!(text.starts_with("=== Comparison Result ===\n"));
        assert!(text.contains("[page 2] structural: Missing in target: 'Drop'"));
        assert!(text.contains("  - Visualization failed: boom"));
    }
}
