// 📊 Result Aggregator - Per-category counts for the presentation layer
//
// Pure function over a partition: one row per non-empty bucket in partition
// order, an "unrecognized" row for the uncategorized tabs, then the two
// derived totals. Always succeeds.

use serde::Serialize;

use crate::categories::CategoryRegistry;
use crate::classifier::Partition;

/// Neutral color for the uncategorized row.
const UNRECOGNIZED_COLOR: &str = "#999999";
const CATEGORIZED_TOTAL_COLOR: &str = "#667eea";
const TOTAL_COLOR: &str = "#764ba2";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub count: usize,
    pub color: String,
}

impl SummaryRow {
    fn new(label: &str, count: usize, color: &str) -> Self {
        SummaryRow {
            label: label.to_string(),
            count,
            color: color.to_string(),
        }
    }
}

/// Turn a partition into the ordered summary rows.
///
/// Empty category buckets are omitted; the "Categorized" and "Total" rows
/// are always appended, even when zero.
pub fn summarize(partition: &Partition, registry: &CategoryRegistry) -> Vec<SummaryRow> {
    let mut rows = Vec::new();

    for bucket in partition.buckets() {
        if bucket.tab_ids.is_empty() {
            continue;
        }
        // Selection ids were validated before classification
        if let Ok(category) = registry.get(&bucket.category_id) {
            rows.push(SummaryRow::new(
                &category.display_name,
                bucket.tab_ids.len(),
                &category.color,
            ));
        }
    }

    if !partition.uncategorized().is_empty() {
        rows.push(SummaryRow::new(
            "❓ Unrecognized",
            partition.uncategorized().len(),
            UNRECOGNIZED_COLOR,
        ));
    }

    rows.push(SummaryRow::new(
        "📊 Categorized",
        partition.categorized_count(),
        CATEGORIZED_TOTAL_COLOR,
    ));
    rows.push(SummaryRow::new(
        "📋 Total",
        partition.total_tabs(),
        TOTAL_COLOR,
    ));

    rows
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryRegistry;
    use crate::classifier::Classifier;
    use crate::host::{Tab, TabId, WindowId};

    fn tab(id: i64, url: &str) -> Tab {
        Tab {
            id: TabId(id),
            url: Some(url.to_string()),
            window_id: WindowId(1),
        }
    }

    fn selection(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_summary_rows_for_end_to_end_example() {
        let registry = CategoryRegistry::with_defaults();
        let tabs = vec![
            tab(1, "https://youtube.com/watch"),
            tab(2, "https://github.com/org/repo"),
            tab(3, "https://example.org"),
            tab(4, ""),
        ];
        let partition =
            Classifier::new(&registry).classify(&tabs, &selection(&["entertainment", "study"]));

        let rows = summarize(&partition, &registry);

        let expected: Vec<(&str, usize)> = vec![
            ("🎬 Entertainment", 1),
            ("📚 Study", 1),
            ("❓ Unrecognized", 2),
            ("📊 Categorized", 2),
            ("📋 Total", 4),
        ];
        let actual: Vec<(&str, usize)> =
            rows.iter().map(|r| (r.label.as_str(), r.count)).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_empty_buckets_are_omitted() {
        let registry = CategoryRegistry::with_defaults();
        let tabs = vec![tab(1, "https://github.com/org/repo")];
        let partition =
            Classifier::new(&registry).classify(&tabs, &selection(&["entertainment", "study"]));

        let rows = summarize(&partition, &registry);

        assert!(rows.iter().all(|r| r.label != "🎬 Entertainment"));
        assert_eq!(rows[0].label, "📚 Study");
        assert_eq!(rows[0].color, "#4ECDC4");
    }

    #[test]
    fn test_totals_always_present() {
        let registry = CategoryRegistry::with_defaults();
        let tabs = vec![tab(1, "https://nowhere.example")];
        let partition = Classifier::new(&registry).classify(&tabs, &selection(&["study"]));

        let rows = summarize(&partition, &registry);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], SummaryRow::new("❓ Unrecognized", 1, "#999999"));
        assert_eq!(rows[1], SummaryRow::new("📊 Categorized", 0, "#667eea"));
        assert_eq!(rows[2], SummaryRow::new("📋 Total", 1, "#764ba2"));
    }
}
