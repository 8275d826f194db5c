// 🧮 Classifier - Partition tabs into category buckets
//
// Pure function over a tab snapshot: every tab lands in exactly one bucket,
// input order is preserved within each bucket, and the first matching
// category in selection order wins. No host calls, no side effects.

use serde::Serialize;

use crate::categories::CategoryRegistry;
use crate::host::{Tab, TabId};

// ============================================================================
// PARTITION
// ============================================================================

/// One category's share of the partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub category_id: String,
    pub tab_ids: Vec<TabId>,
}

/// The complete result of one classification run.
///
/// Buckets appear in selection order, one per selected category (empty
/// buckets included). Invariant: buckets plus `uncategorized` are disjoint
/// and together contain every input tab exactly once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition {
    buckets: Vec<Bucket>,
    uncategorized: Vec<TabId>,
}

impl Partition {
    /// Buckets in selection order, uncategorized excluded.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Tab ids assigned to one selected category.
    pub fn bucket(&self, category_id: &str) -> Option<&[TabId]> {
        self.buckets
            .iter()
            .find(|b| b.category_id == category_id)
            .map(|b| b.tab_ids.as_slice())
    }

    /// Tabs that matched no selected category (or had no URL).
    pub fn uncategorized(&self) -> &[TabId] {
        &self.uncategorized
    }

    /// Tabs assigned to some selected category.
    pub fn categorized_count(&self) -> usize {
        self.buckets.iter().map(|b| b.tab_ids.len()).sum()
    }

    /// All tabs, categorized or not.
    pub fn total_tabs(&self) -> usize {
        self.categorized_count() + self.uncategorized.len()
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

pub struct Classifier<'a> {
    registry: &'a CategoryRegistry,
}

impl<'a> Classifier<'a> {
    pub fn new(registry: &'a CategoryRegistry) -> Self {
        Classifier { registry }
    }

    /// Partition `tabs` across `selected` category ids.
    ///
    /// For each tab in input order:
    /// 1. no URL (absent or empty) → uncategorized;
    /// 2. otherwise the first category in selection order with any matching
    ///    pattern wins, even if a later one would also match;
    /// 3. no match → uncategorized.
    ///
    /// Duplicate selected ids are collapsed onto their first occurrence so
    /// the disjointness invariant holds. Unknown ids are the caller's
    /// problem; the engine rejects them before classification starts.
    pub fn classify(&self, tabs: &[Tab], selected: &[String]) -> Partition {
        let mut buckets: Vec<Bucket> = Vec::with_capacity(selected.len());
        for id in selected {
            if !buckets.iter().any(|b| &b.category_id == id) {
                buckets.push(Bucket {
                    category_id: id.clone(),
                    tab_ids: Vec::new(),
                });
            }
        }

        let mut uncategorized = Vec::new();

        for tab in tabs {
            let url = match tab.url.as_deref() {
                Some(url) if !url.is_empty() => url,
                _ => {
                    uncategorized.push(tab.id);
                    continue;
                }
            };

            let matched = buckets.iter_mut().find(|bucket| {
                self.registry
                    .get(&bucket.category_id)
                    .map(|category| category.matches_url(url))
                    .unwrap_or(false)
            });

            match matched {
                Some(bucket) => bucket.tab_ids.push(tab.id),
                None => uncategorized.push(tab.id),
            }
        }

        Partition {
            buckets,
            uncategorized,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
