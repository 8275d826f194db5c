// ⚖️ Group Reconciler - Make visual groups match the partition
//
// Full reset-and-rebuild, never an incremental diff:
//   1. Reset phase: ungroup everything in the window. Failure here is
//      fatal and the build phase never starts.
//   2. Build phase: one group per non-empty selected bucket, in selection
//      order. A category that fails to group is recorded and skipped;
//      the remaining categories still get their groups.
//
// Uncategorized tabs are never grouped; after the reset they simply stay
// ungrouped. All host calls are awaited strictly in sequence.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::categories::{CategoryRegistry, GroupColor};
use crate::classifier::Partition;
use crate::error::SortError;
use crate::host::{GroupId, GroupUpdate, TabHost, WindowId};

// ============================================================================
// RECONCILE REPORT
// ============================================================================

/// Which host call a category failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupStage {
    Create,
    Update,
}

/// Per-category outcome of the build phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GroupResult {
    /// Group created and its properties applied
    Grouped { group_id: GroupId, tab_count: usize },

    /// Group creation or the follow-up property update failed;
    /// later categories were still attempted
    Failed { stage: GroupStage, reason: String },
}

impl GroupResult {
    pub fn is_grouped(&self) -> bool {
        matches!(self, GroupResult::Grouped { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOutcome {
    pub category_id: String,
    pub result: GroupResult,
}

/// What the reconciliation actually did, category by category.
///
/// Only categories that reached the build phase appear here; empty buckets
/// and the uncategorized bucket are skipped entirely.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub outcomes: Vec<CategoryOutcome>,
    pub reconciled_at: DateTime<Utc>,
}

impl ReconcileReport {
    /// True when every attempted category got its group.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_grouped())
    }

    pub fn grouped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_grouped())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.grouped_count()
    }

    pub fn outcome(&self, category_id: &str) -> Option<&GroupResult> {
        self.outcomes
            .iter()
            .find(|o| o.category_id == category_id)
            .map(|o| &o.result)
    }

    pub fn summary(&self) -> String {
        format!(
            "Reconciliation: {} groups created, {} failed",
            self.grouped_count(),
            self.failed_count()
        )
    }
}

// ============================================================================
// GROUP RECONCILER
// ============================================================================

pub struct GroupReconciler<'a, H: TabHost> {
    host: &'a H,
    registry: &'a CategoryRegistry,
}

impl<'a, H: TabHost> GroupReconciler<'a, H> {
    pub fn new(host: &'a H, registry: &'a CategoryRegistry) -> Self {
        GroupReconciler { host, registry }
    }

    /// Reset the window's grouping state and rebuild it from the partition.
    ///
    /// Returns Err only for the fatal reset failure; per-category failures
    /// are inside the report (degraded success).
    pub async fn reconcile(
        &self,
        partition: &Partition,
        window: WindowId,
    ) -> Result<ReconcileReport, SortError> {
        debug!("reset phase: removing existing groups");
        self.host
            .ungroup_all(window)
            .await
            .map_err(SortError::ResetFailed)?;

        let mut outcomes = Vec::new();

        for bucket in partition.buckets() {
            if bucket.tab_ids.is_empty() {
                debug!(category = %bucket.category_id, "skipping empty bucket");
                continue;
            }

            // Validated by the engine before classification
            let category = self.registry.get(&bucket.category_id)?;

            debug!(
                category = %category.id,
                tabs = bucket.tab_ids.len(),
                "build phase: creating group"
            );

            let group_id = match self.host.create_group(&bucket.tab_ids).await {
                Ok(id) => id,
                Err(err) => {
                    warn!(category = %category.id, error = %err, "group creation failed");
                    outcomes.push(CategoryOutcome {
                        category_id: category.id.clone(),
                        result: GroupResult::Failed {
                            stage: GroupStage::Create,
                            reason: err.to_string(),
                        },
                    });
                    continue;
                }
            };

            let update = GroupUpdate {
                title: format!("{} ({})", category.display_name, bucket.tab_ids.len()),
                color: GroupColor::from_hex(&category.color),
                collapsed: false,
            };

            let result = match self.host.update_group(group_id, update).await {
                Ok(()) => GroupResult::Grouped {
                    group_id,
                    tab_count: bucket.tab_ids.len(),
                },
                Err(err) => {
                    warn!(category = %category.id, error = %err, "group update failed");
                    GroupResult::Failed {
                        stage: GroupStage::Update,
                        reason: err.to_string(),
                    }
                }
            };

            outcomes.push(CategoryOutcome {
                category_id: category.id.clone(),
                result,
            });
        }

        Ok(ReconcileReport {
            outcomes,
            reconciled_at: Utc::now(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
