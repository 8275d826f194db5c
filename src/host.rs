// 🌐 Host Tab-Management Capability
// The seam between the engine and the surrounding browser shell
//
// The engine never talks to a real browser directly; it issues requests
// through the TabHost trait and awaits each one before issuing the next.
// MemoryHost is the in-memory reference implementation used by the demo
// binary and the test suite.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use thiserror::Error;

use crate::categories::GroupColor;

// ============================================================================
// HANDLES
// ============================================================================

/// Opaque tab handle owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(pub i64);

/// Opaque window handle owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub i64);

/// Opaque group handle issued by the host on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// Tab descriptor supplied by the host. The engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    /// Absent for tabs the host cannot expose a URL for
    pub url: Option<String>,
    pub window_id: WindowId,
}

/// Properties applied to a group after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupUpdate {
    pub title: String,
    pub color: GroupColor,
    pub collapsed: bool,
}

// ============================================================================
// HOST ERRORS
// ============================================================================

#[derive(Debug, Clone, Error)]
pub enum HostError {
    /// A tab id in the request no longer exists (e.g. closed mid-run)
    #[error("stale tab id: {0}")]
    StaleTab(TabId),

    /// The group handle is not known to the host
    #[error("no such group: {0}")]
    GroupNotFound(GroupId),

    /// Anything else the host backend reports
    #[error("host backend error: {0}")]
    Backend(String),
}

// ============================================================================
// HOST CAPABILITY
// ============================================================================

/// The host tab-management contract.
///
/// All four calls are suspension points; the engine awaits each before
/// issuing the next, so implementations never see overlapping requests
/// from a single run.
#[async_trait]
pub trait TabHost: Send + Sync {
    /// Snapshot of the window's tabs, in visual order. No mutation.
    async fn query_tabs(&self, window: WindowId) -> Result<Vec<Tab>, HostError>;

    /// Remove every visual grouping in the window.
    async fn ungroup_all(&self, window: WindowId) -> Result<(), HostError>;

    /// Create a new group containing exactly the given tabs.
    async fn create_group(&self, tab_ids: &[TabId]) -> Result<GroupId, HostError>;

    /// Set a group's title, color, and collapsed state.
    async fn update_group(&self, group: GroupId, update: GroupUpdate) -> Result<(), HostError>;
}

// ============================================================================
// IN-MEMORY HOST
// ============================================================================

/// State of one visual group inside MemoryHost.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupState {
    pub tab_ids: Vec<TabId>,
    pub title: String,
    pub color: GroupColor,
    pub collapsed: bool,
}

#[derive(Default)]
struct HostState {
    tabs: Vec<Tab>,
    groups: HashMap<GroupId, GroupState>,
    next_group_id: i64,
    closed: Vec<TabId>,
    fail_next_ungroup: bool,
    fail_updates: bool,
    call_log: Vec<String>,
}

/// Single-window in-memory host.
///
/// Holds tabs and groups behind a mutex and records every capability call
/// in order, so tests can assert sequencing (reset always precedes the
/// first group creation). Failure injection knobs simulate the recoverable
/// and fatal host errors.
pub struct MemoryHost {
    state: Mutex<HostState>,
}

impl MemoryHost {
    pub fn with_tabs(tabs: Vec<Tab>) -> Self {
        MemoryHost {
            state: Mutex::new(HostState {
                tabs,
                next_group_id: 1,
                ..HostState::default()
            }),
        }
    }

    /// Mark a tab as closed: it stays in the snapshot already handed out,
    /// but any later create_group naming it fails with StaleTab.
    pub fn close_tab(&self, id: TabId) {
        self.state.lock().unwrap().closed.push(id);
    }

    /// Make the next ungroup_all call fail (fatal reset error).
    pub fn fail_next_ungroup(&self) {
        self.state.lock().unwrap().fail_next_ungroup = true;
    }

    /// Make every update_group call fail.
    pub fn fail_updates(&self) {
        self.state.lock().unwrap().fail_updates = true;
    }

    /// Snapshot of current groups.
    pub fn groups(&self) -> HashMap<GroupId, GroupState> {
        self.state.lock().unwrap().groups.clone()
    }

    /// Ordered trace of capability calls made so far.
    pub fn call_log(&self) -> Vec<String> {
        self.state.lock().unwrap().call_log.clone()
    }
}

#[async_trait]
impl TabHost for MemoryHost {
    async fn query_tabs(&self, window: WindowId) -> Result<Vec<Tab>, HostError> {
        let mut state = self.state.lock().unwrap();
        state.call_log.push("query_tabs".to_string());

        Ok(state
            .tabs
            .iter()
            .filter(|tab| tab.window_id == window)
            .cloned()
            .collect())
    }

    async fn ungroup_all(&self, _window: WindowId) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        state.call_log.push("ungroup_all".to_string());

        if state.fail_next_ungroup {
            state.fail_next_ungroup = false;
            return Err(HostError::Backend("cannot enumerate groups".to_string()));
        }

        state.groups.clear();
        Ok(())
    }

    async fn create_group(&self, tab_ids: &[TabId]) -> Result<GroupId, HostError> {
        let mut state = self.state.lock().unwrap();
        state.call_log.push(format!(
            "create_group[{}]",
            tab_ids
                .iter()
                .map(|id| id.0.to_string())
                .collect::<Vec<_>>()
                .join(",")
        ));

        if let Some(stale) = tab_ids.iter().find(|id| state.closed.contains(id)) {
            return Err(HostError::StaleTab(*stale));
        }

        let id = GroupId(state.next_group_id);
        state.next_group_id += 1;
        state.groups.insert(
            id,
            GroupState {
                tab_ids: tab_ids.to_vec(),
                title: String::new(),
                color: GroupColor::Grey,
                collapsed: false,
            },
        );
        Ok(id)
    }

    async fn update_group(&self, group: GroupId, update: GroupUpdate) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        state.call_log.push(format!("update_group[{}]", group.0));

        if state.fail_updates {
            return Err(HostError::Backend("update rejected".to_string()));
        }

        let entry = state
            .groups
            .get_mut(&group)
            .ok_or(HostError::GroupNotFound(group))?;
        entry.title = update.title;
        entry.color = update.color;
        entry.collapsed = update.collapsed;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: i64, url: &str) -> Tab {
        Tab {
            id: TabId(id),
            url: Some(url.to_string()),
            window_id: WindowId(1),
        }
    }

    #[tokio::test]
    async fn test_memory_host_group_lifecycle() {
        let host = MemoryHost::with_tabs(vec![tab(1, "https://a.com"), tab(2, "https://b.com")]);

        let group = host.create_group(&[TabId(1), TabId(2)]).await.unwrap();
        host.update_group(
            group,
            GroupUpdate {
                title: "Test (2)".to_string(),
                color: GroupColor::Red,
                collapsed: false,
            },
        )
        .await
        .unwrap();

        let groups = host.groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&group].title, "Test (2)");
        assert_eq!(groups[&group].color, GroupColor::Red);

        host.ungroup_all(WindowId(1)).await.unwrap();
        assert!(host.groups().is_empty());
    }

    #[tokio::test]
    async fn test_memory_host_stale_tab() {
        let host = MemoryHost::with_tabs(vec![tab(1, "https://a.com")]);
        host.close_tab(TabId(1));

        let err = host.create_group(&[TabId(1)]).await.unwrap_err();
        assert!(matches!(err, HostError::StaleTab(TabId(1))));
        assert!(host.groups().is_empty());
    }

    #[tokio::test]
    async fn test_memory_host_query_filters_by_window() {
        let other = Tab {
            id: TabId(9),
            url: Some("https://other.com".to_string()),
            window_id: WindowId(2),
        };
        let host = MemoryHost::with_tabs(vec![tab(1, "https://a.com"), other]);

        let tabs = host.query_tabs(WindowId(1)).await.unwrap();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].id, TabId(1));
    }

    #[tokio::test]
    async fn test_memory_host_update_unknown_group() {
        let host = MemoryHost::with_tabs(vec![]);

        let err = host
            .update_group(
                GroupId(42),
                GroupUpdate {
                    title: "x".to_string(),
                    color: GroupColor::Grey,
                    collapsed: false,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, HostError::GroupNotFound(GroupId(42))));
    }
}
