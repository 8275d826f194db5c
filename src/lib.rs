// Tab Sorter - Core Library
// Classification-and-reconciliation engine for browser tab grouping
//
// Partitions a window's tabs into user-selected categories by URL
// substring rules, resets and rebuilds the host's visual tab groups to
// match, and reports per-category counts. Presentation (buttons, DOM,
// status text) lives outside and talks to this crate only through
// TabSortEngine::run and the TabHost trait.

pub mod categories;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod host;
pub mod reconciler;
pub mod summary;

// Re-export commonly used types
pub use categories::{default_categories, Category, CategoryRegistry, GroupColor};
pub use classifier::{Bucket, Classifier, Partition};
pub use engine::{SortOutcome, TabSortEngine};
pub use error::SortError;
pub use host::{
    GroupId, GroupState, GroupUpdate, HostError, MemoryHost, Tab, TabHost, TabId, WindowId,
};
pub use reconciler::{
    CategoryOutcome, GroupReconciler, GroupResult, GroupStage, ReconcileReport,
};
pub use summary::{summarize, SummaryRow};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
