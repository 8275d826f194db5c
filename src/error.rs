// ❌ Error Taxonomy - Fatal vs recoverable failures
//
// Fatal errors abort the whole run before any group is touched (or, for
// ResetFailed, before any group is created). Per-category create/update
// failures are NOT here: they live inside ReconcileReport as degraded
// success, so one bad category never sinks the rest.

use thiserror::Error;

use crate::host::HostError;

/// Fatal, run-aborting failures of the sort engine.
#[derive(Debug, Error)]
pub enum SortError {
    /// The target window has no open tabs; nothing to sort.
    #[error("no open tabs in the target window")]
    NoTabsAvailable,

    /// The caller selected zero categories.
    #[error("no categories selected")]
    NoCategoriesSelected,

    /// A selected category id is not in the registry.
    /// Surfaced before classification begins (fail fast).
    #[error("unknown category id: {0}")]
    UnknownCategory(String),

    /// The host could not produce the tab snapshot.
    #[error("failed to query tabs")]
    Query(#[source] HostError),

    /// The reset phase failed; the build phase never started.
    #[error("failed to reset existing groups")]
    ResetFailed(#[source] HostError),
}

pub type Result<T> = std::result::Result<T, SortError>;
