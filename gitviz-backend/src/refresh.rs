//! Refresh correlation for the two long-running read queries
//!
//! The UI surface stamps every `loadRepoInfo` and `loadCommits` request with
//! an opaque RefreshId it chose, and the backend echoes it verbatim in the
//! response. Because concurrent requests complete in any order, the UI
//! discards a response whose id no longer matches the last one it sent. The
//! backend's only bookkeeping is remembering the latest id per query kind so
//! an externally-triggered re-announcement can reuse it; nothing is cancelled
//! or superseded here.

use parking_lot::Mutex;

/// The two independently-reissued query streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    RepoInfo,
    Commits,
}

#[derive(Debug, Default)]
struct Latest {
    repo_info: Option<u64>,
    commits: Option<u64>,
}

/// Tracks the most recent correlation token issued per query kind
#[derive(Debug, Default)]
pub struct RefreshCorrelator {
    latest: Mutex<Latest>,
}

impl RefreshCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest id seen for a query kind, overwriting (not queuing)
    /// any previous one
    pub fn record(&self, kind: QueryKind, id: u64) {
        let mut latest = self.latest.lock();
        match kind {
            QueryKind::RepoInfo => latest.repo_info = Some(id),
            QueryKind::Commits => latest.commits = Some(id),
        }
    }

    /// The last recorded id for a query kind, if any query of that kind has
    /// been seen
    pub fn last(&self, kind: QueryKind) -> Option<u64> {
        let latest = self.latest.lock();
        match kind {
            QueryKind::RepoInfo => latest.repo_info,
            QueryKind::Commits => latest.commits,
        }
    }
}
