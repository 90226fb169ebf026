//! Shared data types carried by protocol messages

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Outcome of a single step within a command pipeline.
///
/// `None` means the step succeeded; `Some` carries the human-readable failure
/// message exactly as the underlying tool reported it.
pub type ErrorInfo = Option<String>;

/// Known repositories in the open workspace, keyed by repository path.
pub type RepoSet = HashMap<String, GitRepoState>;

/// Per-repository UI state persisted between sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GitRepoState {
    /// Display name override (defaults to the directory name)
    pub name: Option<String>,
    pub show_remote_branches: bool,
    pub show_stashes: bool,
    /// Remotes whose branches are hidden in the graph
    pub hide_remotes: Vec<String>,
}

/// Deferred navigation intent: which repository (and optionally which commit)
/// the view should focus on its next render/update cycle. Consumed exactly
/// once, then cleared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoadTarget {
    pub repo: String,
    pub commit_hash: Option<String>,
}

impl LoadTarget {
    pub fn repo(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            commit_hash: None,
        }
    }

    pub fn commit(repo: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            commit_hash: Some(commit_hash.into()),
        }
    }
}

/// A single commit in the graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommitInfo {
    pub hash: String,
    pub parents: Vec<String>,
    pub author: String,
    pub email: String,
    /// Unix timestamp (seconds)
    pub date: i64,
    pub message: String,
    /// Local branch heads pointing at this commit
    pub heads: Vec<String>,
    pub tags: Vec<String>,
    /// Remote branches pointing at this commit
    pub remotes: Vec<String>,
}
