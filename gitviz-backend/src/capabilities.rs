//! Capability seams for external collaborators
//!
//! The backend controller never talks to the repository tool, the host's
//! windowing APIs, persisted storage or the network directly; everything
//! outside the dispatch/lifecycle core sits behind one of these traits.

use std::path::Path;

use async_trait::async_trait;

use gitviz_protocol::{CommitInfo, GitRepoState, RepoSet, ResponseMessage};
use gitviz_utils::Result;

/// Static document served to the UI surface on a full render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    /// The working graph document
    Working,
    /// "Unable to load: no repositories" document
    NoRepositories,
    /// "Unable to load" document shown when the underlying version-control
    /// tool is unavailable, independent of repository count
    Unavailable,
}

/// Options for a `loadRepoInfo` query
#[derive(Debug, Clone, Default)]
pub struct RepoInfoOptions {
    pub show_remote_branches: bool,
    pub show_stashes: bool,
    pub hide_remotes: Vec<String>,
}

/// Options for a `loadCommits` query
#[derive(Debug, Clone, Default)]
pub struct CommitsOptions {
    pub branches: Option<Vec<String>>,
    pub authors: Option<Vec<String>>,
    pub max_commits: u32,
    pub show_tags: bool,
    pub only_follow_first_parent: bool,
}

/// Result of a `loadRepoInfo` query
#[derive(Debug, Clone, Default)]
pub struct RepoInfo {
    pub branches: Vec<String>,
    pub head: Option<String>,
    pub remotes: Vec<String>,
    pub stashes: Vec<String>,
}

/// Result of a `loadCommits` query
#[derive(Debug, Clone, Default)]
pub struct CommitsResult {
    pub commits: Vec<CommitInfo>,
    pub head: Option<String>,
    pub more_commits_available: bool,
}

/// Repository operations, implemented by invoking the external tool.
///
/// Every method is a suspension point; error `Display` text is surfaced to
/// the user verbatim as `ErrorInfo`.
#[async_trait]
pub trait RepositoryBackend: Send + Sync {
    async fn repo_info(&self, repo: &Path, options: &RepoInfoOptions) -> Result<RepoInfo>;

    async fn commits(&self, repo: &Path, options: &CommitsOptions) -> Result<CommitsResult>;

    async fn create_branch(
        &self,
        repo: &Path,
        branch_name: &str,
        commit_hash: &str,
        checkout: bool,
        force: bool,
    ) -> Result<()>;

    async fn delete_branch(&self, repo: &Path, branch_name: &str, force: bool) -> Result<()>;

    async fn delete_remote_branch(
        &self,
        repo: &Path,
        branch_name: &str,
        remote: &str,
    ) -> Result<()>;

    async fn checkout_branch(
        &self,
        repo: &Path,
        branch_name: &str,
        remote_branch: Option<&str>,
    ) -> Result<()>;

    async fn pull_branch(
        &self,
        repo: &Path,
        branch_name: &str,
        remote: &str,
        create_new_commit: bool,
        squash: bool,
    ) -> Result<()>;

    async fn push_branch(
        &self,
        repo: &Path,
        branch_name: &str,
        remote: &str,
        set_upstream: bool,
        force: bool,
    ) -> Result<()>;

    async fn add_tag(
        &self,
        repo: &Path,
        tag_name: &str,
        commit_hash: &str,
        lightweight: bool,
        message: &str,
        force: bool,
    ) -> Result<()>;

    async fn push_tag(&self, repo: &Path, tag_name: &str, remote: &str) -> Result<()>;

    async fn delete_tag(&self, repo: &Path, tag_name: &str) -> Result<()>;

    async fn delete_remote_tag(&self, repo: &Path, tag_name: &str, remote: &str) -> Result<()>;

    async fn merge(
        &self,
        repo: &Path,
        obj: &str,
        create_new_commit: bool,
        squash: bool,
        no_commit: bool,
    ) -> Result<()>;

    async fn rebase(&self, repo: &Path, obj: &str, ignore_date: bool) -> Result<()>;

    async fn set_config_value(
        &self,
        repo: &Path,
        key: &str,
        value: &str,
        global: bool,
    ) -> Result<()>;

    async fn unset_config_value(&self, repo: &Path, key: &str, global: bool) -> Result<()>;
}

/// Workspace repository discovery.
///
/// Change notifications (repository added/removed) are delivered externally
/// into the view lifecycle, not through this trait.
#[async_trait]
pub trait RepoDiscovery: Send + Sync {
    /// The currently-known repository set
    fn repos(&self) -> RepoSet;

    /// Check whether the set is stale; `true` means a change notification
    /// will follow and the caller should not respond directly.
    async fn check_for_new_repos(&self) -> bool;

    /// Trigger a full workspace rescan (results arrive as a change
    /// notification)
    fn rescan(&self);
}

/// Persisted extension state storage
pub trait StateStore: Send + Sync {
    fn last_active_repo(&self) -> Option<String>;

    fn set_last_active_repo(&self, repo: &str);

    fn set_repo_state(&self, repo: &str, state: GitRepoState);

    fn end_code_review(&self, repo: &str, id: &str);
}

/// Avatar image retrieval by author email
#[async_trait]
pub trait AvatarFetcher: Send + Sync {
    /// Returns a data-URI image string, or `None` when no avatar is known
    async fn fetch(
        &self,
        email: &str,
        repo: &Path,
        remote: Option<&str>,
        commits: &[String],
    ) -> Result<Option<String>>;
}

/// Per-repository filesystem watcher with its own debouncing.
///
/// Events are delivered through a channel installed at construction; this
/// trait only controls which path (if any) is being observed.
pub trait FileWatcher: Send {
    fn watch(&mut self, path: &Path) -> Result<()>;

    fn stop(&mut self);
}

/// The sandboxed UI surface
pub trait UiSurface: Send + Sync {
    /// Deliver one protocol message; fails if the surface is gone
    fn post(&self, message: ResponseMessage) -> Result<()>;

    /// Replace the surface's static content with a full document render
    fn render(&self, document: Document) -> Result<()>;
}

/// Host windowing for one view host variant
pub trait HostWindow: Send + Sync {
    /// Reveal/focus the surface the way this hosting style does it
    fn reveal(&self) -> Result<()>;

    /// Fallback reveal strategy, tried once when `reveal` fails
    fn reveal_fallback(&self) -> Result<()>;

    fn is_visible(&self) -> bool;
}
