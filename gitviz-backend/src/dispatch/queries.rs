//! Read-query handlers: repository info, commits, and the repository set

use std::path::PathBuf;

use tracing::warn;

use gitviz_protocol::ResponseMessage;

use crate::capabilities::{CommitsOptions, RepoInfoOptions};
use crate::dispatch::{CommandDispatcher, HandlerResult};
use crate::refresh::QueryKind;

impl CommandDispatcher {
    /// `loadRepoInfo`: the query that also moves the focused repository.
    ///
    /// When the queried repository differs from the current one the watcher
    /// is switched and the last active repository persisted before the
    /// (slower) backend query runs, so external edits arriving mid-query are
    /// already observed.
    pub(super) async fn handle_load_repo_info(
        &self,
        repo: String,
        refresh_id: u64,
        show_remote_branches: bool,
        show_stashes: bool,
        hide_remotes: Vec<String>,
    ) -> HandlerResult {
        self.correlator.record(QueryKind::RepoInfo, refresh_id);

        let path = PathBuf::from(&repo);
        if self.lifecycle.current_repo().as_deref() != Some(path.as_path()) {
            self.lifecycle.set_current_repo(Some(path.clone()));
            self.state_store.set_last_active_repo(&repo);
            if let Err(e) = self.watcher.start(&path) {
                warn!("Failed to watch {}: {}", repo, e);
            }
        }

        let options = RepoInfoOptions {
            show_remote_branches,
            show_stashes,
            hide_remotes,
        };
        let response = match self.backend.repo_info(&path, &options).await {
            Ok(info) => ResponseMessage::LoadRepoInfo {
                refresh_id,
                is_repo: true,
                error: None,
                branches: info.branches,
                head: info.head,
                remotes: info.remotes,
                stashes: info.stashes,
            },
            // A repository deleted out from under the view is an expected
            // outcome, reported structurally rather than as an error
            Err(_) if !path.exists() => ResponseMessage::LoadRepoInfo {
                refresh_id,
                is_repo: false,
                error: None,
                branches: Vec::new(),
                head: None,
                remotes: Vec::new(),
                stashes: Vec::new(),
            },
            Err(e) => ResponseMessage::LoadRepoInfo {
                refresh_id,
                is_repo: true,
                error: Some(e.to_string()),
                branches: Vec::new(),
                head: None,
                remotes: Vec::new(),
                stashes: Vec::new(),
            },
        };
        HandlerResult::Response(response)
    }

    pub(super) async fn handle_load_commits(
        &self,
        repo: String,
        refresh_id: u64,
        branches: Option<Vec<String>>,
        authors: Option<Vec<String>>,
        max_commits: u32,
        show_tags: bool,
        only_follow_first_parent: bool,
    ) -> HandlerResult {
        self.correlator.record(QueryKind::Commits, refresh_id);

        let options = CommitsOptions {
            branches,
            authors,
            max_commits,
            show_tags,
            only_follow_first_parent,
        };
        let response = match self.backend.commits(repo.as_ref(), &options).await {
            Ok(result) => ResponseMessage::LoadCommits {
                refresh_id,
                commits: result.commits,
                head: result.head,
                more_commits_available: result.more_commits_available,
                only_follow_first_parent,
                error: None,
            },
            Err(e) => ResponseMessage::LoadCommits {
                refresh_id,
                commits: Vec::new(),
                head: None,
                more_commits_available: false,
                only_follow_first_parent,
                error: Some(e.to_string()),
            },
        };
        HandlerResult::Response(response)
    }

    /// `loadRepos`: answer from the known set, unless a requested freshness
    /// check finds the set stale, in which case the change notification path
    /// delivers the update instead
    pub(super) async fn handle_load_repos(&self, check: bool) -> HandlerResult {
        if check && self.discovery.check_for_new_repos().await {
            return HandlerResult::NoResponse;
        }
        HandlerResult::Response(ResponseMessage::LoadRepos {
            repos: self.discovery.repos(),
            last_active_repo: self.state_store.last_active_repo(),
            load_view_to: self.lifecycle.take_pending_target(),
        })
    }

    pub(super) fn handle_rescan_for_repos(&self) -> HandlerResult {
        self.discovery.rescan();
        HandlerResult::NoResponse
    }
}
