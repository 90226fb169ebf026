//! Command dispatch for inbound protocol messages
//!
//! Routes every `RequestMessage` to its handler through an exhaustive match,
//! brackets each dispatch in a watcher mute window, and posts at most one
//! response back through the UI surface. Handlers absorb all backend
//! failures into `ErrorInfo` values; nothing faults across this boundary.

mod actions;
mod branches;
mod queries;
mod tags;

use std::sync::Arc;

use tracing::{debug, warn};

use gitviz_protocol::{ErrorInfo, RequestMessage, ResponseMessage};
use gitviz_utils::Result;

use crate::capabilities::{
    AvatarFetcher, RepoDiscovery, RepositoryBackend, StateStore, UiSurface,
};
use crate::lifecycle::ViewLifecycle;
use crate::refresh::RefreshCorrelator;
use crate::watcher::FileWatchCoordinator;

/// Result of handling a message
pub enum HandlerResult {
    /// Single response to post back to the UI surface
    Response(ResponseMessage),
    /// No response (fire-and-forget requests, or deferred to the
    /// external-event path)
    NoResponse,
}

/// Receives inbound protocol messages and serves them against the backend
/// capabilities
pub struct CommandDispatcher {
    pub(crate) backend: Arc<dyn RepositoryBackend>,
    pub(crate) discovery: Arc<dyn RepoDiscovery>,
    pub(crate) state_store: Arc<dyn StateStore>,
    pub(crate) avatars: Arc<dyn AvatarFetcher>,
    pub(crate) surface: Arc<dyn UiSurface>,
    pub(crate) watcher: Arc<FileWatchCoordinator>,
    pub(crate) correlator: Arc<RefreshCorrelator>,
    pub(crate) lifecycle: Arc<ViewLifecycle>,
}

impl CommandDispatcher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        backend: Arc<dyn RepositoryBackend>,
        discovery: Arc<dyn RepoDiscovery>,
        state_store: Arc<dyn StateStore>,
        avatars: Arc<dyn AvatarFetcher>,
        surface: Arc<dyn UiSurface>,
        watcher: Arc<FileWatchCoordinator>,
        correlator: Arc<RefreshCorrelator>,
        lifecycle: Arc<ViewLifecycle>,
    ) -> Self {
        Self {
            backend,
            discovery,
            state_store,
            avatars,
            surface,
            watcher,
            correlator,
            lifecycle,
        }
    }

    /// Handle one inbound request, posting zero or one response.
    ///
    /// The watcher is muted for the whole dispatch so the command's own
    /// filesystem side effects do not fan back as refresh pushes; the mute
    /// window is released on every exit path.
    pub async fn dispatch(&self, request: RequestMessage) {
        debug!("Dispatching {}", request.type_name());
        let _mute = self.watcher.mute_scope();
        match self.route(request).await {
            HandlerResult::Response(response) => self.post(response),
            HandlerResult::NoResponse => {}
        }
    }

    /// Route a request to the appropriate handler
    async fn route(&self, request: RequestMessage) -> HandlerResult {
        match request {
            // Read queries
            RequestMessage::LoadRepoInfo {
                repo,
                refresh_id,
                show_remote_branches,
                show_stashes,
                hide_remotes,
            } => {
                self.handle_load_repo_info(
                    repo,
                    refresh_id,
                    show_remote_branches,
                    show_stashes,
                    hide_remotes,
                )
                .await
            }

            RequestMessage::LoadCommits {
                repo,
                refresh_id,
                branches,
                authors,
                max_commits,
                show_tags,
                only_follow_first_parent,
            } => {
                self.handle_load_commits(
                    repo,
                    refresh_id,
                    branches,
                    authors,
                    max_commits,
                    show_tags,
                    only_follow_first_parent,
                )
                .await
            }

            RequestMessage::LoadRepos { check } => self.handle_load_repos(check).await,

            RequestMessage::RescanForRepos => self.handle_rescan_for_repos(),

            // Branch commands
            RequestMessage::CreateBranch {
                repo,
                branch_name,
                commit_hash,
                checkout,
                force,
            } => {
                self.handle_create_branch(repo, branch_name, commit_hash, checkout, force)
                    .await
            }

            RequestMessage::DeleteBranch {
                repo,
                branch_name,
                force_delete,
                delete_on_remotes,
            } => {
                self.handle_delete_branch(repo, branch_name, force_delete, delete_on_remotes)
                    .await
            }

            RequestMessage::CheckoutBranch {
                repo,
                branch_name,
                remote_branch,
                pull_afterwards,
            } => {
                self.handle_checkout_branch(repo, branch_name, remote_branch, pull_afterwards)
                    .await
            }

            RequestMessage::PullBranch {
                repo,
                branch_name,
                remote,
                create_new_commit,
                squash,
            } => {
                self.handle_pull_branch(repo, branch_name, remote, create_new_commit, squash)
                    .await
            }

            RequestMessage::PushBranch {
                repo,
                branch_name,
                remote,
                set_upstream,
                force,
            } => {
                self.handle_push_branch(repo, branch_name, remote, set_upstream, force)
                    .await
            }

            // Tag commands
            RequestMessage::AddTag {
                repo,
                tag_name,
                commit_hash,
                lightweight,
                message,
                push_to_remote,
                force,
            } => {
                self.handle_add_tag(
                    repo,
                    tag_name,
                    commit_hash,
                    lightweight,
                    message,
                    push_to_remote,
                    force,
                )
                .await
            }

            RequestMessage::DeleteTag {
                repo,
                tag_name,
                delete_on_remote,
            } => self.handle_delete_tag(repo, tag_name, delete_on_remote).await,

            // Other actions
            RequestMessage::Merge {
                repo,
                obj,
                create_new_commit,
                squash,
                no_commit,
            } => {
                self.handle_merge(repo, obj, create_new_commit, squash, no_commit)
                    .await
            }

            RequestMessage::Rebase {
                repo,
                obj,
                ignore_date,
            } => self.handle_rebase(repo, obj, ignore_date).await,

            RequestMessage::EditUserDetails {
                repo,
                name,
                email,
                use_global_config,
                delete_local_name,
                delete_local_email,
            } => {
                self.handle_edit_user_details(
                    repo,
                    name,
                    email,
                    use_global_config,
                    delete_local_name,
                    delete_local_email,
                )
                .await
            }

            RequestMessage::FetchAvatar {
                repo,
                remote,
                email,
                commits,
            } => self.handle_fetch_avatar(repo, remote, email, commits).await,

            RequestMessage::EndCodeReview { repo, id } => self.handle_end_code_review(repo, id),

            RequestMessage::SetRepoState { repo, state } => {
                self.handle_set_repo_state(repo, state)
            }
        }
    }

    /// Post a response, tolerating a disposed/unreachable surface
    fn post(&self, response: ResponseMessage) {
        let command = response.type_name();
        if let Err(e) = self.surface.post(response) {
            warn!("Dropped {} response: {}", command, e);
        }
    }

    /// Absorb a step outcome into its positional error-list entry
    pub(crate) fn error_info<T>(result: Result<T>) -> ErrorInfo {
        result.err().map(|e| e.to_string())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::testing::{
        MemoryStateStore, MockAvatars, MockDiscovery, NullWatcher, RecordingSurface, SpyBackend,
    };

    pub(crate) struct TestBed {
        pub dispatcher: CommandDispatcher,
        pub backend: Arc<SpyBackend>,
        pub surface: Arc<RecordingSurface>,
        pub discovery: Arc<MockDiscovery>,
        pub state_store: Arc<MemoryStateStore>,
        pub avatars: Arc<MockAvatars>,
        pub watcher: Arc<FileWatchCoordinator>,
        pub lifecycle: Arc<ViewLifecycle>,
        pub correlator: Arc<RefreshCorrelator>,
    }

    impl TestBed {
        pub fn new() -> Self {
            let backend = Arc::new(SpyBackend::default());
            let surface = Arc::new(RecordingSurface::default());
            let discovery = Arc::new(MockDiscovery::with_repos(&["/work/app"]));
            let state_store = Arc::new(MemoryStateStore::default());
            let avatars = Arc::new(MockAvatars::default());
            let watcher = Arc::new(FileWatchCoordinator::new(
                Box::new(NullWatcher::default()),
                Arc::clone(&surface) as Arc<dyn UiSurface>,
            ));
            let correlator = Arc::new(RefreshCorrelator::new());
            let lifecycle = Arc::new(ViewLifecycle::new(
                Arc::clone(&surface) as Arc<dyn UiSurface>,
                Arc::clone(&watcher),
                Arc::clone(&discovery) as Arc<dyn RepoDiscovery>,
                Arc::clone(&state_store) as Arc<dyn StateStore>,
                true,
            ));
            let dispatcher = CommandDispatcher::new(
                Arc::clone(&backend) as Arc<dyn RepositoryBackend>,
                Arc::clone(&discovery) as Arc<dyn RepoDiscovery>,
                Arc::clone(&state_store) as Arc<dyn StateStore>,
                Arc::clone(&avatars) as Arc<dyn AvatarFetcher>,
                Arc::clone(&surface) as Arc<dyn UiSurface>,
                Arc::clone(&watcher),
                Arc::clone(&correlator),
                Arc::clone(&lifecycle),
            );
            Self {
                dispatcher,
                backend,
                surface,
                discovery,
                state_store,
                avatars,
                watcher,
                lifecycle,
                correlator,
            }
        }
    }
}
