//! UI surface <-> backend controller message types
//!
//! Every message is a flat, JSON-serializable record with a `command` string
//! discriminant. Request variants originate from the UI surface; response
//! variants originate from the backend and carry the same command name as the
//! request that caused them, plus any pass-through fields the UI needs to
//! re-associate the reply.

use serde::{Deserialize, Serialize};

use crate::types::{CommitInfo, ErrorInfo, GitRepoState, LoadTarget, RepoSet};

/// Messages sent from the UI surface to the backend controller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum RequestMessage {
    /// Load branches, remotes and stashes for one repository.
    ///
    /// Side effect: may switch the watched repository and persist the last
    /// active repository.
    #[serde(rename_all = "camelCase")]
    LoadRepoInfo {
        repo: String,
        refresh_id: u64,
        show_remote_branches: bool,
        show_stashes: bool,
        hide_remotes: Vec<String>,
    },

    /// Load the commit list for one repository.
    ///
    /// Carries its own RefreshId stream, independent of `loadRepoInfo`,
    /// because filter changes reissue commits without reissuing repo info.
    #[serde(rename_all = "camelCase")]
    LoadCommits {
        repo: String,
        refresh_id: u64,
        branches: Option<Vec<String>>,
        authors: Option<Vec<String>>,
        max_commits: u32,
        show_tags: bool,
        only_follow_first_parent: bool,
    },

    /// Request the known repository set, optionally after a freshness check
    LoadRepos { check: bool },

    /// Ask the discovery collaborator to rescan the workspace (no reply; the
    /// resulting change notification drives any update)
    RescanForRepos,

    #[serde(rename_all = "camelCase")]
    CreateBranch {
        repo: String,
        branch_name: String,
        commit_hash: String,
        checkout: bool,
        force: bool,
    },

    /// Delete a branch locally, then on every selected remote (each attempted
    /// independently once the local deletion succeeded)
    #[serde(rename_all = "camelCase")]
    DeleteBranch {
        repo: String,
        branch_name: String,
        force_delete: bool,
        delete_on_remotes: Vec<String>,
    },

    /// Checkout a branch, then optionally pull it (only if checkout succeeded)
    #[serde(rename_all = "camelCase")]
    CheckoutBranch {
        repo: String,
        branch_name: String,
        remote_branch: Option<String>,
        /// Optional on the wire; absent means checkout only
        #[serde(default)]
        pull_afterwards: bool,
    },

    #[serde(rename_all = "camelCase")]
    PullBranch {
        repo: String,
        branch_name: String,
        remote: String,
        create_new_commit: bool,
        squash: bool,
    },

    #[serde(rename_all = "camelCase")]
    PushBranch {
        repo: String,
        branch_name: String,
        remote: String,
        set_upstream: bool,
        force: bool,
    },

    /// Create (or force-update) a tag, then push it to a remote if one was
    /// chosen
    #[serde(rename_all = "camelCase")]
    AddTag {
        repo: String,
        tag_name: String,
        commit_hash: String,
        lightweight: bool,
        message: String,
        push_to_remote: Option<String>,
        force: bool,
    },

    /// Delete a tag locally, then on a remote if one was chosen
    #[serde(rename_all = "camelCase")]
    DeleteTag {
        repo: String,
        tag_name: String,
        delete_on_remote: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    Merge {
        repo: String,
        obj: String,
        create_new_commit: bool,
        squash: bool,
        no_commit: bool,
    },

    #[serde(rename_all = "camelCase")]
    Rebase {
        repo: String,
        obj: String,
        ignore_date: bool,
    },

    /// Set user.name and user.email, then optionally unset the local values
    /// once both sets succeeded
    #[serde(rename_all = "camelCase")]
    EditUserDetails {
        repo: String,
        name: String,
        email: String,
        use_global_config: bool,
        delete_local_name: bool,
        delete_local_email: bool,
    },

    /// Fire-and-forget: delivery is a pushed `fetchAvatar` event, not a reply
    #[serde(rename_all = "camelCase")]
    FetchAvatar {
        repo: String,
        remote: Option<String>,
        email: String,
        commits: Vec<String>,
    },

    /// Fire-and-forget: close out a code review in persisted state
    #[serde(rename_all = "camelCase")]
    EndCodeReview { repo: String, id: String },

    /// Fire-and-forget: persist per-repository UI state
    #[serde(rename_all = "camelCase")]
    SetRepoState { repo: String, state: GitRepoState },
}

impl RequestMessage {
    /// Return the message type name for routing logs
    pub fn type_name(&self) -> &'static str {
        match self {
            RequestMessage::LoadRepoInfo { .. } => "loadRepoInfo",
            RequestMessage::LoadCommits { .. } => "loadCommits",
            RequestMessage::LoadRepos { .. } => "loadRepos",
            RequestMessage::RescanForRepos => "rescanForRepos",
            RequestMessage::CreateBranch { .. } => "createBranch",
            RequestMessage::DeleteBranch { .. } => "deleteBranch",
            RequestMessage::CheckoutBranch { .. } => "checkoutBranch",
            RequestMessage::PullBranch { .. } => "pullBranch",
            RequestMessage::PushBranch { .. } => "pushBranch",
            RequestMessage::AddTag { .. } => "addTag",
            RequestMessage::DeleteTag { .. } => "deleteTag",
            RequestMessage::Merge { .. } => "merge",
            RequestMessage::Rebase { .. } => "rebase",
            RequestMessage::EditUserDetails { .. } => "editUserDetails",
            RequestMessage::FetchAvatar { .. } => "fetchAvatar",
            RequestMessage::EndCodeReview { .. } => "endCodeReview",
            RequestMessage::SetRepoState { .. } => "setRepoState",
        }
    }

    /// Requests that produce no paired response message.
    ///
    /// `fetchAvatar` delivery is a pushed event; the other three produce
    /// nothing at all.
    pub fn is_fire_and_forget(&self) -> bool {
        matches!(
            self,
            RequestMessage::FetchAvatar { .. }
                | RequestMessage::RescanForRepos
                | RequestMessage::EndCodeReview { .. }
                | RequestMessage::SetRepoState { .. }
        )
    }
}

/// Messages sent from the backend controller to the UI surface
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum ResponseMessage {
    #[serde(rename_all = "camelCase")]
    LoadRepoInfo {
        refresh_id: u64,
        is_repo: bool,
        error: ErrorInfo,
        branches: Vec<String>,
        head: Option<String>,
        remotes: Vec<String>,
        stashes: Vec<String>,
    },

    #[serde(rename_all = "camelCase")]
    LoadCommits {
        refresh_id: u64,
        commits: Vec<CommitInfo>,
        head: Option<String>,
        more_commits_available: bool,
        only_follow_first_parent: bool,
        error: ErrorInfo,
    },

    /// Response to `loadRepos`, and also pushed unprompted when the
    /// repository set changes while the view is visible
    #[serde(rename_all = "camelCase")]
    LoadRepos {
        repos: RepoSet,
        last_active_repo: Option<String>,
        load_view_to: Option<LoadTarget>,
    },

    CreateBranch {
        errors: Vec<ErrorInfo>,
    },

    #[serde(rename_all = "camelCase")]
    DeleteBranch {
        repo: String,
        branch_name: String,
        delete_on_remotes: Vec<String>,
        errors: Vec<ErrorInfo>,
    },

    #[serde(rename_all = "camelCase")]
    CheckoutBranch {
        pull_afterwards: bool,
        errors: Vec<ErrorInfo>,
    },

    PullBranch {
        errors: Vec<ErrorInfo>,
    },

    PushBranch {
        errors: Vec<ErrorInfo>,
    },

    #[serde(rename_all = "camelCase")]
    AddTag {
        repo: String,
        tag_name: String,
        push_to_remote: Option<String>,
        errors: Vec<ErrorInfo>,
    },

    DeleteTag {
        errors: Vec<ErrorInfo>,
    },

    Merge {
        errors: Vec<ErrorInfo>,
    },

    Rebase {
        errors: Vec<ErrorInfo>,
    },

    EditUserDetails {
        errors: Vec<ErrorInfo>,
    },

    /// Pushed event carrying a fetched avatar (never a direct reply)
    FetchAvatar {
        email: String,
        image: String,
    },

    /// Pushed when the watched repository changed on disk outside of a
    /// command's own side effects
    Refresh {
        repo: String,
    },
}

impl ResponseMessage {
    /// Return the message type name for routing logs
    pub fn type_name(&self) -> &'static str {
        match self {
            ResponseMessage::LoadRepoInfo { .. } => "loadRepoInfo",
            ResponseMessage::LoadCommits { .. } => "loadCommits",
            ResponseMessage::LoadRepos { .. } => "loadRepos",
            ResponseMessage::CreateBranch { .. } => "createBranch",
            ResponseMessage::DeleteBranch { .. } => "deleteBranch",
            ResponseMessage::CheckoutBranch { .. } => "checkoutBranch",
            ResponseMessage::PullBranch { .. } => "pullBranch",
            ResponseMessage::PushBranch { .. } => "pushBranch",
            ResponseMessage::AddTag { .. } => "addTag",
            ResponseMessage::DeleteTag { .. } => "deleteTag",
            ResponseMessage::Merge { .. } => "merge",
            ResponseMessage::Rebase { .. } => "rebase",
            ResponseMessage::EditUserDetails { .. } => "editUserDetails",
            ResponseMessage::FetchAvatar { .. } => "fetchAvatar",
            ResponseMessage::Refresh { .. } => "refresh",
        }
    }
}
