//! Merge/rebase, user details, avatars, and the fire-and-forget state
//! commands

use std::path::{Path, PathBuf};

use tracing::debug;

use gitviz_protocol::{GitRepoState, ResponseMessage};

use crate::dispatch::{CommandDispatcher, HandlerResult};

impl CommandDispatcher {
    pub(super) async fn handle_merge(
        &self,
        repo: String,
        obj: String,
        create_new_commit: bool,
        squash: bool,
        no_commit: bool,
    ) -> HandlerResult {
        let errors = vec![Self::error_info(
            self.backend
                .merge(repo.as_ref(), &obj, create_new_commit, squash, no_commit)
                .await,
        )];
        HandlerResult::Response(ResponseMessage::Merge { errors })
    }

    pub(super) async fn handle_rebase(
        &self,
        repo: String,
        obj: String,
        ignore_date: bool,
    ) -> HandlerResult {
        let errors = vec![Self::error_info(
            self.backend.rebase(repo.as_ref(), &obj, ignore_date).await,
        )];
        HandlerResult::Response(ResponseMessage::Rebase { errors })
    }

    /// Set user.name, then user.email (gated on the name), then optionally
    /// unset the local overrides once both sets succeeded
    pub(super) async fn handle_edit_user_details(
        &self,
        repo: String,
        name: String,
        email: String,
        use_global_config: bool,
        delete_local_name: bool,
        delete_local_email: bool,
    ) -> HandlerResult {
        let path: &Path = repo.as_ref();
        let mut errors = vec![Self::error_info(
            self.backend
                .set_config_value(path, "user.name", &name, use_global_config)
                .await,
        )];
        if errors[0].is_none() {
            errors.push(Self::error_info(
                self.backend
                    .set_config_value(path, "user.email", &email, use_global_config)
                    .await,
            ));
            if errors[1].is_none() && use_global_config {
                if delete_local_name {
                    errors.push(Self::error_info(
                        self.backend.unset_config_value(path, "user.name", false).await,
                    ));
                }
                if delete_local_email {
                    errors.push(Self::error_info(
                        self.backend
                            .unset_config_value(path, "user.email", false)
                            .await,
                    ));
                }
            }
        }
        HandlerResult::Response(ResponseMessage::EditUserDetails { errors })
    }

    /// Avatar delivery is a pushed event: no image, no message
    pub(super) async fn handle_fetch_avatar(
        &self,
        repo: String,
        remote: Option<String>,
        email: String,
        commits: Vec<String>,
    ) -> HandlerResult {
        let path = PathBuf::from(&repo);
        match self
            .avatars
            .fetch(&email, &path, remote.as_deref(), &commits)
            .await
        {
            Ok(Some(image)) => {
                HandlerResult::Response(ResponseMessage::FetchAvatar { email, image })
            }
            Ok(None) => HandlerResult::NoResponse,
            Err(e) => {
                debug!("Avatar fetch failed for {}: {}", email, e);
                HandlerResult::NoResponse
            }
        }
    }

    pub(super) fn handle_end_code_review(&self, repo: String, id: String) -> HandlerResult {
        self.state_store.end_code_review(&repo, &id);
        HandlerResult::NoResponse
    }

    pub(super) fn handle_set_repo_state(
        &self,
        repo: String,
        state: GitRepoState,
    ) -> HandlerResult {
        self.state_store.set_repo_state(&repo, state);
        HandlerResult::NoResponse
    }
}
