//! Tag command handlers

use std::path::Path;

use gitviz_protocol::ResponseMessage;

use crate::dispatch::{CommandDispatcher, HandlerResult};

impl CommandDispatcher {
    /// Create the tag, then push it if a remote was chosen (gated on the
    /// creation succeeding)
    pub(super) async fn handle_add_tag(
        &self,
        repo: String,
        tag_name: String,
        commit_hash: String,
        lightweight: bool,
        message: String,
        push_to_remote: Option<String>,
        force: bool,
    ) -> HandlerResult {
        let path: &Path = repo.as_ref();
        let mut errors = vec![Self::error_info(
            self.backend
                .add_tag(path, &tag_name, &commit_hash, lightweight, &message, force)
                .await,
        )];
        if errors[0].is_none() {
            if let Some(remote) = &push_to_remote {
                errors.push(Self::error_info(
                    self.backend.push_tag(path, &tag_name, remote).await,
                ));
            }
        }
        HandlerResult::Response(ResponseMessage::AddTag {
            repo,
            tag_name,
            push_to_remote,
            errors,
        })
    }

    /// Delete the tag locally, then on the remote if one was chosen
    pub(super) async fn handle_delete_tag(
        &self,
        repo: String,
        tag_name: String,
        delete_on_remote: Option<String>,
    ) -> HandlerResult {
        let path: &Path = repo.as_ref();
        let mut errors = vec![Self::error_info(
            self.backend.delete_tag(path, &tag_name).await,
        )];
        if errors[0].is_none() {
            if let Some(remote) = &delete_on_remote {
                errors.push(Self::error_info(
                    self.backend.delete_remote_tag(path, &tag_name, remote).await,
                ));
            }
        }
        HandlerResult::Response(ResponseMessage::DeleteTag { errors })
    }
}
