//! Branch command handlers
//!
//! Multi-step commands gate their secondary steps on the primary step: a
//! failed primary short-circuits (one-entry error list), a successful one
//! runs every secondary step and appends each outcome positionally.

use std::path::Path;

use gitviz_protocol::ResponseMessage;

use crate::dispatch::{CommandDispatcher, HandlerResult};

impl CommandDispatcher {
    pub(super) async fn handle_create_branch(
        &self,
        repo: String,
        branch_name: String,
        commit_hash: String,
        checkout: bool,
        force: bool,
    ) -> HandlerResult {
        let errors = vec![Self::error_info(
            self.backend
                .create_branch(repo.as_ref(), &branch_name, &commit_hash, checkout, force)
                .await,
        )];
        HandlerResult::Response(ResponseMessage::CreateBranch { errors })
    }

    /// Delete locally, then on each selected remote. Remote deletions are
    /// independent of each other but all gated on the local one.
    pub(super) async fn handle_delete_branch(
        &self,
        repo: String,
        branch_name: String,
        force_delete: bool,
        delete_on_remotes: Vec<String>,
    ) -> HandlerResult {
        let path: &Path = repo.as_ref();
        let mut errors = vec![Self::error_info(
            self.backend
                .delete_branch(path, &branch_name, force_delete)
                .await,
        )];
        if errors[0].is_none() {
            for remote in &delete_on_remotes {
                errors.push(Self::error_info(
                    self.backend
                        .delete_remote_branch(path, &branch_name, remote)
                        .await,
                ));
            }
        }
        HandlerResult::Response(ResponseMessage::DeleteBranch {
            repo,
            branch_name,
            delete_on_remotes,
            errors,
        })
    }

    /// Checkout, then pull only when requested and the checkout succeeded
    pub(super) async fn handle_checkout_branch(
        &self,
        repo: String,
        branch_name: String,
        remote_branch: Option<String>,
        pull_afterwards: bool,
    ) -> HandlerResult {
        let path: &Path = repo.as_ref();
        let mut errors = vec![Self::error_info(
            self.backend
                .checkout_branch(path, &branch_name, remote_branch.as_deref())
                .await,
        )];
        if pull_afterwards && errors[0].is_none() {
            // The tracked remote is the prefix of the remote branch the
            // checkout was based on
            let remote = remote_branch
                .as_deref()
                .and_then(|r| r.split('/').next())
                .unwrap_or("origin");
            errors.push(Self::error_info(
                self.backend
                    .pull_branch(path, &branch_name, remote, false, false)
                    .await,
            ));
        }
        HandlerResult::Response(ResponseMessage::CheckoutBranch {
            pull_afterwards,
            errors,
        })
    }

    pub(super) async fn handle_pull_branch(
        &self,
        repo: String,
        branch_name: String,
        remote: String,
        create_new_commit: bool,
        squash: bool,
    ) -> HandlerResult {
        let errors = vec![Self::error_info(
            self.backend
                .pull_branch(repo.as_ref(), &branch_name, &remote, create_new_commit, squash)
                .await,
        )];
        HandlerResult::Response(ResponseMessage::PullBranch { errors })
    }

    pub(super) async fn handle_push_branch(
        &self,
        repo: String,
        branch_name: String,
        remote: String,
        set_upstream: bool,
        force: bool,
    ) -> HandlerResult {
        let errors = vec![Self::error_info(
            self.backend
                .push_branch(repo.as_ref(), &branch_name, &remote, set_upstream, force)
                .await,
        )];
        HandlerResult::Response(ResponseMessage::PushBranch { errors })
    }
}

#[cfg(test)]
mod tests {
    use gitviz_protocol::{RequestMessage, ResponseMessage};

    use crate::dispatch::test_support::TestBed;

    fn delete_branch(remotes: &[&str]) -> RequestMessage {
        RequestMessage::DeleteBranch {
            repo: "/work/app".into(),
            branch_name: "feature".into(),
            force_delete: false,
            delete_on_remotes: remotes.iter().map(|r| (*r).into()).collect(),
        }
    }

    fn errors_of(response: &ResponseMessage) -> &[Option<String>] {
        match response {
            ResponseMessage::CreateBranch { errors }
            | ResponseMessage::DeleteBranch { errors, .. }
            | ResponseMessage::CheckoutBranch { errors, .. }
            | ResponseMessage::PullBranch { errors }
            | ResponseMessage::PushBranch { errors } => errors,
            other => panic!("no error list in {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_branch_success_single_null() {
        let bed = TestBed::new();

        bed.dispatcher
            .dispatch(RequestMessage::CreateBranch {
                repo: "/work/app".into(),
                branch_name: "feature".into(),
                commit_hash: "abc123".into(),
                checkout: true,
                force: false,
            })
            .await;

        assert_eq!(errors_of(&bed.surface.posted()[0]), &[None]);
        assert_eq!(bed.backend.calls(), vec!["create_branch feature"]);
    }

    #[tokio::test]
    async fn test_delete_branch_fans_out_to_all_remotes() {
        let bed = TestBed::new();

        bed.dispatcher
            .dispatch(delete_branch(&["origin", "upstream"]))
            .await;

        assert_eq!(errors_of(&bed.surface.posted()[0]), &[None, None, None]);
        assert_eq!(
            bed.backend.calls(),
            vec![
                "delete_branch feature",
                "delete_remote_branch origin",
                "delete_remote_branch upstream",
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_branch_remote_failures_are_independent() {
        let bed = TestBed::new();
        bed.backend
            .fail("delete_remote_branch origin", "remote rejected");

        bed.dispatcher
            .dispatch(delete_branch(&["origin", "upstream"]))
            .await;

        // One failing remote does not stop the others; positions line up
        // with [local, origin, upstream]
        assert_eq!(
            errors_of(&bed.surface.posted()[0]),
            &[None, Some("remote rejected".into()), None]
        );
        assert_eq!(bed.backend.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_branch_local_failure_short_circuits() {
        let bed = TestBed::new();
        bed.backend
            .fail("delete_branch feature", "branch is checked out");

        bed.dispatcher
            .dispatch(delete_branch(&["origin", "upstream"]))
            .await;

        assert_eq!(
            errors_of(&bed.surface.posted()[0]),
            &[Some("branch is checked out".into())]
        );
        assert_eq!(bed.backend.calls(), vec!["delete_branch feature"]);
    }

    #[tokio::test]
    async fn test_checkout_branch_with_pull_runs_both() {
        let bed = TestBed::new();

        bed.dispatcher
            .dispatch(RequestMessage::CheckoutBranch {
                repo: "/work/app".into(),
                branch_name: "feature".into(),
                remote_branch: Some("upstream/feature".into()),
                pull_afterwards: true,
            })
            .await;

        assert_eq!(errors_of(&bed.surface.posted()[0]), &[None, None]);
        assert_eq!(
            bed.backend.calls(),
            vec!["checkout_branch feature", "pull_branch feature"]
        );
    }

    #[tokio::test]
    async fn test_checkout_failure_skips_pull() {
        let bed = TestBed::new();
        bed.backend
            .fail("checkout_branch feature", "local changes would be overwritten");

        bed.dispatcher
            .dispatch(RequestMessage::CheckoutBranch {
                repo: "/work/app".into(),
                branch_name: "feature".into(),
                remote_branch: Some("origin/feature".into()),
                pull_afterwards: true,
            })
            .await;

        assert_eq!(
            errors_of(&bed.surface.posted()[0]),
            &[Some("local changes would be overwritten".into())]
        );
        assert_eq!(bed.backend.calls(), vec!["checkout_branch feature"]);
    }

    #[tokio::test]
    async fn test_checkout_without_pull_is_single_step() {
        let bed = TestBed::new();

        bed.dispatcher
            .dispatch(RequestMessage::CheckoutBranch {
                repo: "/work/app".into(),
                branch_name: "main".into(),
                remote_branch: None,
                pull_afterwards: false,
            })
            .await;

        assert_eq!(errors_of(&bed.surface.posted()[0]), &[None]);
        assert_eq!(bed.backend.calls(), vec!["checkout_branch main"]);
    }

    #[tokio::test]
    async fn test_push_branch_failure_reported_positionally() {
        let bed = TestBed::new();
        bed.backend.fail("push_branch feature", "no upstream configured");

        bed.dispatcher
            .dispatch(RequestMessage::PushBranch {
                repo: "/work/app".into(),
                branch_name: "feature".into(),
                remote: "origin".into(),
                set_upstream: false,
                force: false,
            })
            .await;

        assert_eq!(
            errors_of(&bed.surface.posted()[0]),
            &[Some("no upstream configured".into())]
        );
    }
}
