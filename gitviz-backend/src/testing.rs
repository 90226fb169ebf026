//! Spy and mock collaborators shared by the crate's tests

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use gitviz_protocol::{GitRepoState, RepoSet, ResponseMessage};
use gitviz_utils::{GitvizError, Result};

use crate::capabilities::{
    AvatarFetcher, CommitsOptions, CommitsResult, Document, FileWatcher, HostWindow, RepoDiscovery,
    RepoInfo, RepoInfoOptions, RepositoryBackend, StateStore, UiSurface,
};

/// Surface that records everything posted/rendered, optionally failing posts
#[derive(Default)]
pub struct RecordingSurface {
    posted: Mutex<Vec<ResponseMessage>>,
    rendered: Mutex<Vec<Document>>,
    fail_posts: AtomicBool,
}

impl RecordingSurface {
    pub fn posted(&self) -> Vec<ResponseMessage> {
        self.posted.lock().clone()
    }

    pub fn rendered(&self) -> Vec<Document> {
        self.rendered.lock().clone()
    }

    pub fn set_fail_posts(&self, fail: bool) {
        self.fail_posts.store(fail, Ordering::SeqCst);
    }
}

impl UiSurface for RecordingSurface {
    fn post(&self, message: ResponseMessage) -> Result<()> {
        if self.fail_posts.load(Ordering::SeqCst) {
            return Err(GitvizError::transport("surface disposed"));
        }
        self.posted.lock().push(message);
        Ok(())
    }

    fn render(&self, document: Document) -> Result<()> {
        self.rendered.lock().push(document);
        Ok(())
    }
}

/// Watcher that does nothing; the coordinator's own bookkeeping is under test
#[derive(Default)]
pub struct NullWatcher;

impl FileWatcher for NullWatcher {
    fn watch(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) {}
}

type CallHook = Box<dyn Fn(&str) + Send + Sync>;

/// Repository backend spy: records every call in order, fails scripted
/// calls, and can run a hook mid-call (e.g. to simulate a watcher event
/// firing during a handler await)
#[derive(Default)]
pub struct SpyBackend {
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, String>>,
    repo_info: Mutex<RepoInfo>,
    commits: Mutex<CommitsResult>,
    on_call: Mutex<Option<CallHook>>,
}

impl SpyBackend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Script the call matching `key` (as recorded) to fail with `message`
    pub fn fail(&self, key: &str, message: &str) {
        self.failures.lock().insert(key.into(), message.into());
    }

    pub fn set_repo_info(&self, info: RepoInfo) {
        *self.repo_info.lock() = info;
    }

    pub fn set_commits(&self, commits: CommitsResult) {
        *self.commits.lock() = commits;
    }

    pub fn set_on_call(&self, hook: CallHook) {
        *self.on_call.lock() = Some(hook);
    }

    fn invoke(&self, call: String) -> Result<()> {
        if let Some(hook) = self.on_call.lock().as_ref() {
            hook(&call);
        }
        self.calls.lock().push(call.clone());
        if let Some(message) = self.failures.lock().get(&call) {
            return Err(GitvizError::git(message.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl RepositoryBackend for SpyBackend {
    async fn repo_info(&self, _repo: &Path, _options: &RepoInfoOptions) -> Result<RepoInfo> {
        self.invoke("repo_info".into())?;
        Ok(self.repo_info.lock().clone())
    }

    async fn commits(&self, _repo: &Path, _options: &CommitsOptions) -> Result<CommitsResult> {
        self.invoke("commits".into())?;
        Ok(self.commits.lock().clone())
    }

    async fn create_branch(
        &self,
        _repo: &Path,
        branch_name: &str,
        _commit_hash: &str,
        _checkout: bool,
        _force: bool,
    ) -> Result<()> {
        self.invoke(format!("create_branch {}", branch_name))
    }

    async fn delete_branch(&self, _repo: &Path, branch_name: &str, _force: bool) -> Result<()> {
        self.invoke(format!("delete_branch {}", branch_name))
    }

    async fn delete_remote_branch(
        &self,
        _repo: &Path,
        _branch_name: &str,
        remote: &str,
    ) -> Result<()> {
        self.invoke(format!("delete_remote_branch {}", remote))
    }

    async fn checkout_branch(
        &self,
        _repo: &Path,
        branch_name: &str,
        _remote_branch: Option<&str>,
    ) -> Result<()> {
        self.invoke(format!("checkout_branch {}", branch_name))
    }

    async fn pull_branch(
        &self,
        _repo: &Path,
        branch_name: &str,
        _remote: &str,
        _create_new_commit: bool,
        _squash: bool,
    ) -> Result<()> {
        self.invoke(format!("pull_branch {}", branch_name))
    }

    async fn push_branch(
        &self,
        _repo: &Path,
        branch_name: &str,
        _remote: &str,
        _set_upstream: bool,
        _force: bool,
    ) -> Result<()> {
        self.invoke(format!("push_branch {}", branch_name))
    }

    async fn add_tag(
        &self,
        _repo: &Path,
        tag_name: &str,
        _commit_hash: &str,
        _lightweight: bool,
        _message: &str,
        _force: bool,
    ) -> Result<()> {
        self.invoke(format!("add_tag {}", tag_name))
    }

    async fn push_tag(&self, _repo: &Path, _tag_name: &str, remote: &str) -> Result<()> {
        self.invoke(format!("push_tag {}", remote))
    }

    async fn delete_tag(&self, _repo: &Path, tag_name: &str) -> Result<()> {
        self.invoke(format!("delete_tag {}", tag_name))
    }

    async fn delete_remote_tag(&self, _repo: &Path, _tag_name: &str, remote: &str) -> Result<()> {
        self.invoke(format!("delete_remote_tag {}", remote))
    }

    async fn merge(
        &self,
        _repo: &Path,
        obj: &str,
        _create_new_commit: bool,
        _squash: bool,
        _no_commit: bool,
    ) -> Result<()> {
        self.invoke(format!("merge {}", obj))
    }

    async fn rebase(&self, _repo: &Path, obj: &str, _ignore_date: bool) -> Result<()> {
        self.invoke(format!("rebase {}", obj))
    }

    async fn set_config_value(
        &self,
        _repo: &Path,
        key: &str,
        _value: &str,
        _global: bool,
    ) -> Result<()> {
        self.invoke(format!("set_config_value {}", key))
    }

    async fn unset_config_value(&self, _repo: &Path, key: &str, _global: bool) -> Result<()> {
        self.invoke(format!("unset_config_value {}", key))
    }
}

/// Discovery mock with a fixed repo set and a scripted freshness result
#[derive(Default)]
pub struct MockDiscovery {
    repos: Mutex<RepoSet>,
    check_finds_changes: AtomicBool,
    rescans: AtomicUsize,
}

impl MockDiscovery {
    pub fn with_repos(repos: &[&str]) -> Self {
        let discovery = Self::default();
        discovery.set_repos(repos);
        discovery
    }

    pub fn set_repos(&self, repos: &[&str]) {
        let mut set = RepoSet::new();
        for repo in repos {
            set.insert((*repo).into(), GitRepoState::default());
        }
        *self.repos.lock() = set;
    }

    pub fn set_check_finds_changes(&self, changes: bool) {
        self.check_finds_changes.store(changes, Ordering::SeqCst);
    }

    pub fn rescans(&self) -> usize {
        self.rescans.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepoDiscovery for MockDiscovery {
    fn repos(&self) -> RepoSet {
        self.repos.lock().clone()
    }

    async fn check_for_new_repos(&self) -> bool {
        self.check_finds_changes.load(Ordering::SeqCst)
    }

    fn rescan(&self) {
        self.rescans.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory state store
#[derive(Default)]
pub struct MemoryStateStore {
    last_active: Mutex<Option<String>>,
    repo_states: Mutex<HashMap<String, GitRepoState>>,
    ended_reviews: Mutex<Vec<(String, String)>>,
}

impl MemoryStateStore {
    pub fn repo_state(&self, repo: &str) -> Option<GitRepoState> {
        self.repo_states.lock().get(repo).cloned()
    }

    pub fn ended_reviews(&self) -> Vec<(String, String)> {
        self.ended_reviews.lock().clone()
    }
}

impl StateStore for MemoryStateStore {
    fn last_active_repo(&self) -> Option<String> {
        self.last_active.lock().clone()
    }

    fn set_last_active_repo(&self, repo: &str) {
        *self.last_active.lock() = Some(repo.into());
    }

    fn set_repo_state(&self, repo: &str, state: GitRepoState) {
        self.repo_states.lock().insert(repo.into(), state);
    }

    fn end_code_review(&self, repo: &str, id: &str) {
        self.ended_reviews.lock().push((repo.into(), id.into()));
    }
}

/// Avatar fetcher returning a scripted image (or nothing)
#[derive(Default)]
pub struct MockAvatars {
    image: Mutex<Option<String>>,
    fail: AtomicBool,
}

impl MockAvatars {
    pub fn set_image(&self, image: Option<&str>) {
        *self.image.lock() = image.map(String::from);
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AvatarFetcher for MockAvatars {
    async fn fetch(
        &self,
        _email: &str,
        _repo: &Path,
        _remote: Option<&str>,
        _commits: &[String],
    ) -> Result<Option<String>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(GitvizError::internal("avatar fetch failed"));
        }
        Ok(self.image.lock().clone())
    }
}

/// Host window mock counting reveal attempts
#[derive(Default)]
pub struct MockWindow {
    visible: AtomicBool,
    reveals: AtomicUsize,
    fallbacks: AtomicUsize,
    fail_reveal: AtomicBool,
    fail_fallback: AtomicBool,
}

impl MockWindow {
    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
    }

    pub fn set_fail_reveal(&self, fail: bool) {
        self.fail_reveal.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_fallback(&self, fail: bool) {
        self.fail_fallback.store(fail, Ordering::SeqCst);
    }

    pub fn reveals(&self) -> usize {
        self.reveals.load(Ordering::SeqCst)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::SeqCst)
    }
}

impl HostWindow for MockWindow {
    fn reveal(&self) -> Result<()> {
        self.reveals.fetch_add(1, Ordering::SeqCst);
        if self.fail_reveal.load(Ordering::SeqCst) {
            return Err(GitvizError::host("reveal failed"));
        }
        self.visible.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn reveal_fallback(&self) -> Result<()> {
        self.fallbacks.fetch_add(1, Ordering::SeqCst);
        if self.fail_fallback.load(Ordering::SeqCst) {
            return Err(GitvizError::host("fallback reveal failed"));
        }
        self.visible.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}
