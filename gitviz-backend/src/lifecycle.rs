//! View lifecycle state machine
//!
//! Tracks whether the UI surface exists, is on-screen, or has been disposed,
//! and decides when the static document is (re)rendered, when the repository
//! watcher runs, and what pending navigation target is remembered across
//! hidden periods.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use gitviz_protocol::{LoadTarget, RepoSet, ResponseMessage};

use crate::capabilities::{Document, RepoDiscovery, StateStore, UiSurface};
use crate::watcher::FileWatchCoordinator;

/// Lifecycle states; `Disposed` is terminal and reachable from any state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Visible,
    Hidden,
    Disposed,
}

#[derive(Debug)]
struct Inner {
    state: LifecycleState,
    current_repo: Option<PathBuf>,
    pending_target: Option<LoadTarget>,
    known_repos: RepoSet,
}

pub struct ViewLifecycle {
    surface: Arc<dyn UiSurface>,
    watcher: Arc<FileWatchCoordinator>,
    discovery: Arc<dyn RepoDiscovery>,
    state_store: Arc<dyn StateStore>,
    tool_available: AtomicBool,
    inner: Mutex<Inner>,
}

impl ViewLifecycle {
    pub fn new(
        surface: Arc<dyn UiSurface>,
        watcher: Arc<FileWatchCoordinator>,
        discovery: Arc<dyn RepoDiscovery>,
        state_store: Arc<dyn StateStore>,
        tool_available: bool,
    ) -> Self {
        Self {
            surface,
            watcher,
            discovery,
            state_store,
            tool_available: AtomicBool::new(tool_available),
            inner: Mutex::new(Inner {
                state: LifecycleState::Uninitialized,
                current_repo: None,
                pending_target: None,
                known_repos: RepoSet::new(),
            }),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.inner.lock().state
    }

    pub fn is_visible(&self) -> bool {
        self.state() == LifecycleState::Visible
    }

    pub fn current_repo(&self) -> Option<PathBuf> {
        self.inner.lock().current_repo.clone()
    }

    pub fn set_current_repo(&self, repo: Option<PathBuf>) {
        self.inner.lock().current_repo = repo;
    }

    /// Consume the pending navigation target (exactly-once semantics: a
    /// second take with no new target yields `None`)
    pub fn take_pending_target(&self) -> Option<LoadTarget> {
        self.inner.lock().pending_target.take()
    }

    pub fn set_pending_target(&self, target: Option<LoadTarget>) {
        if let Some(target) = target {
            self.inner.lock().pending_target = Some(target);
        }
    }

    pub fn set_tool_available(&self, available: bool) {
        self.tool_available.store(available, Ordering::SeqCst);
    }

    /// First successful host-level creation of the surface
    pub fn on_created(&self, initial_target: Option<LoadTarget>) {
        let repos = self.discovery.repos();
        {
            let mut inner = self.inner.lock();
            if inner.state != LifecycleState::Uninitialized {
                return;
            }
            inner.state = LifecycleState::Visible;
            inner.known_repos = repos.clone();
            inner.pending_target = initial_target.clone();
        }
        info!("View created (load target: {:?})", initial_target);
        self.render(&repos);
    }

    /// Host reported that the surface went on- or off-screen
    pub fn on_visibility_changed(&self, visible: bool) {
        enum Transition {
            Shown(RepoSet, Option<LoadTarget>),
            Hidden,
            None,
        }

        let transition = {
            let mut inner = self.inner.lock();
            match (inner.state, visible) {
                (LifecycleState::Hidden, true) => {
                    inner.state = LifecycleState::Visible;
                    inner.known_repos = self.discovery.repos();
                    let target = inner.pending_target.take();
                    Transition::Shown(inner.known_repos.clone(), target)
                }
                (LifecycleState::Visible, false) => {
                    inner.state = LifecycleState::Hidden;
                    inner.current_repo = None;
                    Transition::Hidden
                }
                _ => Transition::None,
            }
        };

        match transition {
            Transition::Shown(repos, target) => {
                debug!("View shown; re-rendering with {} repositories", repos.len());
                self.render(&repos);
                if target.is_some() {
                    self.push_repos(repos, target);
                }
            }
            Transition::Hidden => {
                debug!("View hidden; stopping watcher");
                self.watcher.stop();
            }
            Transition::None => {}
        }
    }

    /// External repository-set change (repository added/removed)
    pub fn on_repos_changed(&self, repos: RepoSet, target: Option<LoadTarget>) {
        enum Effect {
            Push { rerender: bool },
            Deferred,
            Ignored,
        }

        let effect = {
            let mut inner = self.inner.lock();
            match inner.state {
                LifecycleState::Disposed => Effect::Ignored,
                LifecycleState::Visible => {
                    // The rendered document only differs structurally when
                    // crossing zero <-> nonzero repositories
                    let rerender = inner.known_repos.is_empty() != repos.is_empty();
                    inner.known_repos = repos.clone();
                    Effect::Push { rerender }
                }
                LifecycleState::Hidden | LifecycleState::Uninitialized => {
                    inner.known_repos = repos.clone();
                    if let Some(target) = target.clone() {
                        inner.pending_target = Some(target);
                    }
                    Effect::Deferred
                }
            }
        };

        match effect {
            Effect::Push { rerender } => {
                if rerender {
                    self.render(&repos);
                }
                self.push_repos(repos, target);
            }
            Effect::Deferred => {
                debug!("Repository change recorded while hidden");
            }
            Effect::Ignored => {}
        }
    }

    /// Host disposal signal; idempotent against duplicates
    pub fn on_disposed(&self) {
        {
            let mut inner = self.inner.lock();
            if inner.state == LifecycleState::Disposed {
                return;
            }
            inner.state = LifecycleState::Disposed;
            inner.current_repo = None;
            inner.pending_target = None;
        }
        self.watcher.stop();
        info!("View disposed");
    }

    /// The document the surface should show for a given repository set
    pub fn document_for(&self, repos: &RepoSet) -> Document {
        if !self.tool_available.load(Ordering::SeqCst) {
            Document::Unavailable
        } else if repos.is_empty() {
            Document::NoRepositories
        } else {
            Document::Working
        }
    }

    fn render(&self, repos: &RepoSet) {
        let document = self.document_for(repos);
        if let Err(e) = self.surface.render(document) {
            warn!("Render failed: {}", e);
        }
    }

    fn push_repos(&self, repos: RepoSet, target: Option<LoadTarget>) {
        let message = ResponseMessage::LoadRepos {
            repos,
            last_active_repo: self.state_store.last_active_repo(),
            load_view_to: target,
        };
        if let Err(e) = self.surface.post(message) {
            warn!("Dropped repository update push: {}", e);
        }
    }
}
