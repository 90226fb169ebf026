//! View hosting: wiring one backend core to a host-provided window
//!
//! Two hosting styles exist, each a singleton: the floating panel
//! ([`PanelHost`]) whose surface is created eagerly, and the docked view
//! ([`DockHost`]) whose surface the host materializes lazily. The
//! [`HostRegistry`] enforces at most one live instance per style and routes
//! repeat open requests to the existing instance.

mod dock;
mod panel;

pub use dock::DockHost;
pub use panel::PanelHost;

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use gitviz_protocol::{LoadTarget, ResponseMessage};

use crate::capabilities::{
    AvatarFetcher, FileWatcher, RepoDiscovery, RepositoryBackend, StateStore, UiSurface,
};
use crate::dispatch::CommandDispatcher;
use crate::lifecycle::ViewLifecycle;
use crate::refresh::RefreshCorrelator;
use crate::watcher::FileWatchCoordinator;

/// One fully-wired backend core serving one UI surface
pub struct ViewCore {
    pub dispatcher: CommandDispatcher,
    pub lifecycle: Arc<ViewLifecycle>,
    pub watcher: Arc<FileWatchCoordinator>,
    pub correlator: Arc<RefreshCorrelator>,
    pub surface: Arc<dyn UiSurface>,
    discovery: Arc<dyn RepoDiscovery>,
    state_store: Arc<dyn StateStore>,
}

impl ViewCore {
    pub fn new(
        backend: Arc<dyn RepositoryBackend>,
        discovery: Arc<dyn RepoDiscovery>,
        state_store: Arc<dyn StateStore>,
        avatars: Arc<dyn AvatarFetcher>,
        surface: Arc<dyn UiSurface>,
        file_watcher: Box<dyn FileWatcher>,
        tool_available: bool,
    ) -> Self {
        let watcher = Arc::new(FileWatchCoordinator::new(file_watcher, Arc::clone(&surface)));
        let correlator = Arc::new(RefreshCorrelator::new());
        let lifecycle = Arc::new(ViewLifecycle::new(
            Arc::clone(&surface),
            Arc::clone(&watcher),
            Arc::clone(&discovery),
            Arc::clone(&state_store),
            tool_available,
        ));
        let dispatcher = CommandDispatcher::new(
            backend,
            Arc::clone(&discovery),
            Arc::clone(&state_store),
            avatars,
            Arc::clone(&surface),
            Arc::clone(&watcher),
            Arc::clone(&correlator),
            Arc::clone(&lifecycle),
        );
        Self {
            dispatcher,
            lifecycle,
            watcher,
            correlator,
            surface,
            discovery,
            state_store,
        }
    }

    /// Push a navigation target to an already-visible surface as an
    /// unprompted repository update
    pub(super) fn push_target(&self, target: LoadTarget) {
        let message = ResponseMessage::LoadRepos {
            repos: self.discovery.repos(),
            last_active_repo: self.state_store.last_active_repo(),
            load_view_to: Some(target),
        };
        if let Err(e) = self.surface.post(message) {
            warn!("Dropped navigation push: {}", e);
        }
    }
}

/// At most one live host per hosting style.
///
/// Opening an already-open style navigates and re-reveals the existing
/// instance instead of spawning a second surface.
#[derive(Default)]
pub struct HostRegistry {
    panel: Mutex<Option<Arc<PanelHost>>>,
    dock: Mutex<Option<Arc<DockHost>>>,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or re-open) the floating panel, creating it on first use
    pub fn show_panel(
        &self,
        target: Option<LoadTarget>,
        create: impl FnOnce() -> Arc<PanelHost>,
    ) -> Arc<PanelHost> {
        let host = Arc::clone(self.panel.lock().get_or_insert_with(create));
        host.show(target);
        host
    }

    /// Open (or re-open) the docked view, creating it on first use
    pub fn show_dock(
        &self,
        target: Option<LoadTarget>,
        create: impl FnOnce() -> Arc<DockHost>,
    ) -> Arc<DockHost> {
        let host = Arc::clone(self.dock.lock().get_or_insert_with(create));
        host.show(target);
        host
    }

    pub fn panel(&self) -> Option<Arc<PanelHost>> {
        self.panel.lock().clone()
    }

    pub fn dock(&self) -> Option<Arc<DockHost>> {
        self.dock.lock().clone()
    }

    /// Host disposed the panel surface; a later open creates a fresh instance
    pub fn dispose_panel(&self) {
        if let Some(host) = self.panel.lock().take() {
            host.dispose();
        }
    }

    /// Host disposed the docked surface; a later open creates a fresh
    /// instance
    pub fn dispose_dock(&self) {
        if let Some(host) = self.dock.lock().take() {
            host.dispose();
        }
    }
}
