//! Backend controller core for the gitviz commit-graph view
//!
//! This crate owns the message protocol service loop between a sandboxed UI
//! surface and the host: command dispatch ([`dispatch::CommandDispatcher`]),
//! view lifecycle tracking ([`lifecycle::ViewLifecycle`]), repository file
//! watching ([`watcher::FileWatchCoordinator`]) and refresh correlation
//! ([`refresh::RefreshCorrelator`]). Everything host- or tool-specific sits
//! behind the traits in [`capabilities`].

pub mod capabilities;
pub mod dispatch;
pub mod host;
pub mod lifecycle;
pub mod refresh;
pub mod watcher;

#[cfg(test)]
pub(crate) mod testing;

pub use capabilities::{
    AvatarFetcher, CommitsOptions, CommitsResult, Document, FileWatcher, HostWindow,
    RepoDiscovery, RepoInfo, RepoInfoOptions, RepositoryBackend, StateStore, UiSurface,
};
pub use dispatch::{CommandDispatcher, HandlerResult};
pub use host::{DockHost, HostRegistry, PanelHost, ViewCore};
pub use lifecycle::{LifecycleState, ViewLifecycle};
pub use refresh::{QueryKind, RefreshCorrelator};
pub use watcher::{spawn_event_pump, FileWatchCoordinator, MuteWindow, RepoWatcher};
