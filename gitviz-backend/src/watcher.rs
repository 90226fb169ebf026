//! Repository file watching and refresh suppression
//!
//! One coordinator wraps one per-repository watcher: only the currently
//! focused repository is observed. Every command dispatch brackets itself in
//! a [`MuteWindow`] so that a mutating command's own filesystem side effects
//! (checkout, commit, etc.) do not trigger a watcher-driven refresh message
//! on top of the command's own response.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, FileIdMap};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use gitviz_protocol::ResponseMessage;
use gitviz_utils::{GitvizError, Result};

use crate::capabilities::{FileWatcher, UiSurface};

/// Wraps the per-repository watcher with mute/unmute and a single
/// watched-path slot
pub struct FileWatchCoordinator {
    watcher: Mutex<Box<dyn FileWatcher>>,
    watched: Mutex<Option<PathBuf>>,
    muted: AtomicBool,
    surface: Arc<dyn UiSurface>,
}

impl FileWatchCoordinator {
    pub fn new(watcher: Box<dyn FileWatcher>, surface: Arc<dyn UiSurface>) -> Self {
        Self {
            watcher: Mutex::new(watcher),
            watched: Mutex::new(None),
            muted: AtomicBool::new(false),
            surface,
        }
    }

    /// Switch the watcher to a new repository path, replacing any previous one
    pub fn start(&self, repo: &Path) -> Result<()> {
        let mut watcher = self.watcher.lock();
        watcher.stop();
        watcher.watch(repo)?;
        *self.watched.lock() = Some(repo.to_path_buf());
        debug!("Watching repository {}", repo.display());
        Ok(())
    }

    /// Stop watching entirely (no background work while unobserved)
    pub fn stop(&self) {
        self.watcher.lock().stop();
        if self.watched.lock().take().is_some() {
            debug!("Repository watcher stopped");
        }
    }

    /// The currently watched repository path, if any
    pub fn watched(&self) -> Option<PathBuf> {
        self.watched.lock().clone()
    }

    pub fn mute(&self) {
        self.muted.store(true, Ordering::SeqCst);
    }

    pub fn unmute(&self) {
        self.muted.store(false, Ordering::SeqCst);
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    /// Open a mute window released on every exit path, including unwinds
    pub fn mute_scope(&self) -> MuteWindow<'_> {
        self.mute();
        MuteWindow { coordinator: self }
    }

    /// Entry point for watcher events: swallowed while muted, otherwise
    /// forwarded as exactly one refresh push
    pub fn deliver(&self, repo: &Path) {
        if self.is_muted() {
            debug!("Suppressed watcher event for {} (muted)", repo.display());
            return;
        }
        // An event from a watcher that was stopped or switched away is stale
        if self.watched.lock().as_deref() != Some(repo) {
            debug!("Ignored watcher event for unwatched {}", repo.display());
            return;
        }
        let message = ResponseMessage::Refresh {
            repo: repo.display().to_string(),
        };
        if let Err(e) = self.surface.post(message) {
            warn!("Dropped refresh push for {}: {}", repo.display(), e);
        }
    }
}

/// Scoped suppression of watcher-originated refresh notifications.
///
/// The flag is a plain boolean, not a counter: handlers never re-enter the
/// dispatcher, so windows cannot nest.
pub struct MuteWindow<'a> {
    coordinator: &'a FileWatchCoordinator,
}

impl Drop for MuteWindow<'_> {
    fn drop(&mut self) {
        self.coordinator.unmute();
    }
}

/// Forward watcher events from the channel into the coordinator
pub fn spawn_event_pump(
    coordinator: Arc<FileWatchCoordinator>,
    mut rx: mpsc::UnboundedReceiver<PathBuf>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(repo) = rx.recv().await {
            coordinator.deliver(&repo);
        }
    })
}

/// Production [`FileWatcher`] backed by a debounced notify watcher
pub struct RepoWatcher {
    tx: mpsc::UnboundedSender<PathBuf>,
    debouncer: Option<Debouncer<RecommendedWatcher, FileIdMap>>,
}

impl RepoWatcher {
    pub fn new(tx: mpsc::UnboundedSender<PathBuf>) -> Self {
        Self { tx, debouncer: None }
    }

    /// Check if an event should refresh the view.
    ///
    /// Internal `.git` churn (object packs, logs) is ignored; only the files
    /// that change what the graph shows are tracked.
    fn is_repo_change(event: &Event) -> bool {
        matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) && event.paths.iter().any(|p| Self::is_tracked_path(p))
    }

    fn is_tracked_path(path: &Path) -> bool {
        let components: Vec<String> = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        match components.iter().position(|c| c == ".git") {
            None => true,
            Some(i) => match components.get(i + 1).map(String::as_str) {
                Some("HEAD") | Some("config") | Some("index") | Some("refs")
                | Some("packed-refs") => true,
                _ => false,
            },
        }
    }
}

impl FileWatcher for RepoWatcher {
    fn watch(&mut self, path: &Path) -> Result<()> {
        self.stop();

        let tx = self.tx.clone();
        let repo = path.to_path_buf();
        let mut debouncer = new_debouncer(
            Duration::from_millis(750),
            None,
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    if events.iter().any(|e| RepoWatcher::is_repo_change(&e.event)) {
                        let _ = tx.send(repo.clone());
                    }
                }
                Err(errors) => {
                    warn!("Repository watch error: {:?}", errors);
                }
            },
        )
        .map_err(|e| GitvizError::watch(format!("Failed to create watcher: {}", e)))?;

        debouncer
            .watcher()
            .watch(path, RecursiveMode::Recursive)
            .map_err(|e| GitvizError::watch(format!("Failed to watch {}: {}", path.display(), e)))?;

        self.debouncer = Some(debouncer);
        Ok(())
    }

    fn stop(&mut self) {
        self.debouncer = None;
    }
}
