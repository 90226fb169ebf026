//! Docked view host: the host materializes the surface lazily
//!
//! Revealing the docked view only asks the host to bring the container
//! on-screen; the surface itself (and therefore view initialization) arrives
//! later through [`DockHost::on_surface_materialized`]. A navigation target
//! given before that point is parked here, not in the lifecycle, because the
//! lifecycle is still `Uninitialized`.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error};

use gitviz_protocol::LoadTarget;

use crate::capabilities::HostWindow;
use crate::host::ViewCore;
use crate::lifecycle::LifecycleState;

/// Singleton host for the docked hosting style
pub struct DockHost {
    core: ViewCore,
    window: Arc<dyn HostWindow>,
    deferred_target: Mutex<Option<LoadTarget>>,
}

impl DockHost {
    pub fn new(core: ViewCore, window: Arc<dyn HostWindow>) -> Self {
        Self {
            core,
            window,
            deferred_target: Mutex::new(None),
        }
    }

    pub fn core(&self) -> &ViewCore {
        &self.core
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.core.lifecycle.state()
    }

    /// Ask the host to bring the docked view on-screen, navigating to
    /// `target` once a surface exists to navigate
    pub fn show(&self, target: Option<LoadTarget>) {
        match self.core.lifecycle.state() {
            LifecycleState::Uninitialized => {
                if let Some(target) = target {
                    *self.deferred_target.lock() = Some(target);
                }
            }
            LifecycleState::Disposed => return,
            _ => {
                if self.core.lifecycle.is_visible() {
                    if let Some(target) = target {
                        self.core.push_target(target);
                    }
                } else {
                    self.core.lifecycle.set_pending_target(target);
                }
            }
        }
        self.reveal();
    }

    /// The host finished creating the docked surface; initialize the view
    /// with any target parked since before the surface existed
    pub fn on_surface_materialized(&self) {
        let target = self.deferred_target.lock().take();
        self.core.lifecycle.on_created(target);
    }

    pub fn dispose(&self) {
        self.core.lifecycle.on_disposed();
    }

    fn reveal(&self) {
        if let Err(e) = self.window.reveal() {
            debug!("Dock reveal failed, trying fallback: {}", e);
            if let Err(e) = self.window.reveal_fallback() {
                error!("Failed to reveal docked view: {}", e);
            }
        }
    }
}
