//! Floating panel host: the surface exists as soon as the host is created

use std::sync::Arc;

use tracing::{debug, error};

use gitviz_protocol::LoadTarget;

use crate::capabilities::HostWindow;
use crate::host::ViewCore;
use crate::lifecycle::LifecycleState;

/// Singleton host for the floating panel hosting style
pub struct PanelHost {
    core: ViewCore,
    window: Arc<dyn HostWindow>,
}

impl PanelHost {
    pub fn new(core: ViewCore, window: Arc<dyn HostWindow>) -> Self {
        Self { core, window }
    }

    pub fn core(&self) -> &ViewCore {
        &self.core
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.core.lifecycle.state()
    }

    /// Open the panel, navigating to `target` if one was given.
    ///
    /// The first call initializes the view; later calls route the target to
    /// the existing surface (immediately when visible, deferred otherwise)
    /// and re-reveal the window.
    pub fn show(&self, target: Option<LoadTarget>) {
        match self.core.lifecycle.state() {
            LifecycleState::Uninitialized => self.core.lifecycle.on_created(target),
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

    pub fn dispose(&self) {
        self.core.lifecycle.on_disposed();
    }

    /// Reveal the window, falling back once to the secondary strategy
    fn reveal(&self) {
        if let Err(e) = self.window.reveal() {
            debug!("Panel reveal failed, trying fallback: {}", e);
            if let Err(e) = self.window.reveal_fallback() {
                error!("Failed to reveal panel: {}", e);
            }
        }
    }
}
