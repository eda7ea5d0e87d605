//! FlowGuard – denies directional block flow (lava, water, ...) across a
//! portal boundary. Pure read of registry state, no mutation.

use crate::event::FlowOutcome;
use crate::registry::PortalRegistry;
use crate::types::Location;
use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;

pub struct FlowGuard {
    registry: Arc<RwLock<PortalRegistry>>,
}

impl FlowGuard {
    pub fn new(registry: Arc<RwLock<PortalRegistry>>) -> Self {
        Self { registry }
    }

    /// Decide one flow sample. Events already cancelled by another observer
    /// are left untouched; otherwise flow is denied when either endpoint is a
    /// portal block.
    pub fn handle_flow(
        &self,
        from: &Location,
        to: &Location,
        already_cancelled: bool,
    ) -> FlowOutcome {
        if already_cancelled {
            return FlowOutcome::AlreadyCancelled;
        }

        let registry = self.registry.read();
        // Flowing in, or flowing out – both are denied.
        if registry.is_portal(to) || registry.is_portal(from) {
            debug!("Cancelled block flow {} -> {}", from, to);
            return FlowOutcome::Cancelled;
        }
        FlowOutcome::Allowed
    }
}
