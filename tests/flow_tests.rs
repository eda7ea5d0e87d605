//! FlowGuard unit tests

#[cfg(test)]
mod tests {
    use parking_lot::RwLock;
    use std::sync::Arc;
    use voxgate::{
        BlockCoord, Destination, FlowGuard, FlowOutcome, Location, Portal, PortalRegion,
        PortalRegistry,
    };

    fn make_guard() -> FlowGuard {
        let mut registry = PortalRegistry::new();
        registry
            .register(Portal::new(
                "gate",
                PortalRegion::new(
                    "overworld",
                    BlockCoord::new(10, 64, 0),
                    BlockCoord::new(12, 66, 0),
                ),
                Destination::Position {
                    world: "hub".into(),
                    x: 0.5,
                    y: 64.0,
                    z: 0.5,
                },
            ))
            .unwrap();
        FlowGuard::new(Arc::new(RwLock::new(registry)))
    }

    fn interior() -> Location {
        Location::new("overworld", 11.5, 65.0, 0.5)
    }

    fn exterior(x: f64) -> Location {
        Location::new("overworld", x, 65.0, 0.5)
    }

    // -----------------------------------------------------------------------
    // Scenario 4: flow into / out of a portal
    // -----------------------------------------------------------------------

    #[test]
    fn flow_into_a_portal_is_cancelled() {
        let guard = make_guard();
        assert_eq!(
            guard.handle_flow(&exterior(13.5), &interior(), false),
            FlowOutcome::Cancelled
        );
    }

    #[test]
    fn flow_out_of_a_portal_is_cancelled() {
        let guard = make_guard();
        assert_eq!(
            guard.handle_flow(&interior(), &exterior(13.5), false),
            FlowOutcome::Cancelled
        );
    }

    #[test]
    fn unrelated_flow_is_allowed() {
        let guard = make_guard();
        assert_eq!(
            guard.handle_flow(&exterior(20.5), &exterior(21.5), false),
            FlowOutcome::Allowed
        );
    }

    #[test]
    fn already_cancelled_events_are_left_untouched() {
        let guard = make_guard();
        // Even though the endpoint is inside a portal, no double handling.
        assert_eq!(
            guard.handle_flow(&exterior(13.5), &interior(), true),
            FlowOutcome::AlreadyCancelled
        );
    }
}
