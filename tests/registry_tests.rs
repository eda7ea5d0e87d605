//! PortalRegistry unit tests

#[cfg(test)]
mod tests {
    use voxgate::{BlockCoord, Destination, Location, Portal, PortalRegion, PortalRegistry};

    fn make_portal(name: &str, min: BlockCoord, max: BlockCoord) -> Portal {
        Portal::new(
            name,
            PortalRegion::new("overworld", min, max),
            Destination::Position {
                world: "hub".into(),
                x: 0.5,
                y: 64.0,
                z: 0.5,
            },
        )
    }

    // -----------------------------------------------------------------------
    // Register / unregister
    // -----------------------------------------------------------------------

    #[test]
    fn register_and_lookup_by_name() {
        let mut reg = PortalRegistry::new();
        assert!(reg.is_empty());

        reg.register(make_portal(
            "gate",
            BlockCoord::new(0, 64, 0),
            BlockCoord::new(2, 66, 0),
        ))
        .unwrap();

        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("gate").unwrap().name, "gate");
        assert!(reg.get("other").is_none());
        assert_eq!(reg.names(), vec!["gate".to_string()]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut reg = PortalRegistry::new();
        let a = make_portal("gate", BlockCoord::new(0, 64, 0), BlockCoord::new(2, 66, 0));
        let b = make_portal(
            "gate",
            BlockCoord::new(50, 64, 50),
            BlockCoord::new(52, 66, 50),
        );

        reg.register(a).unwrap();
        assert!(reg.register(b).is_err());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn unregister_removes_spatial_lookup() {
        let mut reg = PortalRegistry::new();
        reg.register(make_portal(
            "gate",
            BlockCoord::new(0, 64, 0),
            BlockCoord::new(2, 66, 0),
        ))
        .unwrap();

        let interior = Location::new("overworld", 1.5, 65.0, 0.5);
        assert!(reg.is_portal(&interior));

        let removed = reg.unregister("gate");
        assert!(removed.is_some());
        assert!(!reg.is_portal(&interior));
        assert!(reg.portal_at(&interior).is_none());
        assert!(reg.unregister("gate").is_none());
    }

    // -----------------------------------------------------------------------
    // Containment
    // -----------------------------------------------------------------------

    #[test]
    fn portal_at_matches_interior_blocks_only() {
        let mut reg = PortalRegistry::new();
        reg.register(make_portal(
            "gate",
            BlockCoord::new(10, 64, 0),
            BlockCoord::new(12, 66, 0),
        ))
        .unwrap();

        assert!(reg.is_portal(&Location::new("overworld", 10.1, 64.0, 0.9)));
        assert!(reg.is_portal(&Location::new("overworld", 12.9, 66.9, 0.0)));
        // One block east of the region
        assert!(!reg.is_portal(&Location::new("overworld", 13.1, 65.0, 0.5)));
        // Below it
        assert!(!reg.is_portal(&Location::new("overworld", 11.0, 63.9, 0.5)));
    }

    #[test]
    fn lookup_is_world_scoped() {
        let mut reg = PortalRegistry::new();
        reg.register(make_portal(
            "gate",
            BlockCoord::new(0, 64, 0),
            BlockCoord::new(2, 66, 0),
        ))
        .unwrap();

        assert!(reg.is_portal(&Location::new("overworld", 1.0, 65.0, 0.5)));
        assert!(!reg.is_portal(&Location::new("nether", 1.0, 65.0, 0.5)));
    }

    #[test]
    fn region_spanning_multiple_chunks_is_found_everywhere() {
        let mut reg = PortalRegistry::new();
        // x 12..=35 crosses chunk boundaries at 16 and 32.
        reg.register(make_portal(
            "wall",
            BlockCoord::new(12, 64, 0),
            BlockCoord::new(35, 66, 0),
        ))
        .unwrap();

        for x in [12.5, 16.5, 31.5, 35.5] {
            let loc = Location::new("overworld", x, 65.0, 0.5);
            assert_eq!(
                reg.portal_at(&loc).map(|p| p.name.clone()),
                Some("wall".to_string()),
                "expected containment at x={x}"
            );
        }
    }

    #[test]
    fn negative_coordinates_floor_correctly() {
        let mut reg = PortalRegistry::new();
        reg.register(make_portal(
            "west",
            BlockCoord::new(-3, 64, -3),
            BlockCoord::new(-1, 66, -1),
        ))
        .unwrap();

        // -0.5 floors to block -1, inside; -3.5 floors to -4, outside.
        assert!(reg.is_portal(&Location::new("overworld", -0.5, 64.5, -1.5)));
        assert!(!reg.is_portal(&Location::new("overworld", -3.5, 64.5, -1.5)));

        // Block/chunk math for negatives
        assert_eq!(Location::new("overworld", -0.5, 0.0, 0.0).block().x, -1);
        assert_eq!(BlockCoord::new(-1, 0, -17).chunk().x, -1);
        assert_eq!(BlockCoord::new(-1, 0, -17).chunk().z, -2);
    }

    #[test]
    fn overlapping_portals_resolve_deterministically_to_one() {
        let mut reg = PortalRegistry::new();
        reg.register(make_portal(
            "a",
            BlockCoord::new(0, 64, 0),
            BlockCoord::new(4, 66, 4),
        ))
        .unwrap();
        reg.register(make_portal(
            "b",
            BlockCoord::new(3, 64, 3),
            BlockCoord::new(7, 66, 7),
        ))
        .unwrap();

        // The overlap belongs to exactly one portal per query.
        let loc = Location::new("overworld", 3.5, 65.0, 3.5);
        let hit = reg.portal_at(&loc).unwrap();
        assert!(hit.name == "a" || hit.name == "b");
    }
}
