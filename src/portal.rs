//! Portal entities: region geometry, destinations, and the portal definition
//! handed to the registry by external loaders.

use crate::types::{BlockCoord, ChunkCoord, Location};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// Axis-aligned block volume owned by a single world.
///
/// `min`/`max` are inclusive block coordinates; constructors normalise the
/// corners so callers may pass them in either order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortalRegion {
    pub world: String,
    pub min: BlockCoord,
    pub max: BlockCoord,
}

impl PortalRegion {
    pub fn new(world: impl Into<String>, a: BlockCoord, b: BlockCoord) -> Self {
        Self {
            world: world.into(),
            min: BlockCoord::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockCoord::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    pub fn contains(&self, location: &Location) -> bool {
        if location.world != self.world {
            return false;
        }
        let b = location.block();
        b.x >= self.min.x
            && b.x <= self.max.x
            && b.y >= self.min.y
            && b.y <= self.max.y
            && b.z >= self.min.z
            && b.z <= self.max.z
    }

    /// Every chunk this region touches (used for registry bucketing).
    pub fn chunks(&self) -> Vec<ChunkCoord> {
        let min_c = self.min.chunk();
        let max_c = self.max.chunk();
        let mut out = Vec::new();
        for cx in min_c.x..=max_c.x {
            for cz in min_c.z..=max_c.z {
                out.push(ChunkCoord::new(cx, cz));
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Destination
// ---------------------------------------------------------------------------

/// Where a portal leads.
///
/// `Invalid` is the misconfiguration sentinel: it survives loading so the
/// portal stays visible to admins, but it never teleports anyone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Destination {
    Invalid,
    /// A named anchor resolved by the destination collaborator (another
    /// portal, a spawn point, ...).
    Anchor { name: String },
    /// An explicit position in a named world.
    Position { world: String, x: f64, y: f64, z: f64 },
}

impl Destination {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Destination::Invalid)
    }
}

// ---------------------------------------------------------------------------
// Portal definition
// ---------------------------------------------------------------------------

/// A configured portal: geometry plus transition policy.
///
/// Definitions are built and validated by external loaders; the engine treats
/// them as immutable once registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portal {
    /// Unique name, also the identity sessions refer back to.
    pub name: String,
    /// World that owns the portal's region.
    pub world: String,
    pub region: PortalRegion,
    pub destination: Destination,
    /// Material token the physical frame must still be made of.
    pub frame_material: String,
    /// Signed toll. Negative pays the player, zero is free.
    pub price: f64,
    /// `None` is primary server money, `Some` an item-denominated currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Access node checked when enforcement is on.
    pub permission: String,
    /// Node that waives the toll regardless of price sign.
    pub exempt_permission: String,
    /// Minimum spacing between transitions for one player.
    #[serde(default)]
    pub cooldown: Duration,
    /// Script run before default handling; `None` means no script.
    #[serde(default)]
    pub handler_script: Option<String>,
    /// Old-style portal that must use the default pipeline even when the
    /// animation subsystem is active.
    #[serde(default)]
    pub legacy: bool,
    /// Collaborator-defined extension metadata (owner, safe-teleport, ...).
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl Portal {
    /// Build a portal with defaulted permission nodes and policy fields.
    pub fn new(name: impl Into<String>, region: PortalRegion, destination: Destination) -> Self {
        let name = name.into();
        let world = region.world.clone();
        Self {
            permission: format!("portal.access.{name}"),
            exempt_permission: format!("portal.exempt.{name}"),
            name,
            world,
            region,
            destination,
            frame_material: String::new(),
            price: 0.0,
            currency: None,
            cooldown: Duration::ZERO,
            handler_script: None,
            legacy: true,
            properties: HashMap::new(),
        }
    }

    pub fn with_frame_material(mut self, material: impl Into<String>) -> Self {
        self.frame_material = material.into();
        self
    }

    pub fn with_price(mut self, price: f64, currency: Option<String>) -> Self {
        self.price = price;
        self.currency = currency;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_handler_script(mut self, script: impl Into<String>) -> Self {
        let script = script.into();
        self.handler_script = if script.is_empty() { None } else { Some(script) };
        self
    }

    pub fn with_legacy(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }

    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.region.contains(location)
    }
}
