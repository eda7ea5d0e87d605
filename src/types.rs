//! Core spatial and configuration types shared across all modules.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Basic math
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// A full-precision position inside a named world, including view angles.
///
/// Orientation is carried so movement samples that only turn the head can be
/// recognised as stale (block coordinates unchanged).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub world: String,
    pub position: Vec3,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            position: Vec3::new(x, y, z),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_view(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Block-granularity coordinate of this location.
    pub fn block(&self) -> BlockCoord {
        BlockCoord::new(
            self.position.x.floor() as i32,
            self.position.y.floor() as i32,
            self.position.z.floor() as i32,
        )
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.world, self.position)
    }
}

// ---------------------------------------------------------------------------
// Spatial chunking
// ---------------------------------------------------------------------------

/// Integer block coordinate (floor of a world-space position).
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlockCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chunk containing this block (16×16 block columns).
    pub fn chunk(&self) -> ChunkCoord {
        ChunkCoord::new(self.x >> 4, self.z >> 4)
    }
}

impl std::fmt::Display for BlockCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{},{}]", self.x, self.y, self.z)
    }
}

/// Horizontal chunk coordinate used to bucket portals for O(1) lookup.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.x, self.z)
    }
}

// ---------------------------------------------------------------------------
// Stats & config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStats {
    pub registered_portals: usize,
    pub active_sessions: usize,
    pub moves_handled: u64,
    pub teleports_completed: u64,
}

/// Engine-wide behaviour flags, passed in at construction (and swappable at
/// runtime) rather than read from ambient globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// When true, non-legacy portals are handled by the animation subsystem
    /// and this engine skips them; legacy portals always go through the
    /// default pipeline.
    pub animation_mode: bool,
    /// Enforce the per-portal access permission node on entry.
    pub enforce_access: bool,
    /// Send the player a message when the cooldown check blocks them.
    pub notify_cooldown: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            animation_mode: false,
            enforce_access: true,
            notify_cooldown: true,
        }
    }
}
