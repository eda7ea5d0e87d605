//! Voxgate Portal Engine
//!
//! Server-side portal mechanics for a multiplayer voxel world: detect when a
//! player's movement puts them inside a portal region, decide whether and
//! where to teleport them, and apply the side effects (tolls, cooldowns,
//! permission checks, scripted handlers).
//!
//! ## Architecture
//!
//! ```text
//! TransitionEngine  (engine.rs)  ← per-player state machine, pipeline
//!   ├── PortalRegistry  (registry.rs)  ← chunk-indexed containment lookup
//!   │     └── Portal  (portal.rs)      ← region, destination, policy
//!   ├── PlayerSession  (session.rs)    ← staleness, cooldown timestamps
//!   └── Collaborators  (collab.rs)     ← economy, permissions, scripting, ...
//! FlowGuard  (flow.rs)  ← denies block flow across portal boundaries
//! ```
//!
//! The host environment's event dispatch stays outside the crate: it feeds
//! movement and flow samples into [`TransitionEngine::handle_move`] and
//! [`FlowGuard::handle_flow`] one at a time and acts on the returned
//! outcomes. All session mutation happens synchronously within one sample.

pub mod collab;
pub mod engine;
pub mod event;
pub mod flow;
pub mod portal;
pub mod registry;
pub mod session;
pub mod types;

// Convenience re-exports
pub use collab::{
    Collaborators, DestinationResolver, Economist, EventBus, FrameValidator, PermissionService,
    ScriptHost, ScriptOutcome, TeleportExecutor, WorldManager,
};
pub use engine::TransitionEngine;
pub use event::{Denial, DenialReason, FlowOutcome, MoveOutcome, SkipReason, TransitionEvent};
pub use flow::FlowGuard;
pub use portal::{Destination, Portal, PortalRegion};
pub use registry::{PortalRegistry, RegistryError};
pub use session::PlayerSession;
pub use types::{BlockCoord, ChunkCoord, EngineConfig, EngineStats, Location, Vec3};
