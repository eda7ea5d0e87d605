//! Collaborator contracts: the thin seams between the transition engine and
//! the destination, world, permission, economy, frame, scripting, teleport
//! and event subsystems it coordinates with.
//!
//! Real logic lives behind these traits in the host; the engine only needs
//! the calls to be synchronous and non-blocking from its point of view.

use crate::event::TransitionEvent;
use crate::portal::{Destination, Portal};
use crate::types::Location;

/// Resolves a portal destination to a concrete location for a player.
///
/// `None` means "cannot resolve right now" (transient). Permanently
/// misconfigured portals carry [`Destination::Invalid`] and are rejected
/// before the resolver is ever consulted.
pub trait DestinationResolver: Send + Sync {
    fn resolve(&self, destination: &Destination, player: &str) -> Option<Location>;
}

pub trait WorldManager: Send + Sync {
    fn is_managed(&self, world: &str) -> bool;
}

pub trait PermissionService: Send + Sync {
    fn has_permission(&self, player: &str, node: &str, default_if_unset: bool) -> bool;
}

/// Economy seam: affordability, settlement, and message formatting.
pub trait Economist: Send + Sync {
    fn is_wealthy_enough(&self, player: &str, amount: f64, currency: Option<&str>) -> bool;
    fn withdraw(&self, player: &str, amount: f64, currency: Option<&str>);
    fn deposit(&self, player: &str, amount: f64, currency: Option<&str>);
    fn format_price(&self, amount: f64, currency: Option<&str>) -> String;
    /// Wrap an insufficient-funds message in whatever decoration the economy
    /// system uses for the given currency.
    fn insufficient_funds_message(&self, currency: Option<&str>, text: &str) -> String;
}

/// Fronts the out-of-scope spatial frame detector: is the portal's physical
/// frame still made of its required material at the player's location?
pub trait FrameValidator: Send + Sync {
    fn is_frame_intact(&self, portal: &Portal, at: &Location) -> bool;
}

/// What a portal script did with the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOutcome {
    /// The script owns the transition (including any teleport it performed);
    /// default handling must not run.
    Handled,
    /// The script declined; the default pipeline continues.
    NotHandled,
}

/// Scripting seam. An *uninstalled* host is modelled as the engine holding no
/// `ScriptHost` at all – a logged condition, not a per-call fault.
pub trait ScriptHost: Send + Sync {
    fn run_portal_script(
        &self,
        player: &str,
        destination: &Destination,
        portal: &Portal,
    ) -> ScriptOutcome;
}

/// Side-effecting teleport collaborator, assumed reliable.
pub trait TeleportExecutor: Send + Sync {
    fn teleport(&self, player: &str, to: &Location);

    /// Clear accumulated fall state so the arrival does not hurt. No-op on
    /// platforms without fall damage.
    fn reset_fall_state(&self, _player: &str) {}
}

/// Synchronous event dispatch: observers may cancel the event before
/// `publish` returns.
pub trait EventBus: Send + Sync {
    fn publish(&self, event: &mut TransitionEvent);
}

/// The full set of collaborators the engine is constructed with.
///
/// `scripts` is optional: a missing script host downgrades scripted portals
/// to default handling with a warning.
pub struct Collaborators {
    pub resolver: Box<dyn DestinationResolver>,
    pub worlds: Box<dyn WorldManager>,
    pub permissions: Box<dyn PermissionService>,
    pub economist: Box<dyn Economist>,
    pub frames: Box<dyn FrameValidator>,
    pub scripts: Option<Box<dyn ScriptHost>>,
    pub teleporter: Box<dyn TeleportExecutor>,
    pub events: Box<dyn EventBus>,
}
