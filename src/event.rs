//! Outcomes and domain events crossing the engine boundary.
//!
//! The host loop feeds samples in and acts on what comes back: denial
//! messages are delivered to the player, skips are silent, and the
//! cancellable [`TransitionEvent`] gives third parties their one chance to
//! veto a transition before it commits.

use crate::types::Location;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Veto event
// ---------------------------------------------------------------------------

/// Published before economic settlement and teleport. Observers cancel it
/// synchronously; a cancelled event halts the transition with no charge and
/// no teleport. Past this point the transition is committed.
#[derive(Debug, Clone)]
pub struct TransitionEvent {
    pub player: String,
    /// Name of the initiating portal.
    pub portal: String,
    /// Resolved destination the teleport would use.
    pub destination: Location,
    cancelled: bool,
}

impl TransitionEvent {
    pub fn new(player: impl Into<String>, portal: impl Into<String>, destination: Location) -> Self {
        Self {
            player: player.into(),
            portal: portal.into(),
            destination,
            cancelled: false,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

// ---------------------------------------------------------------------------
// Movement outcomes
// ---------------------------------------------------------------------------

/// Silent halts: transient or misconfiguration states the player cannot act
/// on. Logged at debug level, never messaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Animation mode is on and the portal is not legacy – the animation
    /// subsystem owns it, not this engine.
    HandledByAnimation,
    /// The portal carries the invalid-destination sentinel.
    InvalidDestination,
    /// The resolver could not produce a location right now.
    UnresolvedDestination,
    /// The resolved world is not under platform management.
    UnmanagedWorld,
    /// The frame no longer matches the required material.
    BrokenFrame,
}

/// Visible halts: policy states the player can act on (wait, get permission,
/// get money). The message is delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Denial {
    pub reason: DenialReason,
    /// `None` when messaging is configured off (cooldown notices only).
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    Cooldown { remaining: Duration },
    AccessDenied,
    InsufficientFunds,
}

/// Result of one movement sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Block coordinates unchanged – nothing was evaluated this tick.
    Stale,
    /// Not inside any portal.
    Outside,
    /// Inside a portal but the player is in inspection mode.
    Inspecting,
    /// Silent pipeline halt.
    Skipped(SkipReason),
    /// Player-visible pipeline halt.
    Denied(Denial),
    /// A third-party observer cancelled the transition event.
    Vetoed,
    /// A portal script took over the transition; default handling did not run.
    ScriptHandled,
    /// The transition committed.
    Teleported {
        destination: Location,
        /// Charged/earned notice when a toll was settled, `None` for free
        /// or exempt transitions.
        notice: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Flow outcomes
// ---------------------------------------------------------------------------

/// Result of one directional block-flow sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowOutcome {
    /// Someone already cancelled the event; left untouched.
    AlreadyCancelled,
    /// One of the endpoints is a portal block – flow denied.
    Cancelled,
    Allowed,
}
