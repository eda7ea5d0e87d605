//! Per-player transient state: staleness tracking, current portal, and
//! cooldown timestamps. Created on first movement observation, dropped on
//! quit, never persisted.

use crate::types::{BlockCoord, Location};
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub struct PlayerSession {
    player: String,
    last_block: Option<BlockCoord>,
    stale: bool,
    /// Name of the portal the player currently stands in. A name, not a
    /// reference – the portal may be unregistered while the session still
    /// holds it, and lookups must degrade to "none".
    current_portal: Option<String>,
    /// Per-portal transition times for cooldown accounting.
    last_transitions: HashMap<String, Instant>,
    inspecting: bool,
}

impl PlayerSession {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            last_block: None,
            stale: false,
            current_portal: None,
            last_transitions: HashMap::new(),
            inspecting: false,
        }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    // -----------------------------------------------------------------------
    // Staleness
    // -----------------------------------------------------------------------

    /// Record a movement sample and flag it stale when the block-granularity
    /// coordinates did not change (orientation-only movement).
    ///
    /// Returns true when the sample is stale. The first sample a session ever
    /// sees is never stale.
    pub fn observe_location(&mut self, location: &Location) -> bool {
        let block = location.block();
        self.stale = self.last_block == Some(block);
        if !self.stale {
            self.last_block = Some(block);
        }
        self.stale
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn last_block(&self) -> Option<BlockCoord> {
        self.last_block
    }

    // -----------------------------------------------------------------------
    // Current portal
    // -----------------------------------------------------------------------

    pub fn set_current_portal(&mut self, name: Option<String>) {
        self.current_portal = name;
    }

    pub fn current_portal(&self) -> Option<&str> {
        self.current_portal.as_deref()
    }

    // -----------------------------------------------------------------------
    // Cooldown
    // -----------------------------------------------------------------------

    pub fn record_transition(&mut self, portal: &str, at: Instant) {
        self.last_transitions.insert(portal.to_string(), at);
    }

    /// Time still to wait before another transition is allowed, given the
    /// entered portal's cooldown. Checks the most recent transition through
    /// *any* portal, so portal-hopping cannot dodge the spacing.
    pub fn cooldown_remaining(&self, cooldown: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_transitions.values().max()?;
        let elapsed = now.saturating_duration_since(*last);
        if elapsed < cooldown {
            Some(cooldown - elapsed)
        } else {
            None
        }
    }

    pub fn last_transition(&self, portal: &str) -> Option<Instant> {
        self.last_transitions.get(portal).copied()
    }

    // -----------------------------------------------------------------------
    // Inspection mode
    // -----------------------------------------------------------------------

    /// While inspecting, the player can stand in portals without the
    /// eligibility pipeline running (admin tooling).
    pub fn set_inspecting(&mut self, inspecting: bool) {
        self.inspecting = inspecting;
    }

    pub fn is_inspecting(&self) -> bool {
        self.inspecting
    }
}
