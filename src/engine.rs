//! TransitionEngine – the per-player state machine deciding, on every
//! movement sample, whether the player is newly inside a portal and eligible
//! to transition.
//!
//! The eligibility pipeline is a deliberate waterfall from cheapest and most
//! certain to fail down to the side-effecting steps: animation gate →
//! destination resolution → world management → frame re-check → script
//! handoff → cooldown → access → toll → third-party veto → settlement →
//! teleport. The first failing step halts the sample; the player stays put
//! and the next movement sample re-evaluates from scratch.

use crate::collab::{Collaborators, ScriptOutcome};
use crate::event::{Denial, DenialReason, MoveOutcome, SkipReason, TransitionEvent};
use crate::portal::Portal;
use crate::registry::PortalRegistry;
use crate::session::PlayerSession;
use crate::types::{EngineConfig, EngineStats, Location};
use log::{debug, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

pub struct TransitionEngine {
    config: EngineConfig,
    registry: Arc<RwLock<PortalRegistry>>,
    sessions: HashMap<String, PlayerSession>,
    collab: Collaborators,
    moves_handled: u64,
    teleports_completed: u64,
}

impl TransitionEngine {
    pub fn new(
        config: EngineConfig,
        registry: Arc<RwLock<PortalRegistry>>,
        collab: Collaborators,
    ) -> Self {
        Self {
            config,
            registry,
            sessions: HashMap::new(),
            collab,
            moves_handled: 0,
            teleports_completed: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------------

    /// Seed a session at join time so the first real movement sample already
    /// has a staleness baseline.
    pub fn handle_join(&mut self, player: &str, location: &Location) {
        let mut session = PlayerSession::new(player);
        session.observe_location(location);
        self.sessions.insert(player.to_string(), session);
    }

    /// Drop the player's session. Returns true when one existed.
    pub fn handle_quit(&mut self, player: &str) -> bool {
        self.sessions.remove(player).is_some()
    }

    pub fn session(&self, player: &str) -> Option<&PlayerSession> {
        self.sessions.get(player)
    }

    /// Portal the player currently stands in, resolved by name through the
    /// registry. Names of portals unregistered in the meantime resolve to
    /// `None` without fault.
    pub fn standing_in(&self, player: &str) -> Option<Arc<Portal>> {
        let name = self.sessions.get(player)?.current_portal()?;
        self.registry.read().get(name)
    }

    pub fn set_inspecting(&mut self, player: &str, inspecting: bool) {
        self.sessions
            .entry(player.to_string())
            .or_insert_with(|| PlayerSession::new(player))
            .set_inspecting(inspecting);
    }

    // -----------------------------------------------------------------------
    // Config & stats
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    pub fn registry(&self) -> Arc<RwLock<PortalRegistry>> {
        self.registry.clone()
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            registered_portals: self.registry.read().len(),
            active_sessions: self.sessions.len(),
            moves_handled: self.moves_handled,
            teleports_completed: self.teleports_completed,
        }
    }

    // -----------------------------------------------------------------------
    // Movement entry point
    // -----------------------------------------------------------------------

    /// Handle one movement sample against the wall clock.
    pub fn handle_move(&mut self, player: &str, to: &Location) -> MoveOutcome {
        self.handle_move_at(player, to, Instant::now())
    }

    /// Handle one movement sample with an explicit clock reading.
    pub fn handle_move_at(&mut self, player: &str, to: &Location, now: Instant) -> MoveOutcome {
        self.moves_handled += 1;

        let session = self
            .sessions
            .entry(player.to_string())
            .or_insert_with(|| PlayerSession::new(player));

        // Orientation-only samples never trigger the pipeline.
        if session.observe_location(to) {
            return MoveOutcome::Stale;
        }

        let portal = self.registry.read().portal_at(to);
        session.set_current_portal(portal.as_ref().map(|p| p.name.clone()));
        let Some(portal) = portal else {
            return MoveOutcome::Outside;
        };

        if session.is_inspecting() {
            return MoveOutcome::Inspecting;
        }

        // -- a. animation gate ------------------------------------------------
        if self.config.animation_mode && !portal.legacy {
            debug!(
                "Portal '{}' is animated; leaving it to the animation subsystem",
                portal.name
            );
            return MoveOutcome::Skipped(SkipReason::HandledByAnimation);
        }

        // -- b. destination resolution ---------------------------------------
        if portal.destination.is_invalid() {
            debug!("Portal '{}' has an invalid destination", portal.name);
            return MoveOutcome::Skipped(SkipReason::InvalidDestination);
        }
        let Some(destination) = self.collab.resolver.resolve(&portal.destination, player) else {
            debug!(
                "Unable to resolve destination of portal '{}' for '{}'",
                portal.name, player
            );
            return MoveOutcome::Skipped(SkipReason::UnresolvedDestination);
        };

        // -- c. world management ----------------------------------------------
        if !self.collab.worlds.is_managed(&destination.world) {
            debug!(
                "Destination world '{}' of portal '{}' is not managed",
                destination.world, portal.name
            );
            return MoveOutcome::Skipped(SkipReason::UnmanagedWorld);
        }

        // -- d. frame re-check ------------------------------------------------
        if !self.collab.frames.is_frame_intact(&portal, to) {
            debug!(
                "Frame of portal '{}' no longer matches '{}'",
                portal.name, portal.frame_material
            );
            return MoveOutcome::Skipped(SkipReason::BrokenFrame);
        }

        // -- e. script handoff ------------------------------------------------
        if let Some(script) = portal.handler_script.as_deref() {
            match self.collab.scripts.as_deref() {
                Some(host) => {
                    match host.run_portal_script(player, &portal.destination, &portal) {
                        ScriptOutcome::Handled => {
                            debug!(
                                "Script '{}' handled transition of '{}' through '{}'",
                                script, player, portal.name
                            );
                            return MoveOutcome::ScriptHandled;
                        }
                        ScriptOutcome::NotHandled => {}
                    }
                }
                None => {
                    warn!(
                        "No script host installed; portal '{}' falls back to default handling",
                        portal.name
                    );
                }
            }
        }

        // -- f. cooldown -------------------------------------------------------
        if let Some(remaining) = session.cooldown_remaining(portal.cooldown, now) {
            let message = self.config.notify_cooldown.then(|| {
                format!(
                    "You must wait {}s before using another portal.",
                    remaining.as_secs().max(1)
                )
            });
            return MoveOutcome::Denied(Denial {
                reason: DenialReason::Cooldown { remaining },
                message,
            });
        }

        // -- g. access ---------------------------------------------------------
        if self.config.enforce_access
            && !self
                .collab
                .permissions
                .has_permission(player, &portal.permission, true)
        {
            return MoveOutcome::Denied(Denial {
                reason: DenialReason::AccessDenied,
                message: Some(format!(
                    "You do not have permission to enter the {} portal.",
                    portal.name
                )),
            });
        }

        // -- h. toll -----------------------------------------------------------
        let currency = portal.currency.as_deref();
        let charging = !portal.is_free()
            && !self
                .collab
                .permissions
                .has_permission(player, &portal.exempt_permission, false);
        if charging
            && portal.price > 0.0
            && !self
                .collab
                .economist
                .is_wealthy_enough(player, portal.price, currency)
        {
            let text = format!(
                "You need {} to enter the {} portal.",
                self.collab.economist.format_price(portal.price, currency),
                portal.name
            );
            return MoveOutcome::Denied(Denial {
                reason: DenialReason::InsufficientFunds,
                message: Some(self.collab.economist.insufficient_funds_message(currency, &text)),
            });
        }

        // -- i. third-party veto ----------------------------------------------
        let mut event = TransitionEvent::new(player, &portal.name, destination.clone());
        self.collab.events.publish(&mut event);
        if event.is_cancelled() {
            debug!(
                "Transition of '{}' through '{}' vetoed by an observer",
                player, portal.name
            );
            return MoveOutcome::Vetoed;
        }

        // -- j. settlement -----------------------------------------------------
        let notice = if charging {
            if portal.price < 0.0 {
                self.collab.economist.deposit(player, -portal.price, currency);
                Some(format!(
                    "You have earned {} for using {}.",
                    self.collab.economist.format_price(-portal.price, currency),
                    portal.name
                ))
            } else {
                self.collab.economist.withdraw(player, portal.price, currency);
                Some(format!(
                    "You have been charged {} for using {}.",
                    self.collab.economist.format_price(portal.price, currency),
                    portal.name
                ))
            }
        } else {
            None
        };

        // -- k. teleport -------------------------------------------------------
        self.collab.teleporter.reset_fall_state(player);
        self.collab.teleporter.teleport(player, &destination);
        session.record_transition(&portal.name, now);
        self.teleports_completed += 1;
        debug!(
            "Teleported '{}' through portal '{}' to {}",
            player, portal.name, destination
        );

        MoveOutcome::Teleported {
            destination,
            notice,
        }
    }
}
