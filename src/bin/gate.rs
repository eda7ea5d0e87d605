//! voxgate-sim binary
//!
//! Drives the transition engine with synthetic movement samples: one player
//! walks through a configured portal twice, demonstrating the full
//! eligibility pipeline (toll, veto point, cooldown) with stub collaborators.
//!
//! ## Configuration (env / TOML via `config` crate)
//!
//! | Key                      | Default     | Description                       |
//! |--------------------------|-------------|-----------------------------------|
//! | `VOXGATE_PRICE`          | `10.0`      | Portal toll (negative = payout)   |
//! | `VOXGATE_BALANCE`        | `25.0`      | Starting player balance           |
//! | `VOXGATE_COOLDOWN_SECS`  | `5`         | Portal cooldown in seconds        |
//! | `VOXGATE_ENFORCE_ACCESS` | `true`      | Enforce the access permission     |

use anyhow::Result;
use clap::Parser;
use parking_lot::{Mutex, RwLock};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use voxgate::{
    BlockCoord, Collaborators, Destination, DestinationResolver, Economist, EngineConfig, EventBus,
    FrameValidator, Location, PermissionService, Portal, PortalRegion, PortalRegistry, ScriptHost,
    TeleportExecutor, TransitionEngine, TransitionEvent, WorldManager,
};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "voxgate-sim", about = "Voxgate Portal Engine harness", version)]
struct Args {
    /// Optional TOML settings file (layered under VOXGATE_* env overrides)
    #[arg(long, env = "VOXGATE_CONFIG", default_value = "voxgate")]
    config: String,

    /// Player name used for the walk
    #[arg(long, env = "VOXGATE_PLAYER", default_value = "alice")]
    player: String,
}

#[derive(Debug, Deserialize)]
struct SimSettings {
    price: f64,
    balance: f64,
    cooldown_secs: u64,
    enforce_access: bool,
}

fn load_settings(name: &str) -> Result<SimSettings> {
    let settings = config::Config::builder()
        .set_default("price", 10.0)?
        .set_default("balance", 25.0)?
        .set_default("cooldown_secs", 5_i64)?
        .set_default("enforce_access", true)?
        .add_source(config::File::with_name(name).required(false))
        .add_source(config::Environment::with_prefix("VOXGATE"))
        .build()?;
    Ok(settings.try_deserialize()?)
}

// ---------------------------------------------------------------------------
// Stub collaborators
// ---------------------------------------------------------------------------

struct SimResolver;

impl DestinationResolver for SimResolver {
    fn resolve(&self, destination: &Destination, _player: &str) -> Option<Location> {
        match destination {
            Destination::Invalid => None,
            Destination::Anchor { name } => {
                // Single well-known anchor in the demo world.
                (name == "spawn").then(|| Location::new("overworld", 0.5, 64.0, 0.5))
            }
            Destination::Position { world, x, y, z } => Some(Location::new(world, *x, *y, *z)),
        }
    }
}

struct SimWorlds;

impl WorldManager for SimWorlds {
    fn is_managed(&self, world: &str) -> bool {
        matches!(world, "overworld" | "hub")
    }
}

struct SimPermissions;

impl PermissionService for SimPermissions {
    fn has_permission(&self, _player: &str, _node: &str, default_if_unset: bool) -> bool {
        // Nothing is explicitly set in the demo; defaults decide.
        default_if_unset
    }
}

struct SimEconomist {
    balances: Mutex<HashMap<String, f64>>,
}

impl Economist for SimEconomist {
    fn is_wealthy_enough(&self, player: &str, amount: f64, _currency: Option<&str>) -> bool {
        self.balances.lock().get(player).copied().unwrap_or(0.0) >= amount
    }

    fn withdraw(&self, player: &str, amount: f64, _currency: Option<&str>) {
        *self.balances.lock().entry(player.to_string()).or_insert(0.0) -= amount;
    }

    fn deposit(&self, player: &str, amount: f64, _currency: Option<&str>) {
        *self.balances.lock().entry(player.to_string()).or_insert(0.0) += amount;
    }

    fn format_price(&self, amount: f64, currency: Option<&str>) -> String {
        match currency {
            Some(item) => format!("{amount} {item}"),
            None => format!("${amount:.2}"),
        }
    }

    fn insufficient_funds_message(&self, _currency: Option<&str>, text: &str) -> String {
        format!("[Economy] {text}")
    }
}

struct SimFrames;

impl FrameValidator for SimFrames {
    fn is_frame_intact(&self, _portal: &Portal, _at: &Location) -> bool {
        true
    }
}

struct SimTeleporter;

impl TeleportExecutor for SimTeleporter {
    fn teleport(&self, player: &str, to: &Location) {
        log::info!("*** teleporting '{}' to {}", player, to);
    }
}

struct SimBus;

impl EventBus for SimBus {
    fn publish(&self, _event: &mut TransitionEvent) {
        // No third-party observers in the harness.
    }
}

struct SimScripts;

impl ScriptHost for SimScripts {
    fn run_portal_script(
        &self,
        _player: &str,
        _destination: &Destination,
        _portal: &Portal,
    ) -> voxgate::ScriptOutcome {
        voxgate::ScriptOutcome::NotHandled
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // Initialise logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("voxgate=debug".parse()?),
        )
        .init();

    let args = Args::parse();
    let settings = load_settings(&args.config)?;

    log::info!(
        "Starting voxgate-sim (player='{}', price={}, balance={}, cooldown={}s)",
        args.player,
        settings.price,
        settings.balance,
        settings.cooldown_secs,
    );

    // One portal spanning x 10..=12 at the walk height.
    let mut registry = PortalRegistry::new();
    registry.register(
        Portal::new(
            "east_gate",
            PortalRegion::new(
                "overworld",
                BlockCoord::new(10, 64, 0),
                BlockCoord::new(12, 66, 0),
            ),
            Destination::Position {
                world: "hub".into(),
                x: 100.5,
                y: 64.0,
                z: 100.5,
            },
        )
        .with_frame_material("obsidian")
        .with_price(settings.price, None)
        .with_cooldown(Duration::from_secs(settings.cooldown_secs)),
    )?;
    let registry = Arc::new(RwLock::new(registry));

    let mut balances = HashMap::new();
    balances.insert(args.player.clone(), settings.balance);

    let collab = Collaborators {
        resolver: Box::new(SimResolver),
        worlds: Box::new(SimWorlds),
        permissions: Box::new(SimPermissions),
        economist: Box::new(SimEconomist {
            balances: Mutex::new(balances),
        }),
        frames: Box::new(SimFrames),
        scripts: Some(Box::new(SimScripts)),
        teleporter: Box::new(SimTeleporter),
        events: Box::new(SimBus),
    };

    let engine_config = EngineConfig {
        enforce_access: settings.enforce_access,
        ..Default::default()
    };
    let mut engine = TransitionEngine::new(engine_config, registry, collab);

    // Walk east along x, straight through the portal, then try to re-enter
    // immediately – the second entry lands in the cooldown window.
    engine.handle_join(&args.player, &Location::new("overworld", 0.5, 64.0, 0.5));
    for step in 1..=14 {
        let sample = Location::new("overworld", step as f64 + 0.5, 64.0, 0.5);
        let outcome = engine.handle_move(&args.player, &sample);
        log::info!("step {:>2} at {} -> {:?}", step, sample, outcome);
    }

    let stats = engine.stats();
    log::info!(
        "Done: {} moves handled, {} teleports, {} portals, {} sessions",
        stats.moves_handled,
        stats.teleports_completed,
        stats.registered_portals,
        stats.active_sessions,
    );
    Ok(())
}
