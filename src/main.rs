//! Quantum Armada headless driver
//!
//! Runs the simulation with the scripted autopilot at the helm and prints
//! the final snapshot as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use quantum_armada::autopilot::Autopilot;
use quantum_armada::consts::FPS;
use quantum_armada::sim::{FrameClock, GameEvent, GameState, InputEvent, Snapshot, tick};
use quantum_armada::{BellPairOracle, Tuning};

#[derive(Parser, Debug)]
#[command(name = "quantum-armada")]
#[command(about = "Naval combat on a rolling sea, hunted with a quantum radar")]
struct Cli {
    /// JSON file overriding the default tuning
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// World seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many simulated seconds
    #[arg(long, default_value_t = 180.0)]
    seconds: f64,
    /// Step at a fixed dt without sleeping instead of pacing to the wall clock
    #[arg(long)]
    fast: bool,
    /// Pretty-print the final snapshot
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Quantum Armada starting (seed {seed:#018x})");

    let mut state = GameState::new(tuning, seed).context("building initial game state")?;
    let mut oracle = BellPairOracle::new(seed.rotate_left(32));
    let mut pilot = Autopilot::new(&state.tuning);
    let mut clock = FrameClock::new(FPS);
    let fixed_dt = clock.frame_dt();

    let mut snapshot = Snapshot::capture(&state);
    let mut last_report = 0.0;
    loop {
        let mut input = pilot.next_input(&snapshot);
        if should_stop(&state, cli.seconds) {
            input.events.push(InputEvent::Quit);
        }

        let dt = if cli.fast { fixed_dt } else { clock.tick() };
        let outcome = tick(&mut state, &input, dt, &mut oracle)
            .with_context(|| format!("tick {} failed", state.ticks))?;

        for event in &outcome.events {
            match event {
                GameEvent::ScanCompleted {
                    correlation,
                    detected,
                } => {
                    log::info!("Scan: correlation {correlation:.3}, {detected} contacts")
                }
                GameEvent::BotSunk { ship } => log::info!("Ship {ship} sunk"),
                other => log::trace!("{other:?}"),
            }
        }

        if outcome.quit_requested {
            break;
        }
        snapshot = Snapshot::capture(&state);

        if state.time - last_report >= 10.0 {
            last_report = state.time;
            log::info!(
                "t={:.0}s health={} destroyed={} remaining={}",
                state.time,
                state.player_health,
                state.targets_destroyed,
                state.alive_bots()
            );
        }
    }

    let outcome = if state.victory {
        "victory"
    } else if state.player_health == 0 {
        "sunk"
    } else {
        "time limit"
    };
    log::info!(
        "Finished after {:.1}s ({} ticks): {outcome}",
        state.time,
        state.ticks
    );

    let snapshot = Snapshot::capture(&state);
    let json = if cli.pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    }
    .context("serializing final snapshot")?;
    println!("{json}");
    Ok(())
}

/// The run ends on victory, when the player is sunk or when time is up
fn should_stop(state: &GameState, limit: f64) -> bool {
    state.victory || state.player_health == 0 || state.time >= limit
}
