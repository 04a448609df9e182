//! Simulation tick
//!
//! One call advances the world by one frame. The step order is fixed:
//! input, player movement, radar expiry, bots, shots, collisions, effect
//! aging, victory check. A later step may see state an earlier step changed
//! this tick, never the other way round.

use glam::Vec3;

use super::ai::run_bot_ai;
use super::collision::resolve_collisions;
use super::physics::{integrate_bots, integrate_cannonballs, move_player};
use super::radar::{ScanOutcome, trigger_scan, update_radar};
use super::state::{Cannonball, GameEvent, GameState};
use crate::consts::*;
use crate::error::TickError;
use crate::oracle::ProbabilityOracle;

/// Movement keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

/// Discrete input events, consumed in order at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Fire along a world-space direction (see `Camera::screen_ray`)
    Fire { direction: Vec3 },
    TriggerScan,
    Quit,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
    pub held: HeldDirections,
}

/// What a tick produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
    /// A quit event was received; the tick stopped after input handling
    pub quit_requested: bool,
}

/// Clamp a player's aim so shots always leave with some lift.
pub fn player_aim(direction: Vec3) -> Vec3 {
    let mut dir = direction.normalize_or(Vec3::NEG_Z);
    dir.y = dir.y.max(PLAYER_MIN_AIM_Y);
    dir.normalize_or(Vec3::Y)
}

/// Launch a player shot from just above the deck
pub fn fire_player_cannon(state: &mut GameState, direction: Vec3) {
    let origin = state.player().pos + Vec3::Y * MUZZLE_HEIGHT;
    let shot = Cannonball::new(origin, player_aim(direction), state.tuning.cannon_speed, false);
    state.cannonballs.push(shot);
}

/// Advance the game state by one frame.
///
/// Returns the events the frame produced. An oracle failure during a scan
/// aborts the rest of the tick: input handled before the scan (shots fired,
/// earlier scans) stays applied and its events travel in the `TickError`;
/// the clock does not advance and effects do not age.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    oracle: &mut dyn ProbabilityOracle,
) -> Result<TickOutcome, TickError> {
    let now = state.time;
    let spawn_mark = state.effects.mark();
    let mut outcome = TickOutcome::default();
    let events = &mut outcome.events;

    // 1. Input events. After victory only quit is honoured.
    for event in &input.events {
        match *event {
            InputEvent::Quit => {
                log::info!("Quit requested at t={:.2}s", now);
                outcome.quit_requested = true;
                return Ok(outcome);
            }
            _ if state.victory => {}
            InputEvent::Fire { direction } => {
                fire_player_cannon(state, direction);
                events.push(GameEvent::PlayerFired);
            }
            InputEvent::TriggerScan => {
                let scan = trigger_scan(state, now, oracle).map_err(|source| TickError {
                    time: now,
                    events: std::mem::take(events),
                    source,
                })?;
                match scan {
                    ScanOutcome::Rejected { remaining } => {
                        events.push(GameEvent::ScanRejected { remaining })
                    }
                    ScanOutcome::Completed {
                        correlation,
                        detected,
                    } => events.push(GameEvent::ScanCompleted {
                        correlation,
                        detected,
                    }),
                }
            }
        }
    }

    // 2. Player movement
    if !state.victory {
        move_player(state, input.held);
    }

    // 3. Radar expiry
    update_radar(state, now, dt, events);

    // 4. Bots move, then decide whether to fire
    integrate_bots(state, dt);
    run_bot_ai(state, now, events);

    // 5. Shots in flight
    integrate_cannonballs(state, dt);

    // 6. Impacts
    resolve_collisions(state, events);

    // 7. Effects that predate this tick
    state.effects.age(spawn_mark);

    // 8. Victory (one-shot)
    if !state.victory && state.alive_bots() == 0 {
        state.victory = true;
        log::info!(
            "Victory! All enemies sunk after {:.1}s ({} destroyed)",
            now,
            state.targets_destroyed
        );
        events.push(GameEvent::Victory);
    }

    state.time += dt as f64;
    state.ticks += 1;
    Ok(outcome)
}
