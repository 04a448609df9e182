//! Radar scan state machine
//!
//! `idle -> active` only on an explicit trigger that has cleared the
//! cooldown. `active -> idle` happens automatically once the scan duration
//! has elapsed, hiding every bot again.

use super::effects::VisualEffect;
use super::state::{GameEvent, GameState};
use crate::distance;
use crate::error::{OracleError, SimError};
use crate::oracle::ProbabilityOracle;

/// HUD fade-in rate while a scan is active (opacity per second)
const HUD_FADE_IN: f32 = 2.5;
/// HUD fade-out rate once idle
const HUD_FADE_OUT: f32 = 1.5;

/// Radar bookkeeping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadarState {
    /// Currently revealing (or hiding) bots
    pub active: bool,
    /// Time of the last accepted trigger (`None` = never scanned). Drives
    /// the cooldown, whether or not the oracle answered.
    pub last_scan_time: Option<f64>,
    /// Time of the last scan the oracle answered; the reveal window runs
    /// from here
    pub reveal_started: Option<f64>,
    /// Correlation of the last answered scan
    pub correlation: f32,
    /// Bots revealed by the last answered scan, cleared on expiry
    pub detected: u32,
    /// Radar HUD panel opacity in [0, 1]
    pub hud_opacity: f32,
}

/// Result of a trigger request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanOutcome {
    /// Still cooling down; `remaining` seconds left
    Rejected { remaining: f64 },
    /// Oracle queried. `detected` is zero when the scan was too noisy.
    Completed { correlation: f32, detected: u32 },
}

impl RadarState {
    /// Seconds until another scan may be triggered at `now`
    pub fn cooldown_remaining(&self, now: f64, cooldown: f64) -> f64 {
        match self.last_scan_time {
            Some(last) => (cooldown - (now - last)).max(0.0),
            None => 0.0,
        }
    }

    fn ready(&self, now: f64, cooldown: f64) -> bool {
        match self.last_scan_time {
            Some(last) => now - last > cooldown,
            None => true,
        }
    }
}

/// Handle a scan trigger at `now`.
///
/// On acceptance the trigger time is recorded, a pulse is spawned at the
/// player and the oracle is queried synchronously. Only an answered scan
/// activates the radar and restarts the reveal window. Oracle errors are
/// returned unchanged; the cooldown stays spent and any reveal already in
/// force keeps its original expiry.
pub fn trigger_scan(
    state: &mut GameState,
    now: f64,
    oracle: &mut dyn ProbabilityOracle,
) -> Result<ScanOutcome, SimError> {
    let cooldown = state.tuning.scan_cooldown;
    if !state.radar.ready(now, cooldown) {
        let remaining = state.radar.cooldown_remaining(now, cooldown);
        log::warn!("Radar still cooling down ({:.1}s left)", remaining);
        return Ok(ScanOutcome::Rejected { remaining });
    }

    state.radar.last_scan_time = Some(now);
    let center = state.player().pos;
    state
        .effects
        .push(VisualEffect::radar_pulse(center, state.tuning.pulse_speed));

    let correlation = oracle
        .scan(
            state.tuning.oracle_noise_factor,
            state.tuning.oracle_reflection_coeff,
            state.tuning.oracle_shots,
        )
        .and_then(|c| {
            if c.is_finite() && (0.0..=1.0).contains(&c) {
                Ok(c)
            } else {
                Err(OracleError::OutOfRange(c))
            }
        })
        .inspect_err(|e| log::warn!("Radar scan failed: {}", e))?;

    state.radar.active = true;
    state.radar.reveal_started = Some(now);
    state.radar.correlation = correlation;
    let detected = apply_detection(state, correlation);
    state.radar.detected = detected;
    log::info!(
        "Radar scan: correlation {:.0}%, {} bots detected",
        correlation * 100.0,
        detected
    );
    Ok(ScanOutcome::Completed {
        correlation,
        detected,
    })
}

/// Reveal bots in range on a strong correlation, hide every bot otherwise.
///
/// Returns how many bots were revealed.
pub fn apply_detection(state: &mut GameState, correlation: f32) -> u32 {
    let range = state.tuning.radar_range;
    let center = state.player().pos;

    if correlation > state.tuning.detection_threshold {
        let mut detected = 0;
        for bot in state.bots_mut() {
            if bot.alive && distance(bot.pos, center) <= range {
                bot.visible = true;
                detected += 1;
            }
        }
        detected
    } else {
        for bot in state.bots_mut() {
            bot.visible = false;
        }
        0
    }
}

/// Expire an active scan and fade the HUD panel
pub fn update_radar(state: &mut GameState, now: f64, dt: f32, events: &mut Vec<GameEvent>) {
    if state.radar.active {
        let expired = state
            .radar
            .reveal_started
            .is_none_or(|last| now - last > state.tuning.scan_duration);
        if expired {
            state.radar.active = false;
            state.radar.detected = 0;
            for bot in state.bots_mut() {
                bot.visible = false;
            }
            log::debug!("Radar scan expired");
            events.push(GameEvent::RadarExpired);
        }
    }

    state.radar.hud_opacity = if state.radar.active {
        (state.radar.hud_opacity + dt * HUD_FADE_IN).min(1.0)
    } else {
        (state.radar.hud_opacity - dt * HUD_FADE_OUT).max(0.0)
    };
}
