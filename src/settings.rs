//! Tuning constants
//!
//! Every gameplay number the engine reads lives here. Defaults come from
//! `consts`; an optional JSON file may override them once at startup. The
//! values are validated before a `GameState` is built and never change while
//! the simulation runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_speed: f32,
    pub player_max_health: i32,
    pub player_damage: i32,
    pub cannon_speed: f32,

    // === Radar ===
    pub radar_range: f32,
    pub scan_duration: f64,
    pub scan_cooldown: f64,
    pub pulse_speed: f32,
    pub detection_threshold: f32,
    pub oracle_reflection_coeff: f32,
    pub oracle_noise_factor: f32,
    pub oracle_shots: u32,

    // === Fleet ===
    pub num_bots: usize,
    pub bot_area_limit: f32,
    pub enemy_fire_interval: f64,
    pub enemy_fire_chance: f32,
    pub enemy_cannon_speed: f32,

    // === World ===
    pub gravity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            player_damage: PLAYER_DAMAGE,
            cannon_speed: CANNON_SPEED,

            radar_range: RADAR_RANGE,
            scan_duration: SCAN_DURATION,
            scan_cooldown: SCAN_COOLDOWN,
            pulse_speed: PULSE_SPEED,
            detection_threshold: DETECTION_THRESHOLD,
            oracle_reflection_coeff: ORACLE_REFLECTION_COEFF,
            oracle_noise_factor: ORACLE_NOISE_FACTOR,
            oracle_shots: ORACLE_SHOTS,

            num_bots: NUM_BOTS,
            bot_area_limit: BOT_AREA_LIMIT,
            enemy_fire_interval: ENEMY_FIRE_INTERVAL,
            enemy_fire_chance: ENEMY_FIRE_CHANCE,
            enemy_cannon_speed: ENEMY_CANNON_SPEED,

            gravity: GRAVITY,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn unit(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}

impl Tuning {
    /// Reject tuning that would make the simulation meaningless.
    ///
    /// NaN fails every check, since no comparison against it holds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("player_speed", self.player_speed as f64)?;
        positive("player_max_health", self.player_max_health as f64)?;
        non_negative("player_damage", self.player_damage as f64)?;
        positive("cannon_speed", self.cannon_speed as f64)?;

        positive("radar_range", self.radar_range as f64)?;
        positive("scan_duration", self.scan_duration)?;
        non_negative("scan_cooldown", self.scan_cooldown)?;
        positive("pulse_speed", self.pulse_speed as f64)?;
        unit("detection_threshold", self.detection_threshold as f64)?;
        unit("oracle_reflection_coeff", self.oracle_reflection_coeff as f64)?;
        unit("oracle_noise_factor", self.oracle_noise_factor as f64)?;
        positive("oracle_shots", self.oracle_shots as f64)?;

        positive("num_bots", self.num_bots as f64)?;
        positive("bot_area_limit", self.bot_area_limit as f64)?;
        non_negative("enemy_fire_interval", self.enemy_fire_interval)?;
        unit("enemy_fire_chance", self.enemy_fire_chance as f64)?;
        positive("enemy_cannon_speed", self.enemy_cannon_speed as f64)?;

        non_negative("gravity", self.gravity as f64)?;
        Ok(())
    }

    /// Parse and validate a JSON override. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a JSON override from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}
