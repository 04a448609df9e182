//! Game state and core simulation types
//!
//! `GameState` exclusively owns every entity collection. Ships are never
//! removed from `ships`, only flagged dead, so indices stay valid for the
//! whole run. Shots and effects are compacted once they finish.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::EffectLayers;
use super::radar::RadarState;
use crate::error::ConfigError;
use crate::settings::Tuning;

/// Index of the player in `GameState::ships`
pub const PLAYER_INDEX: usize = 0;

/// A ship (the player or a bot)
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub pos: Vec3,
    /// Internal velocity units; scaled to world units by the integrator
    pub vel: Vec3,
    pub is_player: bool,
    pub alive: bool,
    /// Bots are hidden until a scan reveals them
    pub visible: bool,
    /// Simulation time of the last shot (`None` = never fired)
    pub last_fire_time: Option<f64>,
}

impl Ship {
    pub fn player(pos: Vec3) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            is_player: true,
            alive: true,
            visible: true,
            last_fire_time: None,
        }
    }

    pub fn bot(pos: Vec3, vel: Vec3) -> Self {
        Self {
            pos,
            vel,
            is_player: false,
            alive: true,
            visible: false,
            last_fire_time: None,
        }
    }

    /// Whether a renderer should draw this ship (death overrides visibility)
    pub fn is_drawn(&self) -> bool {
        self.alive && (self.is_player || self.visible)
    }
}

/// A cannon shot in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Cannonball {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Fired by a bot (damages the player) rather than by the player
    pub is_enemy: bool,
    /// Cleared when the shot hits, lands or leaves the world
    pub active: bool,
}

impl Cannonball {
    pub fn new(pos: Vec3, direction: Vec3, speed: f32, is_enemy: bool) -> Self {
        Self {
            pos,
            vel: direction * speed,
            is_enemy,
            active: true,
        }
    }
}

/// Something notable that happened during a tick
///
/// `ship` fields index into `GameState::ships`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerFired,
    BotFired { ship: usize },
    BotSunk { ship: usize },
    PlayerHit { health: i32 },
    Splash { pos: Vec3 },
    ScanRejected { remaining: f64 },
    ScanCompleted { correlation: f32, detected: u32 },
    RadarExpired,
    Victory,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated tuning, fixed for the life of the state
    pub tuning: Tuning,
    /// Simulation clock (seconds since start)
    pub time: f64,
    /// Tick counter
    pub ticks: u64,
    /// Player first, then bots in spawn order
    pub ships: Vec<Ship>,
    pub cannonballs: Vec<Cannonball>,
    pub effects: EffectLayers,
    pub radar: RadarState,
    pub targets_destroyed: u32,
    pub player_health: i32,
    /// Set once every bot is sunk; never cleared
    pub victory: bool,
    pub rng: Pcg32,
}

impl GameState {
    /// Build the world: player at the origin plus the bot grid.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ships = Vec::with_capacity(tuning.num_bots + 1);
        ships.push(Ship::player(Vec3::ZERO));
        for pos in bot_grid(tuning.num_bots, tuning.bot_area_limit) {
            let speed: f32 = rng.random_range(0.3..=0.7);
            let vel = Vec3::new(
                rng.random_range(-1.0..=1.0),
                0.0,
                rng.random_range(-1.0..=1.0),
            ) * speed;
            ships.push(Ship::bot(pos, vel));
        }
        log::info!("Spawned {} bots (seed {})", ships.len() - 1, seed);

        Ok(Self {
            player_health: tuning.player_max_health,
            tuning,
            time: 0.0,
            ticks: 0,
            ships,
            cannonballs: Vec::with_capacity(64),
            effects: EffectLayers::default(),
            radar: RadarState::default(),
            targets_destroyed: 0,
            victory: false,
            rng,
        })
    }

    pub fn player(&self) -> &Ship {
        &self.ships[PLAYER_INDEX]
    }

    pub fn player_mut(&mut self) -> &mut Ship {
        &mut self.ships[PLAYER_INDEX]
    }

    pub fn bots(&self) -> &[Ship] {
        &self.ships[PLAYER_INDEX + 1..]
    }

    pub fn bots_mut(&mut self) -> &mut [Ship] {
        &mut self.ships[PLAYER_INDEX + 1..]
    }

    /// Bots still afloat
    pub fn alive_bots(&self) -> usize {
        self.bots().iter().filter(|b| b.alive).count()
    }

    /// Time at which the sea is sampled for this tick
    pub fn wave_time(&self) -> f64 {
        self.time * crate::consts::WAVE_TIME_SCALE
    }

    /// Spend `damage` from the player's health, clamped at zero
    pub fn damage_player(&mut self, damage: i32) -> i32 {
        self.player_health = (self.player_health - damage).clamp(0, self.tuning.player_max_health);
        self.player_health
    }
}

/// Bot spawn positions on a square grid north of the player.
///
/// The grid is `ceil(sqrt(count))` wide; the final row is left short when
/// `count` is not a perfect square.
pub fn bot_grid(count: usize, area_limit: f32) -> Vec<Vec3> {
    let grid = (count as f32).sqrt().ceil().max(1.0) as usize;
    let spacing = (area_limit * 2.0 / grid as f32) * 2.0;

    let mut positions = Vec::with_capacity(count);
    'rows: for i in 0..grid {
        for j in 0..grid {
            if positions.len() >= count {
                break 'rows;
            }
            let x = -area_limit + i as f32 * spacing + spacing / 2.0;
            let z = -area_limit / 2.0 + j as f32 * spacing + spacing / 2.0 + 150.0;
            positions.push(Vec3::new(x, 0.0, z));
        }
    }
    positions
}
