//! Quantum Armada - naval combat on a procedurally animated ocean
//!
//! Core modules:
//! - `sim`: Simulation engine (wave field, ships, shots, effects, radar)
//! - `oracle`: Probability oracle consumed by the radar
//! - `autopilot`: Scripted input source for headless runs
//! - `camera`: Follow camera used to turn screen clicks into aim vectors
//! - `settings`: Tuning constants with startup validation
//! - `error`: Error taxonomy shared by the engine and the driver

pub mod autopilot;
pub mod camera;
pub mod error;
pub mod oracle;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, OracleError, SimError, TickError};
pub use oracle::{BellPairOracle, ProbabilityOracle};
pub use settings::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the simulation loop
    pub const FPS: u32 = 60;
    /// Largest dt a single tick will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player movement per tick per held direction (world units)
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_DAMAGE: i32 = 5;

    /// Radar reveal radius around the player
    pub const RADAR_RANGE: f32 = 400.0;
    /// Seconds a scan keeps bots revealed
    pub const SCAN_DURATION: f64 = 6.0;
    /// Minimum seconds between two accepted scans
    pub const SCAN_COOLDOWN: f64 = 4.0;
    /// Radar pulse ring growth per tick
    pub const PULSE_SPEED: f32 = 8.0;
    /// Correlation above which a scan reveals bots
    pub const DETECTION_THRESHOLD: f32 = 0.55;

    /// Oracle call parameters
    pub const ORACLE_REFLECTION_COEFF: f32 = 0.8;
    pub const ORACLE_NOISE_FACTOR: f32 = 0.05;
    pub const ORACLE_SHOTS: u32 = 512;

    pub const NUM_BOTS: usize = 10;
    /// Half-width of the square bots bounce inside
    pub const BOT_AREA_LIMIT: f32 = 250.0;
    /// Ship velocity units to world units
    pub const SHIP_VELOCITY_SCALE: f32 = 30.0;
    /// Rendered hull height above the local sea surface
    pub const SHIP_FLOAT_OFFSET: f32 = 5.0;

    /// Cannon muzzle speeds
    pub const CANNON_SPEED: f32 = 90.0;
    pub const ENEMY_CANNON_SPEED: f32 = 70.0;
    /// Minimum vertical component of a player's aim (before renormalizing)
    pub const PLAYER_MIN_AIM_Y: f32 = 0.2;
    /// Bots never aim below this vertical offset
    pub const ENEMY_MIN_AIM_Y: f32 = 5.0;
    /// Per-axis aim jitter applied by bots
    pub const ENEMY_AIM_JITTER: f32 = 30.0;
    pub const ENEMY_FIRE_INTERVAL: f64 = 3.0;
    pub const ENEMY_FIRE_CHANCE: f32 = 0.4;
    /// Shots leave the deck this far above the hull
    pub const MUZZLE_HEIGHT: f32 = 10.0;

    pub const GRAVITY: f32 = 9.8;
    /// Gravity multiplier giving a playable arc at the fixed muzzle speeds
    pub const GRAVITY_SCALE: f32 = 5.0;

    /// Hit radius of a player shot against a bot
    pub const BOT_HIT_RADIUS: f32 = 30.0;
    /// Hit radius of an enemy shot against the player
    pub const PLAYER_HIT_RADIUS: f32 = 40.0;
    /// A shot splashes once it is this close above the sea surface
    pub const SEA_CONTACT_MARGIN: f32 = 1.0;
    /// Splash rings sit this far above the sea surface
    pub const SPLASH_HEIGHT: f32 = 2.0;

    /// Hard despawn bounds for shots
    pub const SHOT_MIN_Y: f32 = -100.0;
    pub const SHOT_MAX_HORIZONTAL: f32 = 1500.0;

    /// The sea animates at this multiple of simulation time
    pub const WAVE_TIME_SCALE: f64 = 2.0;
}

/// Straight-line distance between two points
#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    (a - b).length()
}

