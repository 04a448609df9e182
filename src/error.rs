//! Error types for the simulation engine
//!
//! Clamping health or fade values is policy, not an error, and hitting an
//! already-dead ship is a silent no-op. Only startup configuration and the
//! probability oracle can fail.

use thiserror::Error;

use crate::sim::GameEvent;

/// Invalid tuning detected at startup.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },

    #[error("failed to read tuning file {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse tuning: {0}")]
    Parse(String),
}

/// Failure reported by (or detected on) a probability oracle call.
#[derive(Debug, Error, PartialEq)]
pub enum OracleError {
    #[error("invalid oracle parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("oracle returned {0}, outside [0, 1]")]
    OutOfRange(f32),

    #[error("oracle unavailable: {0}")]
    Unavailable(String),
}

/// Errors that abort a simulation tick.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("radar scan failed: {0}")]
    Oracle(#[from] OracleError),
}

/// A tick that stopped early.
///
/// Everything before the failing step is already applied to the state;
/// `events` reports what those steps did.
#[derive(Debug, Error, PartialEq)]
#[error("tick at t={time:.2}s aborted: {source}")]
pub struct TickError {
    /// Simulation time the tick started at
    pub time: f64,
    /// Events produced before the failure
    pub events: Vec<GameEvent>,
    #[source]
    pub source: SimError,
}
