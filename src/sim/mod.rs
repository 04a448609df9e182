//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws, polls
//! devices or touches the network:
//! - Explicitly owned `GameState`, passed into every subsystem
//! - Fixed per-tick step order (see `tick`)
//! - Ships are soft-deleted; shots and effects are compacted
//! - The radar's oracle is the only external call, made synchronously

pub mod ai;
pub mod clock;
pub mod collision;
pub mod effects;
pub mod physics;
pub mod radar;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use clock::FrameClock;
pub use effects::{EffectKind, EffectLayers, SpawnMark, VisualEffect};
pub use radar::{RadarState, ScanOutcome, trigger_scan};
pub use snapshot::{Hud, Snapshot};
pub use state::{Cannonball, GameEvent, GameState, PLAYER_INDEX, Ship};
pub use tick::{HeldDirections, InputEvent, TickInput, TickOutcome, tick};
pub use wave::{wave_height, wave_normal, wave_normal_or_up};
