//! Scripted captain for headless runs
//!
//! Plays from the snapshot alone, like a human looking at the screen:
//! pings the radar whenever it is idle, closes on the nearest revealed
//! ship and lobs shots at it.

use glam::Vec3;

use crate::consts::{GRAVITY_SCALE, MUZZLE_HEIGHT};
use crate::settings::Tuning;
use crate::sim::{HeldDirections, InputEvent, Snapshot, TickInput};

/// Seconds between autopilot broadsides
const RELOAD_SECONDS: f64 = 1.5;
/// Fraction of the flat-ground maximum range to engage from
const ENGAGE_FRACTION: f32 = 0.8;
/// Dead zone for steering, in world units
const STEER_TOLERANCE: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    cannon_speed: f32,
    effective_gravity: f32,
    last_shot: Option<f64>,
    /// Where the last target was seen before the radar went dark
    last_seen: Option<Vec3>,
}

impl Autopilot {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            cannon_speed: tuning.cannon_speed,
            effective_gravity: tuning.gravity * GRAVITY_SCALE,
            last_shot: None,
            last_seen: None,
        }
    }

    /// Flat-ground range of a 45 degree shot
    pub fn max_range(&self) -> f32 {
        self.cannon_speed * self.cannon_speed / self.effective_gravity
    }

    /// Launch direction that drops a shot `offset` away on the horizontal.
    ///
    /// Uses the low arc. Targets past maximum range get the 45 degree shot.
    pub fn ballistic_aim(&self, offset: Vec3) -> Vec3 {
        let flat = Vec3::new(offset.x, 0.0, offset.z);
        let distance = flat.length();
        let Some(heading) = flat.try_normalize() else {
            return Vec3::Y;
        };
        let ratio = (distance * self.effective_gravity / (self.cannon_speed * self.cannon_speed))
            .min(1.0);
        let elevation = 0.5 * ratio.asin();
        heading * elevation.cos() + Vec3::Y * elevation.sin()
    }

    /// Decide this frame's input from what is on screen
    pub fn next_input(&mut self, snap: &Snapshot) -> TickInput {
        let mut input = TickInput::default();
        if snap.victory {
            return input;
        }

        if !snap.hud.radar_active && snap.hud.scan_cooldown <= 0.0 {
            input.events.push(InputEvent::TriggerScan);
        }

        let Some(player) = snap.ships.iter().find(|s| s.is_player) else {
            return input;
        };
        let muzzle = Vec3::new(player.pos.x, MUZZLE_HEIGHT, player.pos.z);

        let nearest = snap
            .ships
            .iter()
            .filter(|s| !s.is_player)
            .map(|s| Vec3::new(s.pos.x, 0.0, s.pos.z))
            .min_by(|a, b| {
                a.distance_squared(muzzle)
                    .partial_cmp(&b.distance_squared(muzzle))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        if nearest.is_some() {
            self.last_seen = nearest;
        }
        let Some(target) = nearest.or(self.last_seen) else {
            return input;
        };

        let offset = target - muzzle;
        let horizontal = Vec3::new(offset.x, 0.0, offset.z).length();
        let engage_range = self.max_range() * ENGAGE_FRACTION;

        if horizontal > engage_range {
            input.held = steer_towards(offset);
        } else if nearest.is_none() {
            // Arrived where it was last seen; wait for the next scan
            self.last_seen = None;
        }

        let reloaded = self
            .last_shot
            .is_none_or(|last| snap.time - last >= RELOAD_SECONDS);
        if nearest.is_some() && horizontal <= self.max_range() && reloaded {
            input.events.push(InputEvent::Fire {
                direction: self.ballistic_aim(offset),
            });
            self.last_shot = Some(snap.time);
        }

        input
    }
}

fn steer_towards(offset: Vec3) -> HeldDirections {
    HeldDirections {
        forward: offset.z < -STEER_TOLERANCE,
        back: offset.z > STEER_TOLERANCE,
        left: offset.x < -STEER_TOLERANCE,
        right: offset.x > STEER_TOLERANCE,
    }
}
