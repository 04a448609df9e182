//! Read-only view of the world for renderers and HUDs
//!
//! Captured after a tick completes. Renderers draw from the snapshot and
//! never touch `GameState` directly.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::effects::EffectKind;
use super::state::GameState;
use super::wave::{wave_height, wave_normal_or_up};
use crate::consts::SHIP_FLOAT_OFFSET;

/// How strongly the sea slope tilts a hull
const TILT_FACTOR: f32 = 0.4;

/// A ship as it should be drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    /// Index into `GameState::ships`
    pub index: usize,
    pub is_player: bool,
    /// Position riding on the sea surface
    pub pos: Vec3,
    pub surface_normal: Vec3,
    /// Roll about the hull's long axis (radians)
    pub roll: f32,
    /// Pitch about the beam (radians)
    pub pitch: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotView {
    pub pos: Vec3,
    pub is_enemy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: EffectKind,
    pub pos: Vec3,
    pub radius: f32,
    pub alpha: f32,
}

/// HUD scalars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    pub detected: u32,
    pub destroyed: u32,
    pub alive: usize,
    /// Last scan correlation as a whole percentage
    pub correlation_percent: u32,
    pub radar_active: bool,
    pub radar_opacity: f32,
    /// Seconds until the radar can be triggered again
    pub scan_cooldown: f64,
}

/// Radar range ring drawn while a scan is active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarRing {
    pub center: Vec3,
    pub radius: f32,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: f64,
    pub ships: Vec<ShipView>,
    pub shots: Vec<ShotView>,
    pub effects: Vec<EffectView>,
    pub radar_ring: Option<RadarRing>,
    pub hud: Hud,
    pub victory: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let wave_time = state.wave_time();

        let ships = state
            .ships
            .iter()
            .enumerate()
            .filter(|(_, ship)| ship.is_drawn())
            .map(|(index, ship)| {
                let (x, z) = (ship.pos.x, ship.pos.z);
                let normal = wave_normal_or_up(x, z, wave_time);
                let y = wave_height(x, z, wave_time) + SHIP_FLOAT_OFFSET;
                ShipView {
                    index,
                    is_player: ship.is_player,
                    pos: Vec3::new(x, y, z),
                    surface_normal: normal,
                    roll: -(normal.x * TILT_FACTOR).asin(),
                    pitch: (normal.z * TILT_FACTOR).asin(),
                }
            })
            .collect();

        let shots = state
            .cannonballs
            .iter()
            .filter(|c| c.active)
            .map(|c| ShotView {
                pos: c.pos,
                is_enemy: c.is_enemy,
            })
            .collect();

        let effects = state
            .effects
            .iter()
            .map(|e| EffectView {
                kind: e.kind(),
                pos: e.position(),
                radius: e.radius(),
                alpha: e.alpha(),
            })
            .collect();

        let radar_ring = state.radar.active.then(|| RadarRing {
            center: state.player().pos,
            radius: state.tuning.radar_range,
        });

        let hud = Hud {
            health: state.player_health,
            max_health: state.tuning.player_max_health,
            detected: state.radar.detected,
            destroyed: state.targets_destroyed,
            alive: state.alive_bots(),
            correlation_percent: (state.radar.correlation.clamp(0.0, 1.0) * 100.0) as u32,
            radar_active: state.radar.active,
            radar_opacity: state.radar.hud_opacity,
            scan_cooldown: state
                .radar
                .cooldown_remaining(state.time, state.tuning.scan_cooldown),
        };

        Self {
            time: state.time,
            ships,
            shots,
            effects,
            radar_ring,
            hud,
            victory: state.victory,
        }
    }

    /// Fraction of the health bar to fill
    pub fn health_fraction(&self) -> f32 {
        (self.hud.health as f32 / self.hud.max_health as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::effects::VisualEffect;

    #[test]
    fn test_hidden_and_dead_bots_not_drawn() {
        let tuning = Tuning {
            num_bots: 3,
            ..Default::default()
        };
        let mut state = GameState::new(tuning, 8).unwrap();
        state.ships[1].visible = true;
        state.ships[2].visible = true;
        state.ships[2].alive = false;

        let snap = Snapshot::capture(&state);
        let drawn: Vec<usize> = snap.ships.iter().map(|s| s.index).collect();
        assert_eq!(drawn, vec![0, 1]);
        assert_eq!(snap.hud.alive, 2);
    }

    #[test]
    fn test_ships_ride_the_sea() {
        let state = GameState::new(Tuning::default(), 8).unwrap();
        let snap = Snapshot::capture(&state);
        let player = &snap.ships[0];
        assert!(player.is_player);
        // Wave height at the origin at t=0 is 3.0
        assert!((player.pos.y - 8.0).abs() < 1e-5);
        assert!(player.roll.abs() < 0.5 && player.pitch.abs() < 0.5);
    }

    #[test]
    fn test_hud_and_ring() {
        let mut state = GameState::new(Tuning::default(), 8).unwrap();
        state.player_health = 85;
        state.radar.active = true;
        state.radar.correlation = 0.876;
        state.effects.push(VisualEffect::splash(Vec3::new(1.0, 2.0, 3.0)));

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.hud.correlation_percent, 87);
        assert!((snap.health_fraction() - 0.85).abs() < 1e-6);
        assert_eq!(snap.radar_ring.as_ref().map(|r| r.radius), Some(400.0));
        assert_eq!(snap.effects.len(), 1);
        assert_eq!(snap.effects[0].kind, EffectKind::Splash);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(Tuning::default(), 8).unwrap();
        let json = serde_json::to_string(&Snapshot::capture(&state)).unwrap();
        assert!(json.contains("\"victory\":false"));
    }
}
