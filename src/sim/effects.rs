//! Transient visual effects
//!
//! Effects carry no gameplay weight. Each one grows and fades a fixed amount
//! per tick and is pruned once its opacity reaches zero.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which kind of effect (used by renderers to pick a look)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Explosion,
    Smoke,
    Splash,
    RadarPulse,
}

/// A fading effect
#[derive(Debug, Clone, PartialEq)]
pub enum VisualEffect {
    /// Fireball at a hit ship
    Explosion { pos: Vec3, radius: f32, alpha: f32 },
    /// Drifting smoke column over a sunk bot
    Smoke {
        pos: Vec3,
        vel: Vec3,
        radius: f32,
        alpha: f32,
    },
    /// Ring on the water where a shot landed
    Splash { pos: Vec3, radius: f32, alpha: f32 },
    /// Expanding radar ring centred on the player
    RadarPulse {
        center: Vec3,
        radius: f32,
        alpha: f32,
        speed: f32,
    },
}

impl VisualEffect {
    pub fn explosion(pos: Vec3) -> Self {
        VisualEffect::Explosion {
            pos,
            radius: 5.0,
            alpha: 1.0,
        }
    }

    pub fn smoke(pos: Vec3, rng: &mut impl Rng) -> Self {
        let vel = Vec3::new(
            rng.random_range(-0.3..=0.3),
            rng.random_range(0.8..=1.2),
            rng.random_range(-0.3..=0.3),
        );
        VisualEffect::Smoke {
            pos,
            vel,
            radius: 4.0,
            alpha: 1.0,
        }
    }

    pub fn splash(pos: Vec3) -> Self {
        VisualEffect::Splash {
            pos,
            radius: 3.0,
            alpha: 1.0,
        }
    }

    pub fn radar_pulse(center: Vec3, speed: f32) -> Self {
        VisualEffect::RadarPulse {
            center,
            radius: 1.0,
            alpha: 0.7,
            speed,
        }
    }

    /// Advance one tick of growth and fade
    pub fn update(&mut self) {
        match self {
            VisualEffect::Explosion { radius, alpha, .. } => {
                *radius += 10.0;
                *alpha = (*alpha - 0.06).max(0.0);
            }
            VisualEffect::Smoke {
                pos,
                vel,
                radius,
                alpha,
            } => {
                *pos += *vel;
                *radius += 0.4;
                *alpha = (*alpha - 0.02).max(0.0);
            }
            VisualEffect::Splash { radius, alpha, .. } => {
                *radius += 3.0;
                *alpha = (*alpha - 0.04).max(0.0);
            }
            VisualEffect::RadarPulse { radius, alpha, speed, .. } => {
                *radius += *speed;
                *alpha = (*alpha - 0.01).max(0.0);
            }
        }
    }

    /// False once fully faded; inactive effects are never reused
    pub fn is_active(&self) -> bool {
        self.alpha() > 0.0
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            VisualEffect::Explosion { .. } => EffectKind::Explosion,
            VisualEffect::Smoke { .. } => EffectKind::Smoke,
            VisualEffect::Splash { .. } => EffectKind::Splash,
            VisualEffect::RadarPulse { .. } => EffectKind::RadarPulse,
        }
    }

    pub fn position(&self) -> Vec3 {
        match self {
            VisualEffect::Explosion { pos, .. }
            | VisualEffect::Smoke { pos, .. }
            | VisualEffect::Splash { pos, .. } => *pos,
            VisualEffect::RadarPulse { center, .. } => *center,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            VisualEffect::Explosion { radius, .. }
            | VisualEffect::Smoke { radius, .. }
            | VisualEffect::Splash { radius, .. }
            | VisualEffect::RadarPulse { radius, .. } => *radius,
        }
    }

    pub fn alpha(&self) -> f32 {
        match self {
            VisualEffect::Explosion { alpha, .. }
            | VisualEffect::Smoke { alpha, .. }
            | VisualEffect::Splash { alpha, .. }
            | VisualEffect::RadarPulse { alpha, .. } => *alpha,
        }
    }
}

/// Layer lengths recorded at the start of a tick.
///
/// Effects are only ever appended during a tick, so everything before the
/// mark existed when the tick began.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnMark([usize; 4]);

/// Per-category effect collections
#[derive(Debug, Clone, Default)]
pub struct EffectLayers {
    pub explosions: Vec<VisualEffect>,
    pub smokes: Vec<VisualEffect>,
    pub splashes: Vec<VisualEffect>,
    pub pulses: Vec<VisualEffect>,
}

impl EffectLayers {
    /// Route an effect to its category
    pub fn push(&mut self, effect: VisualEffect) {
        match effect.kind() {
            EffectKind::Explosion => self.explosions.push(effect),
            EffectKind::Smoke => self.smokes.push(effect),
            EffectKind::Splash => self.splashes.push(effect),
            EffectKind::RadarPulse => self.pulses.push(effect),
        }
    }

    /// Remember which effects exist now, before this tick spawns any
    pub fn mark(&self) -> SpawnMark {
        SpawnMark([
            self.explosions.len(),
            self.smokes.len(),
            self.splashes.len(),
            self.pulses.len(),
        ])
    }

    /// Age the effects that existed at `mark` once, then drop the ones that
    /// faded out. Effects spawned since the mark start aging next tick.
    pub fn age(&mut self, mark: SpawnMark) {
        let layers = [
            &mut self.explosions,
            &mut self.smokes,
            &mut self.splashes,
            &mut self.pulses,
        ];
        for (layer, settled) in layers.into_iter().zip(mark.0) {
            let settled = settled.min(layer.len());
            for effect in &mut layer[..settled] {
                effect.update();
            }
            layer.retain(VisualEffect::is_active);
        }
    }

    /// All live effects in draw order
    pub fn iter(&self) -> impl Iterator<Item = &VisualEffect> {
        self.explosions
            .iter()
            .chain(&self.smokes)
            .chain(&self.splashes)
            .chain(&self.pulses)
    }

    pub fn len(&self) -> usize {
        self.explosions.len() + self.smokes.len() + self.splashes.len() + self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
