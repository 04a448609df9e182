//! Procedural sea surface
//!
//! Four summed sinusoids. Rendering and ship flotation sample this
//! independently, so both functions are pure: identical inputs always give
//! bit-identical outputs.

use glam::Vec3;

/// One sinusoidal swell component
struct Swell {
    /// Spatial frequency along the swell's direction
    frequency: f64,
    /// Phase advance per unit of wave time
    rate: f64,
    amplitude: f64,
}

const SWELLS: [Swell; 4] = [
    Swell {
        frequency: 0.015,
        rate: 0.8,
        amplitude: 2.5,
    },
    Swell {
        frequency: 0.012,
        rate: 1.0,
        amplitude: 3.0,
    },
    Swell {
        frequency: 0.008,
        rate: 1.5,
        amplitude: 1.5,
    },
    Swell {
        frequency: 0.02,
        rate: 0.5,
        amplitude: 2.0,
    },
];

/// Finite-difference step for the normal estimate
const NORMAL_EPSILON: f32 = 1.0;
/// Fixed vertical weight of the normal before normalizing
const NORMAL_UP_WEIGHT: f32 = 2.0;

/// Sea-surface height at `(x, z)` and wave time `t`
pub fn wave_height(x: f32, z: f32, t: f64) -> f32 {
    let (x, z) = (x as f64, z as f64);
    let [a, b, c, d] = &SWELLS;

    let h = (a.frequency * x + t * a.rate).sin() * a.amplitude
        + (b.frequency * z + t * b.rate).cos() * b.amplitude
        + (c.frequency * (x + z) + t * c.rate).sin() * c.amplitude
        + (d.frequency * (x - z) + t * d.rate).sin() * d.amplitude;
    h as f32
}

/// Unit surface normal from a central-difference gradient.
///
/// Returns `None` when the gradient is exactly zero (or not finite); use
/// [`wave_normal_or_up`] where a vector is always needed.
pub fn wave_normal(x: f32, z: f32, t: f64) -> Option<Vec3> {
    let eps = NORMAL_EPSILON;
    let h_left = wave_height(x - eps, z, t);
    let h_right = wave_height(x + eps, z, t);
    let h_down = wave_height(x, z - eps, t);
    let h_up = wave_height(x, z + eps, t);

    let dx = h_left - h_right;
    let dz = h_down - h_up;
    if (dx == 0.0 && dz == 0.0) || !dx.is_finite() || !dz.is_finite() {
        return None;
    }
    Vec3::new(dx, NORMAL_UP_WEIGHT, dz).try_normalize()
}

/// Surface normal, falling back to straight up on a flat gradient
#[inline]
pub fn wave_normal_or_up(x: f32, z: f32, t: f64) -> Vec3 {
    wave_normal(x, z, t).unwrap_or(Vec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_height_at_origin() {
        // sin(0)*2.5 + cos(0)*3.0 + sin(0)*1.5 + sin(0)*2.0
        assert!((wave_height(0.0, 0.0, 0.0) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_height_bounded_by_amplitudes() {
        let bound = 2.5 + 3.0 + 1.5 + 2.0;
        for i in 0..200 {
            let x = i as f32 * 13.7 - 1000.0;
            let z = i as f32 * -7.3 + 400.0;
            let h = wave_height(x, z, i as f64 * 0.37);
            assert!(h.abs() <= bound + 1e-4, "height {h} exceeds {bound}");
        }
    }

    #[test]
    fn test_height_animates_over_time() {
        let h0 = wave_height(120.0, -40.0, 0.0);
        let h1 = wave_height(120.0, -40.0, 1.0);
        assert_ne!(h0, h1);
    }

    #[test]
    fn test_normal_points_up() {
        let n = wave_normal_or_up(35.0, 80.0, 2.5);
        assert!(n.y > 0.0);
        assert!((n.length() - 1.0).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn height_is_deterministic(
            x in -2000.0f32..2000.0,
            z in -2000.0f32..2000.0,
            t in 0.0f64..10_000.0,
        ) {
            prop_assert_eq!(wave_height(x, z, t).to_bits(), wave_height(x, z, t).to_bits());
        }

        #[test]
        fn normal_is_unit_and_upward(
            x in -2000.0f32..2000.0,
            z in -2000.0f32..2000.0,
            t in 0.0f64..10_000.0,
        ) {
            let n = wave_normal_or_up(x, z, t);
            prop_assert!((n.length() - 1.0).abs() < 1e-4);
            prop_assert!(n.y > 0.0);
        }
    }
}
