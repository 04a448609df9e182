//! Probability oracle consumed by the radar
//!
//! The radar only needs a single correlation value in [0, 1] per scan. The
//! bundled oracle samples the measurement statistics of a noisy two-qubit
//! Bell pair; any other source can be plugged in through the trait.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::OracleError;

/// Source of scan correlation values
pub trait ProbabilityOracle {
    /// Return a correlation in [0, 1].
    ///
    /// Higher `noise_factor` pushes the result toward 0.5. `reflection_coeff`
    /// blends between the measured signal and 0.5.
    fn scan(
        &mut self,
        noise_factor: f32,
        reflection_coeff: f32,
        shots: u32,
    ) -> Result<f32, OracleError>;
}

impl<F> ProbabilityOracle for F
where
    F: FnMut(f32, f32, u32) -> Result<f32, OracleError>,
{
    fn scan(
        &mut self,
        noise_factor: f32,
        reflection_coeff: f32,
        shots: u32,
    ) -> Result<f32, OracleError> {
        self(noise_factor, reflection_coeff, shots)
    }
}

/// Sampled Bell-pair correlation measurement.
///
/// An ideal Bell pair always measures `00` or `11`. Depolarizing noise of
/// strength `p` on the entangling gate replaces the pair with the fully mixed
/// state, which is correlated half the time, so each shot is correlated with
/// probability `1 - p/2`. Noise on the single-qubit gate before entangling
/// leaves the parity intact and is not modelled.
#[derive(Debug, Clone)]
pub struct BellPairOracle {
    rng: Pcg32,
}

impl BellPairOracle {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Expected correlation for the given parameters (no sampling noise)
    pub fn expected(noise_factor: f32, reflection_coeff: f32) -> f32 {
        blend(1.0 - noise_factor / 2.0, reflection_coeff)
    }
}

/// Mix a measured correlation with the unbiased 0.5 baseline
fn blend(p_corr: f32, reflection_coeff: f32) -> f32 {
    reflection_coeff * p_corr + (1.0 - reflection_coeff) / 2.0
}

impl ProbabilityOracle for BellPairOracle {
    fn scan(
        &mut self,
        noise_factor: f32,
        reflection_coeff: f32,
        shots: u32,
    ) -> Result<f32, OracleError> {
        if !(0.0..=1.0).contains(&noise_factor) {
            return Err(OracleError::InvalidParameter {
                name: "noise_factor",
                value: noise_factor as f64,
            });
        }
        if !(0.0..=1.0).contains(&reflection_coeff) {
            return Err(OracleError::InvalidParameter {
                name: "reflection_coeff",
                value: reflection_coeff as f64,
            });
        }
        if shots == 0 {
            return Err(OracleError::InvalidParameter {
                name: "shots",
                value: 0.0,
            });
        }

        let p_shot = 1.0 - noise_factor as f64 / 2.0;
        let correlated = (0..shots).filter(|_| self.rng.random_bool(p_shot)).count();
        let p_corr = correlated as f32 / shots as f32;
        Ok(blend(p_corr, reflection_coeff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noiseless_pair_is_fully_correlated() {
        let mut oracle = BellPairOracle::new(1);
        let corr = oracle.scan(0.0, 1.0, 512).unwrap();
        assert_eq!(corr, 1.0);
    }

    #[test]
    fn test_default_parameters_clear_threshold() {
        let mut oracle = BellPairOracle::new(2);
        for _ in 0..20 {
            let corr = oracle.scan(0.05, 0.8, 512).unwrap();
            assert!(corr > 0.55 && corr <= 1.0, "correlation {corr}");
        }
        assert!((BellPairOracle::expected(0.05, 0.8) - 0.88).abs() < 1e-6);
    }

    #[test]
    fn test_full_noise_tends_to_half() {
        let mut oracle = BellPairOracle::new(3);
        let corr = oracle.scan(1.0, 0.8, 4096).unwrap();
        assert!((corr - 0.5).abs() < 0.05, "correlation {corr}");
    }

    #[test]
    fn test_zero_reflection_is_pure_noise() {
        let mut oracle = BellPairOracle::new(4);
        assert_eq!(oracle.scan(0.05, 0.0, 64).unwrap(), 0.5);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let mut oracle = BellPairOracle::new(5);
        assert!(matches!(
            oracle.scan(-0.1, 0.8, 512),
            Err(OracleError::InvalidParameter { name: "noise_factor", .. })
        ));
        assert!(matches!(
            oracle.scan(0.05, 1.2, 512),
            Err(OracleError::InvalidParameter { name: "reflection_coeff", .. })
        ));
        assert!(matches!(
            oracle.scan(0.05, 0.8, 0),
            Err(OracleError::InvalidParameter { name: "shots", .. })
        ));
    }

    #[test]
    fn test_closure_oracle() {
        let mut fixed = |_: f32, _: f32, _: u32| -> Result<f32, OracleError> { Ok(0.25) };
        assert_eq!(fixed.scan(0.05, 0.8, 512), Ok(0.25));
    }
}
