//! Noise RNG for realism jitter.
//!
//! Each run owns one `NoiseRng`.  With a configured seed the noise sequence
//! is reproducible, which is what the engine tests rely on; without one the
//! generator is seeded from OS entropy.

use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::GeoPoint;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-run RNG used for positional and speed noise.
///
/// Not `Sync`: the run's worker task is its only user.
pub struct NoiseRng(SmallRng);

impl NoiseRng {
    /// Seed deterministically.
    pub fn new(seed: u64) -> Self {
        NoiseRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from `seed` if given, else from OS entropy.  `salt` is mixed in
    /// so consecutive runs sharing one configured seed still differ.
    pub fn for_run(seed: Option<u64>, salt: u64) -> Self {
        match seed {
            Some(s) => NoiseRng::new(s ^ salt.wrapping_mul(MIXING_CONSTANT)),
            None    => NoiseRng(SmallRng::from_entropy()),
        }
    }

    /// Displace `point` uniformly within a disc of `radius_m` metres.
    pub fn jitter_point(&mut self, point: GeoPoint, radius_m: f64) -> GeoPoint {
        if radius_m <= 0.0 {
            return point;
        }
        let angle: f64 = self.0.gen_range(0.0..TAU);
        let r = radius_m * self.0.gen_range(0.0f64..=1.0).sqrt();
        point.offset_m(r * angle.cos(), r * angle.sin())
    }

    /// `base_mps ± amplitude_mps`, clamped at zero.
    pub fn jitter_speed(&mut self, base_mps: f64, amplitude_mps: f64) -> f64 {
        if amplitude_mps <= 0.0 {
            return base_mps.max(0.0);
        }
        (base_mps + self.0.gen_range(-amplitude_mps..=amplitude_mps)).max(0.0)
    }
}
