//! Engine configuration.
//!
//! Typically built with `EngineConfig::default()` and tweaked, or loaded
//! from JSON by the application crate (requires the `serde` feature).  Every
//! field has a default, so a partial document is enough.

use std::time::Duration;

use crate::{CoreError, CoreResult, SimClock, SpeedPolicy};

/// Top-level simulation engine configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Milliseconds between published fixes.  Default: 500 (2 Hz).
    pub tick_period_ms: u64,

    /// Noise RNG seed.  `None` seeds from OS entropy; the same seed always
    /// produces identical noise.
    pub seed: Option<u64>,

    /// Maximum positional noise added to each moving fix, metres.
    /// Default: 1.0.
    pub position_noise_m: f64,

    /// Maximum deviation of the published speed from the cruising speed,
    /// m/s.  Default: 1.0.
    pub speed_jitter_mps: f64,

    /// Altitude reported with every fix, metres.  Default: 0.0.
    pub altitude_m: f32,

    /// Segment-length speed bands.
    pub speed: SpeedPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period_ms:   500,
            seed:             None,
            position_noise_m: 1.0,
            speed_jitter_mps: 1.0,
            altitude_m:       0.0,
            speed:            SpeedPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// The tick period as a `Duration`.
    #[inline]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Construct a `SimClock` pre-configured for one run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_period())
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_period_ms == 0 {
            return Err(CoreError::Config("tick_period_ms must be > 0".into()));
        }
        if !(self.position_noise_m >= 0.0 && self.position_noise_m.is_finite()) {
            return Err(CoreError::Config(format!(
                "position_noise_m must be a finite value >= 0, got {}",
                self.position_noise_m
            )));
        }
        if !(self.speed_jitter_mps >= 0.0 && self.speed_jitter_mps.is_finite()) {
            return Err(CoreError::Config(format!(
                "speed_jitter_mps must be a finite value >= 0, got {}",
                self.speed_jitter_mps
            )));
        }
        let s = &self.speed;
        for (name, v) in [
            ("speed.highway_kmh", s.highway_kmh),
            ("speed.arterial_kmh", s.arterial_kmh),
            ("speed.local_factor", s.local_factor),
        ] {
            if !(v > 0.0 && v.is_finite()) {
                return Err(CoreError::Config(format!("{name} must be > 0, got {v}")));
            }
        }
        if !(s.arterial_min_m >= 0.0 && s.arterial_min_m <= s.highway_min_m) {
            return Err(CoreError::Config(format!(
                "speed band thresholds out of order: arterial_min_m {} > highway_min_m {}",
                s.arterial_min_m, s.highway_min_m
            )));
        }
        Ok(())
    }
}
