//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to simulated elapsed time is held in `SimClock`:
//!
//!   elapsed = tick * tick_period
//!
//! Every published fix corresponds to exactly one tick, so the tick count of
//! a finished run is also the simulated duration of the drive.  The default
//! tick period is 500 ms (2 Hz publishing).

use std::fmt;
use std::time::Duration;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter within one run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated elapsed time.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// How much simulated time one tick represents.
    pub tick_period: Duration,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_period: Duration) -> Self {
        Self { tick_period, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated time elapsed since tick 0.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.tick_period.saturating_mul(self.current_tick.0.min(u32::MAX as u64) as u32)
    }

    /// Tick period in (fractional) seconds.
    #[inline]
    pub fn tick_secs(&self) -> f64 {
        self.tick_period.as_secs_f64()
    }

    /// How many ticks are needed to cover `distance_m` at `speed_mps`?
    ///
    /// Rounds up and never returns less than 1, so zero-length or degenerate
    /// legs still advance by one tick.
    pub fn ticks_for_distance(&self, distance_m: f64, speed_mps: f64) -> u64 {
        let per_tick = speed_mps * self.tick_secs();
        if !(per_tick > 0.0) || !distance_m.is_finite() {
            return 1;
        }
        ((distance_m / per_tick).ceil() as u64).max(1)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed().as_secs();
        write!(f, "{} ({:02}:{:02}:{:02})", self.current_tick, secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
