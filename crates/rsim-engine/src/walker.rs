//! Deterministic route traversal, one sub-tick at a time.
//!
//! `RouteWalker` owns no timers and no randomness: it only knows where the
//! simulated vehicle is after `k` ticks.  The async worker drives it and adds
//! noise on top, which keeps the traversal itself easy to test.
//!
//! # Segment timing
//!
//! Each segment gets a cruising speed from its length (see
//! [`SpeedPolicy`]) and is split into
//!
//!   n = max(1, ceil(distance / (speed * tick_secs)))
//!
//! sub-ticks.  Sub-tick `k` (1 ≤ k ≤ n) sits at fraction `k / n` of the
//! segment, so the last sub-tick of segment `i` lands exactly on point
//! `i + 1` and the first sub-tick of segment `i + 1` is already past it.

use std::sync::Arc;

use rsim_core::{GeoPoint, SimClock, SpeedBand, SpeedPolicy};
use rsim_route::Route;

use crate::{EngineError, EngineResult};

/// Timing plan for one segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentPlan {
    pub band:        SpeedBand,
    pub cruise_mps:  f64,
    pub sub_ticks:   u64,
    /// Route distance before this segment starts, metres.
    pub start_m:     f64,
    pub distance_m:  f64,
    pub bearing_deg: f64,
}

/// Where the walker is, noise-free.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub position:    GeoPoint,
    pub segment:     usize,
    pub band:        SpeedBand,
    pub cruise_mps:  f64,
    pub bearing_deg: f64,
    pub traveled_m:  f64,
}

/// Cursor over a route: `(segment, sub_tick)`.
pub struct RouteWalker {
    route:    Arc<Route>,
    plans:    Vec<SegmentPlan>,
    segment:  usize,
    sub_tick: u64,
}

impl RouteWalker {
    /// Plan every segment of `route`.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptyRoute`] if the route has fewer than two points.
    pub fn new(route: Arc<Route>, policy: &SpeedPolicy, clock: &SimClock) -> EngineResult<Self> {
        if !route.is_simulatable() {
            return Err(EngineError::EmptyRoute { points: route.len() });
        }

        let mut start_m = 0.0;
        let plans = route
            .stats()
            .segments()
            .iter()
            .map(|seg| {
                let band = policy.band_for(seg.distance_m);
                let cruise_mps = policy.speed_mps(band);
                let plan = SegmentPlan {
                    band,
                    cruise_mps,
                    sub_ticks: clock.ticks_for_distance(seg.distance_m, cruise_mps),
                    start_m,
                    distance_m: seg.distance_m,
                    bearing_deg: seg.bearing_deg,
                };
                start_m += seg.distance_m;
                plan
            })
            .collect();

        Ok(Self { route, plans, segment: 0, sub_tick: 0 })
    }

    #[inline]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[inline]
    pub fn plans(&self) -> &[SegmentPlan] {
        &self.plans
    }

    /// Ticks needed to traverse the whole route.
    pub fn total_ticks(&self) -> u64 {
        self.plans.iter().map(|p| p.sub_ticks).sum()
    }

    #[inline]
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// `true` once the final sub-tick of the final segment has been taken.
    pub fn is_finished(&self) -> bool {
        self.segment + 1 >= self.plans.len() && self.sub_tick >= self.plans[self.segment].sub_ticks
    }

    /// The noise-free sample at the current cursor.
    pub fn current(&self) -> Sample {
        let plan = &self.plans[self.segment];
        let seg = &self.route.stats().segments()[self.segment];
        let (position, fraction) = if self.sub_tick >= plan.sub_ticks {
            (seg.to, 1.0)
        } else {
            let f = self.sub_tick as f64 / plan.sub_ticks as f64;
            (seg.from.interpolate(seg.to, f), f)
        };
        Sample {
            position,
            segment:     self.segment,
            band:        plan.band,
            cruise_mps:  plan.cruise_mps,
            bearing_deg: plan.bearing_deg,
            traveled_m:  plan.start_m + plan.distance_m * fraction,
        }
    }

    /// Take one sub-tick.  Returns `None` once the route is finished.
    pub fn advance(&mut self) -> Option<Sample> {
        if self.is_finished() {
            return None;
        }
        if self.sub_tick >= self.plans[self.segment].sub_ticks {
            self.segment += 1;
            self.sub_tick = 0;
        }
        self.sub_tick += 1;
        Some(self.current())
    }

    #[inline]
    pub fn traveled_m(&self) -> f64 {
        self.current().traveled_m
    }
}
