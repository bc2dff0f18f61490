//! The per-run worker task.
//!
//! One worker is spawned per route run.  It owns the `RouteWalker`, the
//! noise RNG, and the run clock, and is the only writer to the publisher
//! while it is alive.  Control arrives through two channels:
//!
//! - the shared `watch` status channel: the engine flips `state` between
//!   `Running` and `Paused`; the worker only ever reads that bit back;
//! - a `CancellationToken`, checked between every tick and while paused.

use std::sync::Arc;
use std::time::Duration;

use rsim_core::{GeoPoint, NoiseRng, RunId, SimClock};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::publisher::publish_logged;
use crate::walker::Sample;
use crate::{PublishedFix, RouteWalker, RunStatus, SimulationState, StatePublisher};

// ── RunOutcome ────────────────────────────────────────────────────────────────

/// Summary of a finished route run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    pub run:            RunId,
    /// `Completed` or `Cancelled`.
    pub state:          SimulationState,
    /// Movement ticks taken (excludes the start fix and resume fixes).
    pub ticks:          u64,
    pub traveled_m:     f64,
    /// `ticks * tick_period`.
    pub simulated:      Duration,
    /// Where the terminal inactive fix was published.
    pub final_position: GeoPoint,
}

// ── TerminalGuard ─────────────────────────────────────────────────────────────

/// Publishes the terminal `active = false` fix exactly once.
///
/// `finish` is the normal path.  If the worker future is dropped or unwinds
/// before `finish`, `Drop` publishes at the last position reached and marks
/// the run cancelled, so the consumer is never left with a stale active fix.
struct TerminalGuard<P: StatePublisher> {
    run:         RunId,
    publisher:   Arc<P>,
    status:      Arc<watch::Sender<RunStatus>>,
    position:    GeoPoint,
    bearing_deg: f64,
    altitude_m:  f32,
    armed:       bool,
}

impl<P: StatePublisher> TerminalGuard<P> {
    fn publish_terminal(&self, position: GeoPoint, state: SimulationState) {
        let fix = PublishedFix {
            position,
            altitude_m:  self.altitude_m,
            speed_mps:   0.0,
            bearing_deg: self.bearing_deg as f32,
            active:      false,
        };
        publish_logged(&*self.publisher, self.run, &fix);
        self.status.send_modify(|s| {
            s.finish(state);
            s.position = Some(position);
            if state == SimulationState::Completed {
                s.traveled_m = s.total_m;
            }
        });
    }

    fn finish(&mut self, position: GeoPoint, state: SimulationState) {
        self.armed = false;
        self.publish_terminal(position, state);
    }
}

impl<P: StatePublisher> Drop for TerminalGuard<P> {
    fn drop(&mut self) {
        if self.armed {
            error!(run = %self.run, "run ended abnormally, publishing inactive fix");
            self.armed = false;
            self.publish_terminal(self.position, SimulationState::Cancelled);
        }
    }
}

// ── Worker ────────────────────────────────────────────────────────────────────

pub(crate) struct Worker<P: StatePublisher> {
    pub run:              RunId,
    pub walker:           RouteWalker,
    pub publisher:        Arc<P>,
    pub status:           Arc<watch::Sender<RunStatus>>,
    pub cancel:           CancellationToken,
    pub rng:              NoiseRng,
    pub clock:            SimClock,
    pub position_noise_m: f64,
    pub speed_jitter_mps: f64,
    pub altitude_m:       f32,
}

impl<P: StatePublisher> Worker<P> {
    /// Drive the run to completion or cancellation.
    ///
    /// The start fix has already been published by the engine; the first
    /// movement tick is published one tick period after spawn.
    pub(crate) async fn run(mut self) -> RunOutcome {
        let start = self.walker.current();
        let mut guard = TerminalGuard {
            run:         self.run,
            publisher:   Arc::clone(&self.publisher),
            status:      Arc::clone(&self.status),
            position:    start.position,
            bearing_deg: start.bearing_deg,
            altitude_m:  self.altitude_m,
            armed:       true,
        };

        let mut control = self.status.subscribe();
        let period = self.clock.tick_period;
        let mut segment = usize::MAX;

        let end_state = loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break SimulationState::Cancelled,
                _ = tokio::time::sleep(period) => {}
            }

            let paused = control.borrow_and_update().state == SimulationState::Paused;
            if paused {
                debug!(run = %self.run, tick = %self.clock.current_tick, "paused");
                if !wait_for_resume(&mut control, &self.cancel).await {
                    break SimulationState::Cancelled;
                }
                debug!(run = %self.run, "resumed");
                // Re-announce where we are before moving on.
                let here = self.walker.current();
                self.publish_moving(&here);
                continue;
            }

            let Some(sample) = self.walker.advance() else {
                break SimulationState::Completed;
            };
            self.clock.advance();

            if sample.segment != segment {
                segment = sample.segment;
                let plan = &self.walker.plans()[segment];
                debug!(
                    run = %self.run,
                    segment,
                    of = self.walker.plans().len(),
                    band = %plan.band,
                    distance_m = plan.distance_m,
                    sub_ticks = plan.sub_ticks,
                    "segment started"
                );
            }

            self.publish_moving(&sample);
            guard.position = sample.position;
            guard.bearing_deg = sample.bearing_deg;

            let tick = self.clock.current_tick;
            self.status.send_modify(|s| {
                s.segment = sample.segment;
                s.tick = tick;
                s.traveled_m = sample.traveled_m;
                s.position = Some(sample.position);
                s.bearing_deg = sample.bearing_deg;
            });

            if self.walker.is_finished() {
                break SimulationState::Completed;
            }
        };

        let final_position = match end_state {
            SimulationState::Completed => self.walker.route().end().unwrap_or(guard.position),
            _ => self.walker.current().position,
        };
        guard.finish(final_position, end_state);

        let outcome = RunOutcome {
            run:            self.run,
            state:          end_state,
            ticks:          self.clock.current_tick.0,
            traveled_m:     self.walker.traveled_m(),
            simulated:      self.clock.elapsed(),
            final_position,
        };
        info!(
            run = %outcome.run,
            state = %outcome.state,
            ticks = outcome.ticks,
            traveled_m = outcome.traveled_m,
            simulated_s = outcome.simulated.as_secs_f64(),
            "run finished"
        );
        outcome
    }

    /// Publish an active fix at `sample` with positional and speed noise.
    fn publish_moving(&mut self, sample: &Sample) {
        let fix = PublishedFix {
            position:    self.rng.jitter_point(sample.position, self.position_noise_m),
            altitude_m:  self.altitude_m,
            speed_mps:   self.rng.jitter_speed(sample.cruise_mps, self.speed_jitter_mps) as f32,
            bearing_deg: sample.bearing_deg as f32,
            active:      true,
        };
        publish_logged(&*self.publisher, self.run, &fix);
    }
}

/// Block until the status leaves `Paused`.  Returns `false` if cancelled
/// (or the engine went away) first.
async fn wait_for_resume(
    control: &mut watch::Receiver<RunStatus>,
    cancel:  &CancellationToken,
) -> bool {
    loop {
        let paused = control.borrow_and_update().state == SimulationState::Paused;
        if !paused {
            return true;
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return false,
            changed = control.changed() => {
                if changed.is_err() {
                    return false;
                }
            }
        }
    }
}
