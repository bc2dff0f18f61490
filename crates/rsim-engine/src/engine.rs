//! The engine's control surface.

use std::sync::Arc;

use rsim_core::{EngineConfig, GeoPoint, NoiseRng, RunId};
use rsim_route::Route;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::publisher::publish_logged;
use crate::worker::Worker;
use crate::{
    EngineError, EngineResult, FixedPoint, PublishedFix, RouteWalker, RunMode, RunOutcome,
    RunStatus, SimulationState, StatePublisher,
};

/// A spawned route run.
struct RunHandle {
    run:    RunId,
    cancel: CancellationToken,
    task:   JoinHandle<RunOutcome>,
}

/// What the engine is doing right now.  At most one of these at a time.
enum Activity {
    Idle,
    Route(RunHandle),
    Fixed(FixedPoint),
}

/// Plays routes back as a stream of position fixes.
///
/// # Type parameter
///
/// `P` is the sink every fix goes to.  The engine and its worker share it
/// through an `Arc`; only one of them publishes at any moment.
///
/// # Concurrency
///
/// A route run executes on a spawned tokio task.  `pause`, `resume`, and
/// `cancel` take `&self` and never block; `start`, `wait`, `stop`, and
/// `hold_position` take `&mut self` and await the previous run's terminal
/// fix before returning, so a new run never interleaves with an old one.
///
/// Dropping the engine cancels a running route (the worker still publishes
/// its inactive fix) and releases a held fixed point.
pub struct SimulationEngine<P: StatePublisher> {
    publisher: Arc<P>,
    config:    EngineConfig,
    status:    Arc<watch::Sender<RunStatus>>,
    last_run:  RunId,
    activity:  Activity,
}

impl<P: StatePublisher> SimulationEngine<P> {
    /// Create an idle engine.
    ///
    /// # Errors
    ///
    /// [`EngineError::Config`] if `config` fails validation.
    pub fn new(publisher: Arc<P>, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let (status, _) = watch::channel(RunStatus::default());
        Ok(Self {
            publisher,
            config,
            status: Arc::new(status),
            last_run: RunId::default(),
            activity: Activity::Idle,
        })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn publisher(&self) -> &Arc<P> {
        &self.publisher
    }

    fn next_run(&mut self) -> RunId {
        self.last_run = self.last_run.next();
        self.last_run
    }

    // ── Route runs ────────────────────────────────────────────────────────

    /// Start playing `route`.
    ///
    /// Publishes an active, zero-speed fix at the first point immediately;
    /// movement fixes follow once per tick period.  Any run or hold already
    /// in progress is stopped first and its inactive fix is published before
    /// the new start fix.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptyRoute`] if `route` has fewer than two points.
    /// Nothing is published and the current activity is left untouched.
    pub async fn start(&mut self, route: Route) -> EngineResult<RunId> {
        if !route.is_simulatable() {
            warn!(points = route.len(), "refusing to start a route without segments");
            return Err(EngineError::EmptyRoute { points: route.len() });
        }
        if let Err(e) = self.stop().await {
            warn!(error = %e, "previous activity ended with an error");
        }

        let run = self.next_run();
        let route = Arc::new(route);
        let clock = self.config.make_clock();
        let walker = RouteWalker::new(Arc::clone(&route), &self.config.speed, &clock)?;

        let first = walker.current();
        let start_fix = PublishedFix {
            position:    first.position,
            altitude_m:  self.config.altitude_m,
            speed_mps:   0.0,
            bearing_deg: first.bearing_deg as f32,
            active:      true,
        };
        publish_logged(&*self.publisher, run, &start_fix);

        let mut status = RunStatus::new(run, RunMode::Route, route.segment_count(), route.total_m());
        status.transition(SimulationState::Running);
        status.position = Some(first.position);
        status.bearing_deg = first.bearing_deg;
        self.status.send_replace(status);

        info!(
            %run,
            points = route.len(),
            total_m = route.total_m(),
            ticks = walker.total_ticks(),
            tick_ms = self.config.tick_period_ms,
            "run started"
        );

        let cancel = CancellationToken::new();
        let worker = Worker {
            run,
            walker,
            publisher: Arc::clone(&self.publisher),
            status: Arc::clone(&self.status),
            cancel: cancel.clone(),
            rng: NoiseRng::for_run(self.config.seed, run.0),
            clock,
            position_noise_m: self.config.position_noise_m,
            speed_jitter_mps: self.config.speed_jitter_mps,
            altitude_m: self.config.altitude_m,
        };
        let task = tokio::spawn(worker.run());
        self.activity = Activity::Route(RunHandle { run, cancel, task });
        Ok(run)
    }

    /// Pause a running route.  Returns `false` if nothing was running.
    ///
    /// The worker notices at its next tick boundary; no fixes are published
    /// while paused.
    pub fn pause(&self) -> bool {
        let changed = self.status.send_if_modified(|s| {
            s.mode == RunMode::Route && s.transition(SimulationState::Paused)
        });
        if changed {
            debug!(run = %self.status.borrow().run, "pause requested");
        }
        changed
    }

    /// Resume a paused route.  Returns `false` if nothing was paused.
    ///
    /// The worker republishes its current position, then continues from the
    /// same cursor.
    pub fn resume(&self) -> bool {
        let changed = self.status.send_if_modified(|s| {
            s.mode == RunMode::Route
                && s.state == SimulationState::Paused
                && s.transition(SimulationState::Running)
        });
        if changed {
            debug!(run = %self.status.borrow().run, "resume requested");
        }
        changed
    }

    /// Request cancellation of the running or paused route.  Returns `false`
    /// if there was nothing to cancel.
    ///
    /// The worker publishes its inactive fix asynchronously; use
    /// [`wait`](Self::wait) to observe it.
    pub fn cancel(&self) -> bool {
        match &self.activity {
            Activity::Route(handle) if !handle.cancel.is_cancelled() && !handle.task.is_finished() => {
                debug!(run = %handle.run, "cancel requested");
                handle.cancel.cancel();
                true
            }
            _ => false,
        }
    }

    /// Wait for the current route run to finish.
    ///
    /// Returns `Ok(None)` if no route run was in progress; a held fixed point
    /// is left in place.
    ///
    /// # Errors
    ///
    /// [`EngineError::Worker`] if the worker task panicked.  Its inactive fix
    /// has still been published.
    pub async fn wait(&mut self) -> EngineResult<Option<RunOutcome>> {
        match std::mem::replace(&mut self.activity, Activity::Idle) {
            Activity::Route(handle) => join(handle).await.map(Some),
            other => {
                self.activity = other;
                Ok(None)
            }
        }
    }

    /// Cancel a route run and wait for it, or release a held fixed point.
    /// Returns the route run's outcome, if there was one.
    pub async fn stop(&mut self) -> EngineResult<Option<RunOutcome>> {
        match std::mem::replace(&mut self.activity, Activity::Idle) {
            Activity::Idle => Ok(None),
            Activity::Route(handle) => {
                handle.cancel.cancel();
                join(handle).await.map(Some)
            }
            Activity::Fixed(fixed) => {
                self.end_hold(&fixed, None);
                Ok(None)
            }
        }
    }

    /// Stop whatever is in progress and return the status to `Idle`.
    pub async fn reset(&mut self) -> EngineResult<()> {
        let stopped = self.stop().await;
        self.status.send_replace(RunStatus::default());
        stopped.map(|_| ())
    }

    // ── Fixed-point mode ──────────────────────────────────────────────────

    /// Publish `point` as an active, stationary fix and hold it.
    ///
    /// A running route is cancelled first (its inactive fix comes before the
    /// hold).  Calling this while already holding moves the hold to `point`
    /// without an intermediate inactive fix.  Bearing carries over from the
    /// last published fix.
    pub async fn hold_position(&mut self, point: GeoPoint) -> EngineResult<RunId> {
        if let Activity::Fixed(fixed) = &mut self.activity {
            fixed.position = point;
            let fix = fixed.activation_fix();
            let run = self.last_run;
            publish_logged(&*self.publisher, run, &fix);
            self.status.send_modify(|s| s.position = Some(point));
            debug!(%run, %point, "hold moved");
            return Ok(run);
        }

        if let Err(e) = self.stop().await {
            warn!(error = %e, "previous activity ended with an error");
        }

        let bearing_deg = self.status.borrow().bearing_deg;
        let run = self.next_run();
        let fixed = FixedPoint::new(point, bearing_deg, self.config.altitude_m);
        publish_logged(&*self.publisher, run, &fixed.activation_fix());

        let mut status = RunStatus::new(run, RunMode::FixedPoint, 0, 0.0);
        status.transition(SimulationState::Running);
        status.position = Some(point);
        status.bearing_deg = bearing_deg;
        self.status.send_replace(status);

        info!(%run, %point, "holding position");
        self.activity = Activity::Fixed(fixed);
        Ok(run)
    }

    /// End a fixed-point hold, publishing an inactive fix at `at` (or the
    /// held position).
    ///
    /// # Errors
    ///
    /// [`EngineError::NotHolding`] if no position is held.
    pub fn release_position(&mut self, at: Option<GeoPoint>) -> EngineResult<()> {
        let Activity::Fixed(fixed) = std::mem::replace(&mut self.activity, Activity::Idle) else {
            return Err(EngineError::NotHolding);
        };
        self.end_hold(&fixed, at);
        Ok(())
    }

    fn end_hold(&self, fixed: &FixedPoint, at: Option<GeoPoint>) {
        let fix = fixed.deactivation_fix(at);
        let run = self.status.borrow().run;
        publish_logged(&*self.publisher, run, &fix);
        self.status.send_modify(|s| {
            s.finish(SimulationState::Completed);
            s.position = Some(fix.position);
        });
        info!(%run, at = %fix.position, "position released");
    }

    // ── Observation ───────────────────────────────────────────────────────

    /// Snapshot of the current run.
    pub fn status(&self) -> RunStatus {
        self.status.borrow().clone()
    }

    /// Receive a status update after every tick and state change.
    pub fn subscribe(&self) -> watch::Receiver<RunStatus> {
        self.status.subscribe()
    }

    pub fn state(&self) -> SimulationState {
        self.status.borrow().state
    }

    /// `true` while a route is running or paused, or a position is held.
    pub fn is_running(&self) -> bool {
        self.state().is_active()
    }

    pub fn is_paused(&self) -> bool {
        self.state() == SimulationState::Paused
    }

    /// Route progress, 0..=100.
    pub fn progress_percent(&self) -> u8 {
        self.status.borrow().progress_percent()
    }
}

async fn join(handle: RunHandle) -> EngineResult<RunOutcome> {
    handle.task.await.map_err(|e| {
        error!(run = %handle.run, error = %e, "simulation worker failed");
        EngineError::Worker(e.to_string())
    })
}

impl<P: StatePublisher> Drop for SimulationEngine<P> {
    fn drop(&mut self) {
        match std::mem::replace(&mut self.activity, Activity::Idle) {
            Activity::Idle => {}
            Activity::Route(handle) => handle.cancel.cancel(),
            Activity::Fixed(fixed) => self.end_hold(&fixed, None),
        }
    }
}
