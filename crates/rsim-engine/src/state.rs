//! Run state machine and the observable run status.

use std::fmt;

use rsim_core::{GeoPoint, RunId, Tick};

// ── SimulationState ───────────────────────────────────────────────────────────

/// Lifecycle of one run.
///
/// ```text
/// Idle ──► Running ◄──► Paused
///             │            │
///             ▼            ▼
///         Completed    Cancelled ◄── (any non-terminal state)
/// ```
///
/// `Completed` and `Cancelled` are terminal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum SimulationState {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
    Cancelled,
}

impl SimulationState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SimulationState::Completed | SimulationState::Cancelled)
    }

    /// `true` while a run exists and has not finished (running or paused).
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, SimulationState::Running | SimulationState::Paused)
    }

    /// Whether the state machine allows `self → next`.
    pub fn can_transition_to(self, next: SimulationState) -> bool {
        use SimulationState::*;
        matches!(
            (self, next),
            (Idle, Running)
                | (Running, Paused)
                | (Paused, Running)
                | (Running, Completed)
                | (Idle | Running | Paused, Cancelled)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SimulationState::Idle      => "idle",
            SimulationState::Running   => "running",
            SimulationState::Paused    => "paused",
            SimulationState::Completed => "completed",
            SimulationState::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RunMode ───────────────────────────────────────────────────────────────────

/// What the current run is doing with the published position.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum RunMode {
    /// Moving along a multi-point route.
    #[default]
    Route,
    /// Pinned to a single point.
    FixedPoint,
}

// ── RunStatus ─────────────────────────────────────────────────────────────────

/// Snapshot of the engine's current run, broadcast to subscribers after
/// every tick and state transition.
///
/// Advisory only: nothing in the engine reads progress back for control
/// decisions.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RunStatus {
    pub run:           RunId,
    pub mode:          RunMode,
    pub state:         SimulationState,
    /// Index of the segment being traversed.
    pub segment:       usize,
    pub segment_count: usize,
    /// Ticks published since the run started.
    pub tick:          Tick,
    pub traveled_m:    f64,
    pub total_m:       f64,
    /// Last position the run reached (noise-free), if any.
    pub position:      Option<GeoPoint>,
    /// Bearing of the last published fix, degrees.
    pub bearing_deg:   f64,
}

impl RunStatus {
    /// A fresh status for a run that has not started ticking.
    pub fn new(run: RunId, mode: RunMode, segment_count: usize, total_m: f64) -> Self {
        Self {
            run,
            mode,
            segment_count,
            total_m,
            ..Self::default()
        }
    }

    /// `traveled / total` as a whole percentage in `[0, 100]`.
    ///
    /// A zero-length route reports 0 until it completes, then 100.
    pub fn progress_percent(&self) -> u8 {
        if self.total_m > 0.0 {
            let pct = (self.traveled_m / self.total_m * 100.0).floor();
            pct.clamp(0.0, 100.0) as u8
        } else if self.state == SimulationState::Completed {
            100
        } else {
            0
        }
    }

    /// Enter a terminal state unless already in one.  Completion observed
    /// while a pause request is pending still counts as completion.
    pub fn finish(&mut self, terminal: SimulationState) {
        debug_assert!(terminal.is_terminal());
        if !self.state.is_terminal() {
            self.state = terminal;
        }
    }

    /// Apply `next` if the state machine allows it.  Returns whether the
    /// state changed.
    pub fn transition(&mut self, next: SimulationState) -> bool {
        if self.state.can_transition_to(next) {
            self.state = next;
            true
        } else {
            false
        }
    }
}
