//! The state publisher seam.
//!
//! The engine never stores positions anywhere itself: every fix goes out
//! through a [`StatePublisher`] injected at construction.  Whatever makes the
//! host report the simulated location reads from the other side of it.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rsim_core::{GeoPoint, RunId};
use thiserror::Error;
use tokio::time::Instant;
use tracing::warn;

// ── PublishedFix ──────────────────────────────────────────────────────────────

/// One instantaneous position/speed/bearing/altitude sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PublishedFix {
    pub position:    GeoPoint,
    pub altitude_m:  f32,
    pub speed_mps:   f32,
    pub bearing_deg: f32,
    /// `false` tells the consumer to stop reporting a simulated location.
    pub active:      bool,
}

impl PublishedFix {
    #[inline]
    pub fn lat(&self) -> f64 {
        self.position.lat
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.position.lon
    }
}

// ── StatePublisher ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("state sink rejected fix: {0}")]
    Rejected(String),

    #[error("state sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sink for published fixes.
///
/// Called from the run's worker task at up to the tick rate, and from the
/// engine's control methods for fixed-point and terminal fixes.  Never
/// called concurrently for the same engine.  Failures are logged by the
/// engine and not retried.
pub trait StatePublisher: Send + Sync + 'static {
    fn publish(&self, fix: &PublishedFix) -> Result<(), PublishError>;
}

/// Publish `fix`, logging (and otherwise ignoring) a failure.
pub(crate) fn publish_logged<P: StatePublisher + ?Sized>(publisher: &P, run: RunId, fix: &PublishedFix) -> bool {
    match publisher.publish(fix) {
        Ok(()) => true,
        Err(e) => {
            warn!(%run, error = %e, active = fix.active, "failed to publish fix");
            false
        }
    }
}

// ── NoopPublisher ─────────────────────────────────────────────────────────────

/// A [`StatePublisher`] that discards every fix.
pub struct NoopPublisher;

impl StatePublisher for NoopPublisher {
    fn publish(&self, _fix: &PublishedFix) -> Result<(), PublishError> {
        Ok(())
    }
}

// ── MemoryPublisher ───────────────────────────────────────────────────────────

/// A fix together with the (tokio) instant it was published.
#[derive(Copy, Clone, Debug)]
pub struct RecordedFix {
    pub fix: PublishedFix,
    pub at:  Instant,
}

/// In-process [`StatePublisher`] that records every fix.
///
/// `latest()` is the in-memory equivalent of the key-value state an
/// external consumer would read.  `failing(n)` makes the first `n`
/// publishes fail without recording anything.
#[derive(Default)]
pub struct MemoryPublisher {
    fixes:          Mutex<Vec<RecordedFix>>,
    fail_remaining: AtomicUsize,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(n: usize) -> Self {
        Self { fixes: Mutex::new(Vec::new()), fail_remaining: AtomicUsize::new(n) }
    }

    /// The most recently published fix.
    pub fn latest(&self) -> Option<PublishedFix> {
        self.fixes.lock().last().map(|r| r.fix)
    }

    /// Copy of every recorded fix in publication order.
    pub fn history(&self) -> Vec<RecordedFix> {
        self.fixes.lock().clone()
    }

    /// Just the fixes, without timestamps.
    pub fn fixes(&self) -> Vec<PublishedFix> {
        self.fixes.lock().iter().map(|r| r.fix).collect()
    }

    pub fn len(&self) -> usize {
        self.fixes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.fixes.lock().clear();
    }
}

impl StatePublisher for MemoryPublisher {
    fn publish(&self, fix: &PublishedFix) -> Result<(), PublishError> {
        let should_fail = self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(PublishError::Rejected("injected failure".into()));
        }
        self.fixes.lock().push(RecordedFix { fix: *fix, at: Instant::now() });
        Ok(())
    }
}
