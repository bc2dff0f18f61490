//! `rsim-engine` — route playback: tick loop, run control, and the publisher
//! seam.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                         |
//! |---------------|------------------------------------------------------------------|
//! | [`state`]     | `SimulationState`, `RunMode`, `RunStatus`                        |
//! | [`publisher`] | `StatePublisher` trait, `PublishedFix`, memory and no-op sinks   |
//! | [`walker`]    | `RouteWalker` — deterministic sub-tick traversal of a route      |
//! | [`worker`]    | per-run tokio task, `RunOutcome`                                 |
//! | [`fixed`]     | `FixedPoint` — hold a single position active                     |
//! | [`engine`]    | `SimulationEngine<P>` — start / pause / resume / cancel / hold   |
//! | [`error`]     | `EngineError`, `EngineResult<T>`                                 |
//!
//! # Movement model
//!
//! 1. `SimulationEngine::start` publishes an active fix at the first point
//!    and spawns a worker.
//! 2. Every tick period the worker advances one sub-tick along the current
//!    segment (see [`walker`]) and publishes a noisy fix.
//! 3. The run ends with exactly one `active = false` fix: at the last point
//!    on completion, at the current position on cancellation.

pub mod engine;
pub mod error;
pub mod fixed;
pub mod publisher;
pub mod state;
pub mod walker;
pub mod worker;


pub use engine::SimulationEngine;
pub use error::{EngineError, EngineResult};
pub use fixed::FixedPoint;
pub use publisher::{MemoryPublisher, NoopPublisher, PublishError, PublishedFix, RecordedFix, StatePublisher};
pub use state::{RunMode, RunStatus, SimulationState};
pub use walker::{RouteWalker, Sample, SegmentPlan};
pub use worker::RunOutcome;
