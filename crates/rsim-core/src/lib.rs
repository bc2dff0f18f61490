//! `rsim-core` — foundational types for the `rsim` route simulator.
//!
//! This crate is a dependency of every other `rsim-*` crate.  It has no
//! `rsim-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `RunId`                                               |
//! | [`geo`]         | `GeoPoint`, haversine distance, initial bearing       |
//! | [`speed`]       | `SpeedBand`, `SpeedPolicy`                            |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `EngineConfig`                                        |
//! | [`rng`]         | `NoiseRng` (positional / speed jitter)                |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types so      |
//! |         | applications can load `EngineConfig` from JSON.            |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod speed;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::EngineConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{EARTH_RADIUS_M, GeoPoint};
pub use ids::RunId;
pub use rng::NoiseRng;
pub use speed::{SpeedBand, SpeedPolicy};
pub use time::{SimClock, Tick};
