//! `rsim-route` — route geometry and route acquisition.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`route`]   | `Route` (immutable point sequence), `RouteStats`, `Segment` |
//! | [`builder`] | `RoutePolicy`, `build_route` (endpoint snapping, checks)    |
//! | [`source`]  | `RouteSource` trait, `EncodedRoute`, `resolve_route`        |
//! | [`error`]   | `RouteError`, `RouteResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `RoutePolicy`.          |

pub mod builder;
pub mod error;
pub mod route;
pub mod source;

#[cfg(test)]
mod tests;

pub use builder::{RoutePolicy, build_route};
pub use error::{RouteError, RouteResult};
pub use route::{Route, RouteStats, Segment};
pub use source::{EncodedRoute, RouteSource, StaticRouteSource, resolve_route};
