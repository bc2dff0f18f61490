//! Route-subsystem error type.

use thiserror::Error;

use rsim_core::GeoPoint;

/// Errors produced by `rsim-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route endpoints are {separation_m:.1} m apart, minimum is {min_m:.1} m")]
    TooShort { separation_m: f64, min_m: f64 },

    #[error("requested endpoint {0} is not a finite coordinate")]
    NonFinite(GeoPoint),

    #[error("route source failed: {0}")]
    Source(String),
}

pub type RouteResult<T> = Result<T, RouteError>;
