//! Route acquisition.
//!
//! Fetching a route (typically an HTTP call to a directions service) is the
//! caller's business; this crate only defines the seam through which an
//! encoded polyline arrives and the glue that turns it into a `Route`.

use async_trait::async_trait;
use rsim_core::GeoPoint;
use tracing::info;

use crate::{Route, RoutePolicy, RouteResult, build_route};

/// A route as supplied by a directions service: the encoded path plus the
/// endpoints that were asked for.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedRoute {
    pub polyline: String,
    pub start:    GeoPoint,
    pub end:      GeoPoint,
}

/// Pluggable route provider.
///
/// Implementations must be `Send + Sync` so a single source can serve
/// requests from any task.
#[async_trait]
pub trait RouteSource: Send + Sync {
    /// Fetch an encoded route from `start` to `end`.
    async fn fetch(&self, start: GeoPoint, end: GeoPoint) -> RouteResult<EncodedRoute>;
}

/// A [`RouteSource`] that always answers with the same polyline.
///
/// Useful for tests, demos, and replaying a previously fetched route.
pub struct StaticRouteSource {
    polyline: String,
}

impl StaticRouteSource {
    pub fn new(polyline: impl Into<String>) -> Self {
        Self { polyline: polyline.into() }
    }
}

#[async_trait]
impl RouteSource for StaticRouteSource {
    async fn fetch(&self, start: GeoPoint, end: GeoPoint) -> RouteResult<EncodedRoute> {
        Ok(EncodedRoute { polyline: self.polyline.clone(), start, end })
    }
}

/// Fetch from `source`, decode leniently, and build the route.
pub async fn resolve_route<S: RouteSource + ?Sized>(
    source: &S,
    start:  GeoPoint,
    end:    GeoPoint,
    policy: &RoutePolicy,
) -> RouteResult<Route> {
    let encoded = source.fetch(start, end).await?;
    let decoded = rsim_polyline::decode(&encoded.polyline);
    info!(
        encoded_len = encoded.polyline.len(),
        decoded = decoded.len(),
        "route fetched"
    );
    build_route(decoded, encoded.start, encoded.end, policy)
}
