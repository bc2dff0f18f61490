//! Turning a decoded point sequence plus the requested endpoints into a
//! simulatable `Route`.

use rsim_core::GeoPoint;
use tracing::debug;

use crate::{Route, RouteError, RouteResult};

/// Thresholds used by [`build_route`].
///
/// Neither value is physics; both are tunable policy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutePolicy {
    /// A requested endpoint farther than this from the decoded path's
    /// matching end is added to the route explicitly.  Default: 50 m.
    pub snap_threshold_m: f64,

    /// Requested endpoints closer than this are rejected.  Default: 100 m.
    pub min_separation_m: f64,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self { snap_threshold_m: 50.0, min_separation_m: 100.0 }
    }
}

/// Build a route from a decoded path and the endpoints the user asked for.
///
/// 1. An empty `decoded` yields an empty route ("no route found").
/// 2. Endpoints closer than `policy.min_separation_m` fail with
///    [`RouteError::TooShort`].
/// 3. `requested_start` is prepended if it lies more than
///    `policy.snap_threshold_m` from the first decoded point, and
///    `requested_end` appended likewise for the last one.
pub fn build_route(
    decoded:         Vec<GeoPoint>,
    requested_start: GeoPoint,
    requested_end:   GeoPoint,
    policy:          &RoutePolicy,
) -> RouteResult<Route> {
    for p in [requested_start, requested_end] {
        if !p.is_finite() {
            return Err(RouteError::NonFinite(p));
        }
    }

    let (Some(&first), Some(&last)) = (decoded.first(), decoded.last()) else {
        debug!("decoded path is empty, no route");
        return Ok(Route::empty());
    };

    let separation_m = requested_start.distance_m(requested_end);
    if separation_m < policy.min_separation_m {
        return Err(RouteError::TooShort { separation_m, min_m: policy.min_separation_m });
    }

    let prepend = requested_start.distance_m(first) > policy.snap_threshold_m;
    let append = requested_end.distance_m(last) > policy.snap_threshold_m;

    let mut points = Vec::with_capacity(decoded.len() + prepend as usize + append as usize);
    if prepend {
        points.push(requested_start);
    }
    points.extend(decoded);
    if append {
        points.push(requested_end);
    }

    let route = Route::new(points);
    debug!(
        points = route.len(),
        total_m = route.total_m(),
        prepended = prepend,
        appended = append,
        "route built"
    );
    Ok(route)
}
