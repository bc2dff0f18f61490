//! Built-in demo route.
//!
//! A short drive through downtown Mobile, Alabama, with legs chosen to hit
//! every speed band.  Encoded once at startup so the demo exercises the same
//! decode path a directions service response would take.

use rsim_core::GeoPoint;

/// Waypoints of the built-in route.
pub fn builtin_waypoints() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(30.69440, -88.04310), // Government St & Royal St
        GeoPoint::new(30.69440, -88.04620), // ~300 m west: local
        GeoPoint::new(30.69020, -88.04700), // ~470 m south: local
        GeoPoint::new(30.68480, -88.04650), // ~600 m south: arterial
        GeoPoint::new(30.66380, -88.04990), // ~2.3 km south: highway
        GeoPoint::new(30.66300, -88.05600), // ~590 m west: arterial
    ]
}

/// Requested start and end for the built-in route.  The end is deliberately
/// ~120 m past the last waypoint so the builder appends it.
pub fn builtin_endpoints() -> (GeoPoint, GeoPoint) {
    let points = builtin_waypoints();
    let start = points[0];
    let end = points[points.len() - 1].offset_m(0.0, -120.0);
    (start, end)
}
