//! Geographic coordinate type and great-circle helpers.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Polyline decoding works at
//! 1e-5 degree precision and noise offsets are sub-metre, both of which
//! need double precision to survive interpolation without drift.
//!
//! No range validation is performed: out-of-range coordinates are accepted
//! and propagated, and NaN in gives NaN out.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Mean Earth radius used by the haversine formula, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both components are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Symmetric, and exactly `0.0` for identical points.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial bearing (forward azimuth) from `self` towards `other`, in
    /// degrees within `[0, 360)`.  Identical points yield `0.0`.
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

        let deg = y.atan2(x).to_degrees().rem_euclid(360.0);
        // rem_euclid can round a tiny negative angle up to exactly 360.
        if deg >= 360.0 { 0.0 } else { deg }
    }

    /// Linear interpolation in degree space; `t = 0` is `self`, `t = 1` is
    /// `other`.  Adequate for the short straight legs of a decoded route.
    #[inline]
    pub fn interpolate(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }

    /// Shift the point by `north_m` / `east_m` metres using a local
    /// equirectangular approximation.  At the poles the east component is
    /// dropped.
    pub fn offset_m(self, north_m: f64, east_m: f64) -> GeoPoint {
        let d_lat = (north_m / EARTH_RADIUS_M).to_degrees();
        let cos_lat = self.lat.to_radians().cos();
        let d_lon = if cos_lat.abs() < 1e-12 {
            0.0
        } else {
            (east_m / (EARTH_RADIUS_M * cos_lat)).to_degrees()
        };
        GeoPoint { lat: self.lat + d_lat, lon: self.lon + d_lon }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Parses `"lat,lon"` (whitespace around either number is ignored).
impl FromStr for GeoPoint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CoreError::Parse(format!("expected \"lat,lon\", got {s:?}")))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|e| CoreError::Parse(format!("latitude {lat:?}: {e}")))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|e| CoreError::Parse(format!("longitude {lon:?}: {e}")))?;
        let point = GeoPoint::new(lat, lon);
        if !point.is_finite() {
            return Err(CoreError::Parse(format!("non-finite coordinate {s:?}")));
        }
        Ok(point)
    }
}
