//! Plain data row written by output backends.

use rsim_engine::PublishedFix;

/// One published fix, numbered in publication order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixRow {
    /// 0-based publication sequence number within the trace.
    pub seq:         u64,
    pub lat:         f64,
    pub lon:         f64,
    pub altitude_m:  f32,
    pub speed_mps:   f32,
    pub bearing_deg: f32,
    pub active:      bool,
}

impl FixRow {
    pub const HEADER: [&'static str; 7] =
        ["seq", "lat", "lon", "altitude_m", "speed_mps", "bearing_deg", "active"];

    pub fn from_fix(seq: u64, fix: &PublishedFix) -> Self {
        Self {
            seq,
            lat:         fix.lat(),
            lon:         fix.lon(),
            altitude_m:  fix.altitude_m,
            speed_mps:   fix.speed_mps,
            bearing_deg: fix.bearing_deg,
            active:      fix.active,
        }
    }
}
