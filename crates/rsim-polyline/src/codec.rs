//! Polyline decode / encode.

use rsim_core::GeoPoint;
use tracing::warn;

use crate::{PolylineError, PolylineResult};

/// Fixed-point scale of the encoding: 1e5 units per degree.
pub const PRECISION: f64 = 1e5;

/// First and last byte values that may appear in an encoded polyline.
const MIN_CHAR: u8 = 63;
const MAX_CHAR: u8 = 126;

/// Continuation flag within one 6-bit group.
const CONTINUE: u64 = 0x20;

// ── Decoder ───────────────────────────────────────────────────────────────────

/// Streaming polyline decoder.
///
/// Yields one `Ok(GeoPoint)` per complete (lat, lng) pair.  On malformed
/// input it yields a single `Err` and then stops; the point being assembled
/// when the error occurred is never emitted.  The decoder never reads past
/// the end of its input.
pub struct Decoder<'a> {
    input: &'a str,
    pos:   usize,
    lat:   i64,
    lon:   i64,
    done:  bool,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0, lat: 0, lon: 0, done: false }
    }

    /// Read one zig-zag varint and return the signed delta.
    fn read_delta(&mut self) -> PolylineResult<i64> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut result: u64 = 0;
        let mut shift: u32 = 0;

        loop {
            let Some(&b) = bytes.get(self.pos) else {
                return Err(PolylineError::Truncated { offset: start });
            };
            if !(MIN_CHAR..=MAX_CHAR).contains(&b) {
                let ch = self.input[self.pos..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(PolylineError::InvalidChar { offset: self.pos, ch });
            }
            let group = u64::from(b - MIN_CHAR);
            let bits = group & 0x1f;
            // Bits shifted beyond 64 would be silently lost.
            if shift > 60 || (shift == 60 && bits > 0xf) {
                return Err(PolylineError::Overflow { offset: start });
            }
            result |= bits << shift;
            shift += 5;
            self.pos += 1;
            if group & CONTINUE == 0 {
                break;
            }
        }

        let delta = if result & 1 != 0 {
            !(result >> 1) as i64
        } else {
            (result >> 1) as i64
        };
        Ok(delta)
    }
}

impl Iterator for Decoder<'_> {
    type Item = PolylineResult<GeoPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.input.len() {
            return None;
        }
        let pair = self.read_delta().and_then(|d_lat| Ok((d_lat, self.read_delta()?)));
        match pair {
            Ok((d_lat, d_lon)) => {
                self.lat = self.lat.wrapping_add(d_lat);
                self.lon = self.lon.wrapping_add(d_lon);
                Some(Ok(GeoPoint::new(self.lat as f64 / PRECISION, self.lon as f64 / PRECISION)))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Decoder<'_> {}

// ── Convenience functions ─────────────────────────────────────────────────────

/// Decode `encoded`, keeping every complete point.
///
/// Malformed input is not fatal: decoding stops at the first bad value, the
/// incomplete trailing point is discarded, and a warning is logged.  The
/// empty string decodes to an empty vector.
pub fn decode(encoded: &str) -> Vec<GeoPoint> {
    let mut points = Vec::new();
    for item in Decoder::new(encoded) {
        match item {
            Ok(p) => points.push(p),
            Err(e) => {
                warn!(error = %e, kept = points.len(), "malformed polyline, keeping decoded prefix");
                break;
            }
        }
    }
    points
}

/// Decode `encoded`, failing on the first malformed value.
pub fn try_decode(encoded: &str) -> PolylineResult<Vec<GeoPoint>> {
    Decoder::new(encoded).collect()
}

/// Encode `points` at 1e-5 degree precision.
pub fn encode(points: &[GeoPoint]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let (mut prev_lat, mut prev_lon) = (0i64, 0i64);
    for p in points {
        let lat = (p.lat * PRECISION).round() as i64;
        let lon = (p.lon * PRECISION).round() as i64;
        write_value(&mut out, lat.wrapping_sub(prev_lat));
        write_value(&mut out, lon.wrapping_sub(prev_lon));
        prev_lat = lat;
        prev_lon = lon;
    }
    out
}

fn write_value(out: &mut String, value: i64) {
    let mut v = ((value << 1) ^ (value >> 63)) as u64;
    while v >= CONTINUE {
        out.push(char::from((CONTINUE | (v & 0x1f)) as u8 + MIN_CHAR));
        v >>= 5;
    }
    out.push(char::from(v as u8 + MIN_CHAR));
}
