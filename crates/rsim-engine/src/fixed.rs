//! Fixed-point mode: hold a single position active until released.

use rsim_core::GeoPoint;

use crate::PublishedFix;

/// A position the engine is holding, with the bearing it had when the hold
/// began.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedPoint {
    pub position:    GeoPoint,
    pub bearing_deg: f64,
    pub altitude_m:  f32,
}

impl FixedPoint {
    pub fn new(position: GeoPoint, bearing_deg: f64, altitude_m: f32) -> Self {
        Self { position, bearing_deg, altitude_m }
    }

    /// The `active = true`, zero-speed fix announcing the hold.
    pub fn activation_fix(&self) -> PublishedFix {
        self.fix(self.position, true)
    }

    /// The `active = false` fix ending the hold, at `at` if given, else at
    /// the held position.
    pub fn deactivation_fix(&self, at: Option<GeoPoint>) -> PublishedFix {
        self.fix(at.unwrap_or(self.position), false)
    }

    fn fix(&self, position: GeoPoint, active: bool) -> PublishedFix {
        PublishedFix {
            position,
            altitude_m:  self.altitude_m,
            speed_mps:   0.0,
            bearing_deg: self.bearing_deg as f32,
            active,
        }
    }
}
