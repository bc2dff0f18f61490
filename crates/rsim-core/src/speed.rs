//! Speed bands: a coarse road-class stand-in chosen from segment length.
//!
//! Decoded routes carry no road metadata, so the cruising speed for a leg is
//! inferred from how long the leg is: long straight legs are assumed to be
//! highway, medium legs arterial roads, and short legs local streets.

/// Coarse speed classification for one route segment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedBand {
    /// Segment longer than `SpeedPolicy::highway_min_m`.
    Highway,
    /// Segment between `arterial_min_m` and `highway_min_m` (inclusive).
    Arterial,
    /// Segment shorter than `arterial_min_m`.
    Local,
}

impl SpeedBand {
    /// Human-readable label, useful for log fields and CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            SpeedBand::Highway  => "highway",
            SpeedBand::Arterial => "arterial",
            SpeedBand::Local    => "local",
        }
    }
}

impl std::fmt::Display for SpeedBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distance thresholds and cruising speeds for each [`SpeedBand`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpeedPolicy {
    /// Segments strictly longer than this are `Highway`.  Default: 2000 m.
    pub highway_min_m: f64,
    /// Segments at least this long (and not highway) are `Arterial`.
    /// Default: 500 m.
    pub arterial_min_m: f64,
    /// Highway cruising speed.  Default: 80 km/h.
    pub highway_kmh: f64,
    /// Arterial cruising speed.  Default: 40 km/h.
    pub arterial_kmh: f64,
    /// Local speed as a fraction of `arterial_kmh`.  Default: 0.7.
    pub local_factor: f64,
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        Self {
            highway_min_m:  2_000.0,
            arterial_min_m: 500.0,
            highway_kmh:    80.0,
            arterial_kmh:   40.0,
            local_factor:   0.7,
        }
    }
}

impl SpeedPolicy {
    /// Classify a segment by its length in metres.
    pub fn band_for(&self, segment_m: f64) -> SpeedBand {
        if segment_m > self.highway_min_m {
            SpeedBand::Highway
        } else if segment_m >= self.arterial_min_m {
            SpeedBand::Arterial
        } else {
            SpeedBand::Local
        }
    }

    /// Cruising speed for `band` in km/h.
    pub fn speed_kmh(&self, band: SpeedBand) -> f64 {
        match band {
            SpeedBand::Highway  => self.highway_kmh,
            SpeedBand::Arterial => self.arterial_kmh,
            SpeedBand::Local    => self.arterial_kmh * self.local_factor,
        }
    }

    /// Cruising speed for `band` in m/s.
    #[inline]
    pub fn speed_mps(&self, band: SpeedBand) -> f64 {
        self.speed_kmh(band) / 3.6
    }
}
