//! The immutable `Route` and its derived per-segment metrics.

use rsim_core::GeoPoint;

// ── Segment ───────────────────────────────────────────────────────────────────

/// The straight leg between two consecutive route points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub from:        GeoPoint,
    pub to:          GeoPoint,
    /// Great-circle length, metres.
    pub distance_m:  f64,
    /// Initial bearing from `from` to `to`, degrees in `[0, 360)`.
    pub bearing_deg: f64,
}

impl Segment {
    pub fn new(from: GeoPoint, to: GeoPoint) -> Self {
        Self {
            from,
            to,
            distance_m:  from.distance_m(to),
            bearing_deg: from.bearing_deg(to),
        }
    }
}

// ── RouteStats ────────────────────────────────────────────────────────────────

/// Per-segment distances and bearings plus the total length.
///
/// Computed once when the `Route` is built.  `total_m` is the sum of all
/// segment distances.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteStats {
    segments: Vec<Segment>,
    total_m:  f64,
}

impl RouteStats {
    pub fn compute(points: &[GeoPoint]) -> Self {
        let segments: Vec<Segment> = points
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect();
        let total_m = segments.iter().map(|s| s.distance_m).sum();
        Self { segments, total_m }
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    #[inline]
    pub fn total_m(&self) -> f64 {
        self.total_m
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered, immutable sequence of points.
///
/// Index 0 is the start and the last index is the end.  A route with fewer
/// than two points has no segments; it is valid but there is nothing to
/// simulate along it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    points: Vec<GeoPoint>,
    stats:  RouteStats,
}

impl Route {
    /// Build a route from `points`, computing its `RouteStats`.
    pub fn new(points: Vec<GeoPoint>) -> Self {
        let stats = RouteStats::compute(&points);
        Self { points, stats }
    }

    /// An empty route, the "no route found" result.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn stats(&self) -> &RouteStats {
        &self.stats
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Option<GeoPoint> {
        self.points.first().copied()
    }

    #[inline]
    pub fn end(&self) -> Option<GeoPoint> {
        self.points.last().copied()
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.stats.segments.len()
    }

    #[inline]
    pub fn total_m(&self) -> f64 {
        self.stats.total_m
    }

    /// `true` if the route has at least one segment to traverse.
    #[inline]
    pub fn is_simulatable(&self) -> bool {
        self.points.len() >= 2
    }
}

impl From<Vec<GeoPoint>> for Route {
    fn from(points: Vec<GeoPoint>) -> Self {
        Route::new(points)
    }
}
