//! Unit tests for rsim-route.
//!
//! All tests use hand-written coordinates so they run without any network
//! access.

#[cfg(test)]
mod helpers {
    use rsim_core::GeoPoint;

    /// Decoded form of the reference polyline `_p~iF~ps|U_ulLnnqC_mqNvxq`@`.
    pub fn reference_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(38.5, -120.2),
            GeoPoint::new(40.7, -120.95),
            GeoPoint::new(43.252, -126.453),
        ]
    }

    /// A point `m` metres east of `p` along its parallel.
    pub fn east_of(p: GeoPoint, m: f64) -> GeoPoint {
        p.offset_m(0.0, m)
    }
}

// ── Route & RouteStats ────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use rsim_core::GeoPoint;

    use super::helpers::reference_points;
    use crate::{Route, RouteStats};

    #[test]
    fn empty_route_has_no_segments() {
        let r = Route::empty();
        assert!(r.is_empty());
        assert_eq!(r.segment_count(), 0);
        assert_eq!(r.total_m(), 0.0);
        assert!(!r.is_simulatable());
        assert_eq!(r.start(), None);
    }

    #[test]
    fn single_point_is_trivial() {
        let r = Route::new(vec![GeoPoint::new(1.0, 1.0)]);
        assert_eq!(r.segment_count(), 0);
        assert!(!r.is_simulatable());
        assert_eq!(r.start(), r.end());
    }

    #[test]
    fn segment_sum_equals_total() {
        let r = Route::new(reference_points());
        assert_eq!(r.segment_count(), 2);
        let sum: f64 = r.stats().segments().iter().map(|s| s.distance_m).sum();
        assert!(((sum - r.total_m()) / r.total_m()).abs() < 1e-3);
    }

    #[test]
    fn segments_follow_points() {
        let pts = reference_points();
        let stats = RouteStats::compute(&pts);
        let s1 = stats.segment(1).unwrap();
        assert_eq!(s1.from, pts[1]);
        assert_eq!(s1.to, pts[2]);
        assert!((s1.distance_m - pts[1].distance_m(pts[2])).abs() < 1e-9);
        assert!((0.0..360.0).contains(&s1.bearing_deg));
        assert!(stats.segment(2).is_none());
    }

    #[test]
    fn endpoints() {
        let r: Route = reference_points().into();
        assert_eq!(r.start(), Some(GeoPoint::new(38.5, -120.2)));
        assert_eq!(r.end(), Some(GeoPoint::new(43.252, -126.453)));
        assert!(r.is_simulatable());
    }
}

// ── build_route ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod build {
    use rsim_core::GeoPoint;

    use super::helpers::{east_of, reference_points};
    use crate::{RouteError, RoutePolicy, build_route};

    #[test]
    fn empty_decoded_is_empty_route() {
        let a = GeoPoint::new(0.0, 0.0);
        let r = build_route(vec![], a, east_of(a, 5_000.0), &RoutePolicy::default()).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn endpoints_near_path_are_not_added() {
        let pts = reference_points();
        let start = east_of(pts[0], 10.0);
        let end = east_of(pts[2], -20.0);
        let r = build_route(pts.clone(), start, end, &RoutePolicy::default()).unwrap();
        assert_eq!(r.points(), &pts[..]);
    }

    #[test]
    fn far_endpoints_are_added() {
        let pts = reference_points();
        let start = east_of(pts[0], 500.0);
        let end = east_of(pts[2], 75.0);
        let r = build_route(pts.clone(), start, end, &RoutePolicy::default()).unwrap();
        assert_eq!(r.len(), pts.len() + 2);
        assert_eq!(r.start(), Some(start));
        assert_eq!(r.end(), Some(end));
        assert_eq!(r.points()[1], pts[0]);
    }

    #[test]
    fn only_start_added() {
        let pts = reference_points();
        let start = east_of(pts[0], 60.0);
        let r = build_route(pts.clone(), start, pts[2], &RoutePolicy::default()).unwrap();
        assert_eq!(r.len(), pts.len() + 1);
        assert_eq!(r.start(), Some(start));
        assert_eq!(r.end(), Some(pts[2]));
    }

    #[test]
    fn close_endpoints_rejected() {
        let a = GeoPoint::new(10.0, 10.0);
        let b = east_of(a, 80.0);
        let err = build_route(vec![a, b], a, b, &RoutePolicy::default()).unwrap_err();
        match err {
            RouteError::TooShort { separation_m, min_m } => {
                assert!((separation_m - 80.0).abs() < 0.5);
                assert_eq!(min_m, 100.0);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn policy_is_configurable() {
        let a = GeoPoint::new(10.0, 10.0);
        let b = east_of(a, 80.0);
        let policy = RoutePolicy { snap_threshold_m: 5.0, min_separation_m: 50.0 };
        let r = build_route(vec![a, b], a, b, &policy).unwrap();
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn non_finite_endpoint_rejected() {
        let a = GeoPoint::new(f64::NAN, 0.0);
        let err = build_route(reference_points(), a, GeoPoint::new(1.0, 1.0), &RoutePolicy::default());
        assert!(matches!(err, Err(RouteError::NonFinite(_))));
    }
}

// ── RouteSource ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod source {
    use async_trait::async_trait;
    use rsim_core::GeoPoint;

    use crate::{
        EncodedRoute, RouteError, RoutePolicy, RouteResult, RouteSource, StaticRouteSource,
        resolve_route,
    };

    struct Unreachable;

    #[async_trait]
    impl RouteSource for Unreachable {
        async fn fetch(&self, _start: GeoPoint, _end: GeoPoint) -> RouteResult<EncodedRoute> {
            Err(RouteError::Source("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn static_source_resolves_reference_route() {
        let source = StaticRouteSource::new("_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        let start = GeoPoint::new(38.5, -120.2);
        let end = GeoPoint::new(43.252, -126.453);
        let route = resolve_route(&source, start, end, &RoutePolicy::default()).await.unwrap();
        assert_eq!(route.len(), 3);
        assert!(route.start().unwrap().distance_m(start) < 1.0);
        assert!(route.end().unwrap().distance_m(end) < 1.0);
    }

    #[tokio::test]
    async fn empty_polyline_is_no_route() {
        let source = StaticRouteSource::new("");
        let start = GeoPoint::new(0.0, 0.0);
        let end = GeoPoint::new(0.0, 1.0);
        let route = resolve_route(&source, start, end, &RoutePolicy::default()).await.unwrap();
        assert!(route.is_empty());
    }

    #[tokio::test]
    async fn source_error_propagates() {
        let err = resolve_route(
            &Unreachable,
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            &RoutePolicy::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RouteError::Source(_)));
    }
}
