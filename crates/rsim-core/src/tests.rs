//! Unit tests for rsim-core primitives.

#[cfg(test)]
mod ids {
    use crate::RunId;

    #[test]
    fn next_increments() {
        assert_eq!(RunId::default().next(), RunId(1));
        assert!(RunId(1) < RunId(2));
    }

    #[test]
    fn display() {
        assert_eq!(RunId(7).to_string(), "RunId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(30.694, -88.043);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (GeoPoint::new(38.5, -120.2), GeoPoint::new(40.7, -120.95)),
            (GeoPoint::new(-33.86, 151.21), GeoPoint::new(51.5, -0.12)),
            (GeoPoint::new(0.0, 179.9), GeoPoint::new(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            assert!((a.distance_m(b) - b.distance_m(a)).abs() < 1e-6, "{a} {b}");
        }
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111.195 km on a 6371 km sphere
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn antimeridian_is_short() {
        let a = GeoPoint::new(0.0, 179.9);
        let b = GeoPoint::new(0.0, -179.9);
        assert!(a.distance_m(b) < 25_000.0);
    }

    #[test]
    fn nan_propagates() {
        let a = GeoPoint::new(f64::NAN, 0.0);
        assert!(a.distance_m(GeoPoint::new(1.0, 1.0)).is_nan());
        assert!(!a.is_finite());
    }

    #[test]
    fn cardinal_bearings() {
        let o = GeoPoint::new(0.0, 0.0);
        assert!((o.bearing_deg(GeoPoint::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((o.bearing_deg(GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((o.bearing_deg(GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((o.bearing_deg(GeoPoint::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_in_range() {
        let a = GeoPoint::new(38.5, -120.2);
        for b in [GeoPoint::new(40.7, -120.95), GeoPoint::new(10.0, 100.0), a] {
            let brg = a.bearing_deg(b);
            assert!((0.0..360.0).contains(&brg), "{brg}");
        }
    }

    #[test]
    fn interpolate_endpoints_and_midpoint() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(12.0, 16.0);
        assert_eq!(a.interpolate(b, 0.0), a);
        assert_eq!(a.interpolate(b, 1.0), b);
        assert_eq!(a.interpolate(b, 0.5), GeoPoint::new(11.0, 18.0));
    }

    #[test]
    fn offset_moves_expected_distance() {
        let p = GeoPoint::new(45.0, 7.0);
        let q = p.offset_m(3.0, 4.0);
        assert!((p.distance_m(q) - 5.0).abs() < 0.01, "got {}", p.distance_m(q));
    }

    #[test]
    fn parse_lat_lon() {
        let p: GeoPoint = " 38.5 , -120.2".parse().unwrap();
        assert_eq!(p, GeoPoint::new(38.5, -120.2));
        assert!("38.5".parse::<GeoPoint>().is_err());
        assert!("abc,1".parse::<GeoPoint>().is_err());
        assert!("NaN,1".parse::<GeoPoint>().is_err());
    }
}

#[cfg(test)]
mod speed {
    use crate::{SpeedBand, SpeedPolicy};

    #[test]
    fn bands_by_length() {
        let p = SpeedPolicy::default();
        assert_eq!(p.band_for(2_500.0), SpeedBand::Highway);
        assert_eq!(p.band_for(2_000.0), SpeedBand::Arterial);
        assert_eq!(p.band_for(1_000.0), SpeedBand::Arterial);
        assert_eq!(p.band_for(500.0), SpeedBand::Arterial);
        assert_eq!(p.band_for(499.9), SpeedBand::Local);
        assert_eq!(p.band_for(0.0), SpeedBand::Local);
    }

    #[test]
    fn band_speeds() {
        let p = SpeedPolicy::default();
        assert_eq!(p.speed_kmh(SpeedBand::Highway), 80.0);
        assert_eq!(p.speed_kmh(SpeedBand::Arterial), 40.0);
        assert!((p.speed_kmh(SpeedBand::Local) - 28.0).abs() < 1e-9);
        assert!((p.speed_mps(SpeedBand::Arterial) - 11.111).abs() < 1e-3);
    }

    #[test]
    fn display() {
        assert_eq!(SpeedBand::Highway.to_string(), "highway");
        assert_eq!(SpeedBand::Local.to_string(), "local");
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{SimClock, Tick};

    #[test]
    fn tick_display() {
        assert_eq!(Tick(10).to_string(), "T10");
        assert_eq!(Tick::ZERO, Tick::default());
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(Duration::from_millis(500));
        assert_eq!(clock.elapsed(), Duration::ZERO);
        clock.advance();
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed(), Duration::from_millis(1_500));
    }

    #[test]
    fn ticks_for_distance_rounds_up() {
        let clock = SimClock::new(Duration::from_millis(500));
        // 40 km/h over 1000 m: 5.555… m per tick → 180 ticks
        assert_eq!(clock.ticks_for_distance(1_000.0, 40.0 / 3.6), 180);
        assert_eq!(clock.ticks_for_distance(1.0, 10.0), 1);
    }

    #[test]
    fn ticks_for_degenerate_leg_is_one() {
        let clock = SimClock::new(Duration::from_millis(500));
        assert_eq!(clock.ticks_for_distance(0.0, 10.0), 1);
        assert_eq!(clock.ticks_for_distance(100.0, 0.0), 1);
        assert_eq!(clock.ticks_for_distance(f64::NAN, 10.0), 1);
    }
}

#[cfg(test)]
mod config {
    use crate::EngineConfig;

    #[test]
    fn default_is_valid() {
        let cfg = EngineConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.tick_period().as_millis(), 500);
    }

    #[test]
    fn zero_tick_rejected() {
        let cfg = EngineConfig { tick_period_ms: 0, ..EngineConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn negative_noise_rejected() {
        let cfg = EngineConfig { position_noise_m: -1.0, ..EngineConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.speed.arterial_min_m = 5_000.0;
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let cfg: EngineConfig =
            serde_json::from_str(r#"{ "tick_period_ms": 100, "speed": { "highway_kmh": 110.0 } }"#).unwrap();
        assert_eq!(cfg.tick_period_ms, 100);
        assert_eq!(cfg.speed.highway_kmh, 110.0);
        assert_eq!(cfg.speed.arterial_kmh, 40.0);
        assert_eq!(cfg.position_noise_m, 1.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::{GeoPoint, NoiseRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = NoiseRng::new(12345);
        let mut r2 = NoiseRng::new(12345);
        let p = GeoPoint::new(10.0, 10.0);
        for _ in 0..100 {
            assert_eq!(r1.jitter_point(p, 1.0), r2.jitter_point(p, 1.0));
        }
    }

    #[test]
    fn run_salt_changes_sequence() {
        let mut r1 = NoiseRng::for_run(Some(1), 1);
        let mut r2 = NoiseRng::for_run(Some(1), 2);
        let a = r1.jitter_speed(10.0, 5.0);
        let b = r2.jitter_speed(10.0, 5.0);
        assert_ne!(a, b);
    }

    #[test]
    fn point_jitter_bounded() {
        let mut rng = NoiseRng::new(7);
        let p = GeoPoint::new(48.85, 2.35);
        for _ in 0..1_000 {
            let q = rng.jitter_point(p, 1.0);
            assert!(p.distance_m(q) <= 1.0 + 1e-6);
        }
        assert_eq!(rng.jitter_point(p, 0.0), p);
    }

    #[test]
    fn speed_jitter_bounded_and_non_negative() {
        let mut rng = NoiseRng::new(7);
        for _ in 0..1_000 {
            let v = rng.jitter_speed(11.0, 1.0);
            assert!((10.0..=12.0).contains(&v));
            assert!(rng.jitter_speed(0.2, 1.0) >= 0.0);
        }
        assert_eq!(rng.jitter_speed(5.0, 0.0), 5.0);
    }
}
