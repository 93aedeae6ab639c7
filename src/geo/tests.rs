// Geolocation module tests.

use super::*;

const SAN_FRANCISCO: Location = Location {
    latitude: 37.7749,
    longitude: -122.4194,
};
const LONDON: Location = Location {
    latitude: 51.5007,
    longitude: -0.1246,
};
const PARIS: Location = Location {
    latitude: 48.8566,
    longitude: 2.3522,
};

#[test]
fn test_distance_identity() {
    assert_eq!(distance_meters(SAN_FRANCISCO, SAN_FRANCISCO), 0.0);
    let origin = Location::new(0.0, 0.0);
    assert_eq!(distance_meters(origin, origin), 0.0);
}

#[test]
fn test_distance_symmetry() {
    let pairs = [
        (SAN_FRANCISCO, LONDON),
        (LONDON, PARIS),
        (Location::new(0.0, 0.0), Location::new(-45.0, 120.0)),
        (Location::new(89.9, 10.0), Location::new(-89.9, -10.0)),
    ];
    for (a, b) in pairs {
        assert_eq!(distance_meters(a, b), distance_meters(b, a));
    }
}

#[test]
fn test_distance_triangle_inequality() {
    // Approximate: allow floating-point tolerance.
    let a = SAN_FRANCISCO;
    let b = LONDON;
    let c = PARIS;
    let epsilon = 1e-6;
    assert!(distance_meters(a, c) <= distance_meters(a, b) + distance_meters(b, c) + epsilon);
}

#[test]
fn test_distance_one_degree_longitude_at_equator() {
    // 1 degree of longitude at the equator is ~111.2 km.
    let d = distance_meters(Location::new(0.0, 0.0), Location::new(0.0, 1.0));
    assert!(
        (d - 111_195.0).abs() < 50.0,
        "expected ~111195m, got {}",
        d
    );
}

#[test]
fn test_distance_london_to_paris() {
    let d = distance_meters(LONDON, PARIS);
    let expected = 343_000.0;
    assert!(
        (d - expected).abs() < expected * 0.01,
        "expected ~{}m +/- 1%, got {}",
        expected,
        d
    );
}

#[test]
fn test_distance_nan_propagates_on_unvalidated_input() {
    // Skipping is_valid is a caller contract violation; the result is NaN,
    // not a silently corrected value.
    let bad = Location::new(f64::NAN, 0.0);
    assert!(distance_meters(bad, SAN_FRANCISCO).is_nan());
}

#[test]
fn test_classify_boundaries() {
    assert_eq!(classify(0.0), AccuracyTier::Excellent);
    assert_eq!(classify(10.0), AccuracyTier::Excellent);
    assert_eq!(classify(10.01), AccuracyTier::Good);
    assert_eq!(classify(25.0), AccuracyTier::Good);
    assert_eq!(classify(25.01), AccuracyTier::Fair);
    assert_eq!(classify(50.0), AccuracyTier::Fair);
    assert_eq!(classify(50.01), AccuracyTier::Poor);
    assert_eq!(classify(100_000.0), AccuracyTier::Poor);
}

#[test]
fn test_tier_metadata() {
    assert_eq!(AccuracyTier::Excellent.as_str(), "excellent");
    assert_eq!(AccuracyTier::parse("poor"), Some(AccuracyTier::Poor));
    assert_eq!(AccuracyTier::parse("nearby"), None);
    assert_eq!(
        AccuracyTier::Excellent.description(),
        "Exact location match"
    );
    assert_eq!(AccuracyTier::Poor.color(), "red");
}

#[test]
fn test_is_match_threshold_is_inclusive() {
    // Construct two points roughly 50m apart along the equator and check the
    // predicate against the measured distance rather than guessing.
    let a = Location::new(0.0, 0.0);
    let b = Location::new(0.0, 0.00045);
    let d = distance_meters(a, b);
    assert_eq!(is_match_within(a, b, d), true);
    assert_eq!(is_match_within(a, b, d - 0.01), false);
}

#[test]
fn test_is_match_default_threshold() {
    let near = Location::new(37.77492, -122.41942);
    assert!(is_match(SAN_FRANCISCO, near));

    let far = Location::new(37.7849, -122.4194); // ~1.1km north
    assert!(!is_match(SAN_FRANCISCO, far));
}

#[test]
fn test_is_valid_boundaries() {
    assert!(is_valid(Location::new(90.0, 0.0)));
    assert!(is_valid(Location::new(-90.0, 0.0)));
    assert!(is_valid(Location::new(0.0, 180.0)));
    assert!(is_valid(Location::new(0.0, -180.0)));

    assert!(!is_valid(Location::new(90.0001, 0.0)));
    assert!(!is_valid(Location::new(-90.0001, 0.0)));
    assert!(!is_valid(Location::new(0.0, 180.0001)));
    assert!(!is_valid(Location::new(0.0, -180.0001)));

    assert!(!is_valid(Location::new(f64::NAN, 0.0)));
    assert!(!is_valid(Location::new(0.0, f64::NAN)));
    assert!(!is_valid(Location::new(f64::INFINITY, 0.0)));
    assert!(!is_valid(Location::new(0.0, f64::NEG_INFINITY)));
}

#[test]
fn test_format_distance() {
    assert_eq!(format_distance(0.0), "0m");
    assert_eq!(format_distance(999.0), "999m");
    assert_eq!(format_distance(999.4), "999m");
    assert_eq!(format_distance(1000.0), "1.0km");
    assert_eq!(format_distance(1500.0), "1.5km");
    assert_eq!(format_distance(343_000.0), "343.0km");
}

#[test]
fn test_resolution_scenario_san_francisco() {
    // A resolution response submitted a short walk from the reported issue
    // should classify as good/fair and pass the default geofence check.
    let original = SAN_FRANCISCO;
    let response = Location::new(37.7751, -122.4196);

    let d = distance_meters(original, response);
    assert!(d > 20.0 && d < 35.0, "expected ~25-30m, got {}", d);

    let tier = classify(d);
    assert!(
        tier == AccuracyTier::Good || tier == AccuracyTier::Fair,
        "unexpected tier {:?} for {}m",
        tier,
        d
    );
    assert!(is_match(original, response));
}
