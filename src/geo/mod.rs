//! Geolocation utilities for location matching and validation.
//!
//! This module is the verification core of the service: it decides how well a
//! claimed resolution location matches the location of the original report.
//! Everything here is a pure function over plain values with no I/O or
//! shared state, so any task may call in without coordination.
//!
//! Key functions:
//! - `distance_meters()` - Great-circle distance between two coordinates
//! - `classify()` - Buckets a distance into an accuracy tier
//! - `is_match()` - Pass/fail geofence check used to gate resolutions

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, as used by the Haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Accepted tolerance (in meters) for confirming that a resolution response
/// was recorded at the reported issue's location.
pub const DEFAULT_MATCH_THRESHOLD_METERS: f64 = 50.0;

/// A geographic coordinate pair in decimal degrees.
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180]; use
/// [`is_valid`] to check externally supplied values before trusting them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Location {
    /// Convenience constructor.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// How closely a claimed location matches a reference location.
///
/// Derived from a distance via fixed thresholds; carries presentation
/// metadata (description and display color) alongside the level itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyTier {
    /// Within 10 meters of the reference location.
    Excellent,
    /// Within 25 meters.
    Good,
    /// Within 50 meters.
    Fair,
    /// More than 50 meters away.
    Poor,
}

impl AccuracyTier {
    /// Stable lowercase name, used for database storage and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccuracyTier::Excellent => "excellent",
            AccuracyTier::Good => "good",
            AccuracyTier::Fair => "fair",
            AccuracyTier::Poor => "poor",
        }
    }

    /// Parses a stored tier name. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "excellent" => Some(AccuracyTier::Excellent),
            "good" => Some(AccuracyTier::Good),
            "fair" => Some(AccuracyTier::Fair),
            "poor" => Some(AccuracyTier::Poor),
            _ => None,
        }
    }

    /// Human-readable description of the match quality.
    pub fn description(&self) -> &'static str {
        match self {
            AccuracyTier::Excellent => "Exact location match",
            AccuracyTier::Good => "Very close to original location",
            AccuracyTier::Fair => "Close to original location",
            AccuracyTier::Poor => "Far from original location",
        }
    }

    /// Display color hint for clients rendering the tier.
    pub fn color(&self) -> &'static str {
        match self {
            AccuracyTier::Excellent => "green",
            AccuracyTier::Good => "blue",
            AccuracyTier::Fair => "yellow",
            AccuracyTier::Poor => "red",
        }
    }
}

/// Calculates the great-circle distance between two points using the
/// Haversine formula, in meters.
///
/// Inputs are not range-validated here; callers are expected to gate
/// untrusted coordinates with [`is_valid`] first. Non-finite inputs
/// propagate (the result will be NaN), never silently corrected.
pub fn distance_meters(a: Location, b: Location) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Validates location coordinates.
///
/// True iff both fields are finite, latitude is within [-90, 90] and
/// longitude within [-180, 180]. Call this before trusting any externally
/// supplied coordinate (e.g. a device GPS reading).
pub fn is_valid(location: Location) -> bool {
    location.latitude.is_finite()
        && location.longitude.is_finite()
        && location.latitude >= -90.0
        && location.latitude <= 90.0
        && location.longitude >= -180.0
        && location.longitude <= 180.0
}

/// Maps a distance in meters to an accuracy tier.
///
/// Boundaries are inclusive on the upper end: exactly 10 m is still
/// `Excellent`, exactly 25 m is `Good`, exactly 50 m is `Fair`.
pub fn classify(distance_meters: f64) -> AccuracyTier {
    if distance_meters <= 10.0 {
        AccuracyTier::Excellent
    } else if distance_meters <= 25.0 {
        AccuracyTier::Good
    } else if distance_meters <= 50.0 {
        AccuracyTier::Fair
    } else {
        AccuracyTier::Poor
    }
}

/// Checks whether two locations are within the default acceptance range
/// ([`DEFAULT_MATCH_THRESHOLD_METERS`]) for issue resolution.
pub fn is_match(original: Location, response: Location) -> bool {
    is_match_within(original, response, DEFAULT_MATCH_THRESHOLD_METERS)
}

/// Checks whether two locations are within `threshold_meters` of each other.
/// The boundary is inclusive: a distance of exactly `threshold_meters` passes.
pub fn is_match_within(original: Location, response: Location, threshold_meters: f64) -> bool {
    distance_meters(original, response) <= threshold_meters
}

/// Formats a distance for display: whole meters below 1 km, otherwise
/// kilometers with one decimal place.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.round() as i64)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
