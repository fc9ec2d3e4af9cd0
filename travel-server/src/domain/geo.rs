//! Geographic coordinates.

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned for coordinates outside the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
pub struct InvalidCoordinates;

/// A point on the earth's surface, in degrees.
///
/// Valid by construction: latitude is in [-90, 90] and longitude in
/// [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// Create a location, validating the ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another location in kilometres (haversine).
    ///
    /// ```
    /// use travel_server::domain::GeoLocation;
    ///
    /// let kalpetta = GeoLocation::new(11.6081, 76.0836).unwrap();
    /// let tea_gardens = GeoLocation::new(11.6854, 76.1320).unwrap();
    /// let d = kalpetta.distance_km(&tea_gardens);
    /// assert!(d > 9.0 && d < 11.0);
    /// ```
    pub fn distance_km(&self, other: &Self) -> f64 {
        self.point().haversine_distance(&other.point()) / 1000.0
    }

    fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl<'de> Deserialize<'de> for GeoLocation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            latitude: f64,
            longitude: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.latitude, raw.longitude).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates() {
        let loc = GeoLocation::new(11.6854, 76.1320).unwrap();
        assert!((loc.latitude() - 11.6854).abs() < f64::EPSILON);
        assert!((loc.longitude() - 76.1320).abs() < f64::EPSILON);
    }

    #[test]
    fn boundary_coordinates() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn invalid_coordinates() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn distance_to_self_is_zero() {
        let loc = GeoLocation::new(11.6664, 76.1788).unwrap();
        assert!(loc.distance_km(&loc).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoLocation::new(11.6664, 76.1788).unwrap();
        let b = GeoLocation::new(11.7867, 76.1693).unwrap();
        assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoLocation::new(0.0, 0.0).unwrap();
        let b = GeoLocation::new(1.0, 0.0).unwrap();
        let d = a.distance_km(&b);
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn deserialize_validates() {
        let ok: GeoLocation = serde_json::from_str(r#"{"latitude": 11.6, "longitude": 76.1}"#).unwrap();
        assert!((ok.latitude() - 11.6).abs() < f64::EPSILON);

        assert!(serde_json::from_str::<GeoLocation>(r#"{"latitude": 100, "longitude": 0}"#).is_err());
    }
}
