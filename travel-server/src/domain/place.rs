//! Points of interest.

use serde::{Deserialize, Serialize};

use super::error::require;
use super::{Category, CoreError, GeoLocation};

/// Highest rating a place can carry.
pub const MAX_PLACE_RATING: f64 = 5.0;

/// A catalog entry for a point of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    /// Unique within the catalog for the process lifetime.
    pub id: u64,
    pub name: String,
    /// Average rating in [0, 5].
    pub rating: f64,
    pub category: Category,
    /// Distance from the traveler as last surveyed, used when live
    /// coordinates are unavailable.
    pub distance_km: f64,
    pub review_count: u32,
    pub description: Option<String>,
    /// Human-readable locality, e.g. "Kalpetta, Wayanad".
    pub location: Option<String>,
    pub coordinates: Option<GeoLocation>,
}

impl Place {
    /// Distance to use for "near you" ordering.
    ///
    /// Computed from `origin` when both ends have coordinates, otherwise the
    /// surveyed `distance_km`.
    pub fn distance_from(&self, origin: Option<&GeoLocation>) -> f64 {
        match (origin, self.coordinates.as_ref()) {
            (Some(origin), Some(coords)) => origin.distance_km(coords),
            _ => self.distance_km,
        }
    }
}

/// Unvalidated input for a new place, as submitted by a user or a seed file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPlace {
    pub name: String,
    pub category: String,
    pub rating: f64,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default, alias = "reviews_count")]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl NewPlace {
    /// Validate the input and produce a catalog entry with the given id.
    pub fn into_place(self, id: u64) -> Result<Place, CoreError> {
        let name = require("name", &self.name)?;
        let category = Category::parse(&self.category)
            .map_err(|e| CoreError::validation("category", e.to_string()))?;

        if !(0.0..=MAX_PLACE_RATING).contains(&self.rating) {
            return Err(CoreError::validation("rating", "must be between 0 and 5"));
        }

        let distance_km = self.distance_km.unwrap_or(0.0);
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(CoreError::validation("distance_km", "must be non-negative"));
        }

        let coordinates = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(
                GeoLocation::new(lat, lng)
                    .map_err(|e| CoreError::validation("coordinates", e.to_string()))?,
            ),
            (None, None) => None,
            _ => {
                return Err(CoreError::validation(
                    "coordinates",
                    "latitude and longitude must be given together",
                ));
            }
        };

        Ok(Place {
            id,
            name,
            rating: self.rating,
            category,
            distance_km,
            review_count: self.review_count.unwrap_or(0),
            description: non_blank(self.description),
            location: non_blank(self.location),
            coordinates,
        })
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
