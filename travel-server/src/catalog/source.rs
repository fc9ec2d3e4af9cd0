//! Seed data for the catalogs.
//!
//! A [`CatalogSource`] supplies the records a catalog starts with. The
//! built-in [`SampleCatalog`] carries the Wayanad sample content; a
//! [`JsonCatalog`] reads the same shape from disk so a deployment can ship
//! its own places and routes.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{CoreError, NewBusRoute, NewPlace};

/// Errors from loading seed data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The seed file could not be read.
    #[error("failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// The seed file is not valid JSON of the expected shape.
    #[error("failed to parse {}: {message}", path.display())]
    Json { path: PathBuf, message: String },

    /// A seed entry failed validation.
    #[error("invalid {kind} entry #{index}: {source}")]
    InvalidEntry {
        kind: &'static str,
        index: usize,
        source: CoreError,
    },
}

/// Where a catalog's initial records come from.
pub trait CatalogSource {
    /// Places to seed the place catalog with, in display order.
    fn list_places(&self) -> Result<Vec<NewPlace>, CatalogError>;

    /// Routes to seed the bus-route catalog with, in display order.
    fn list_routes(&self) -> Result<Vec<NewBusRoute>, CatalogError>;
}

/// The built-in Wayanad sample content.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleCatalog;

impl CatalogSource for SampleCatalog {
    fn list_places(&self) -> Result<Vec<NewPlace>, CatalogError> {
        Ok(vec![
            sample_place(
                "Wayanad Tea Gardens",
                "Nature",
                4.8,
                2.5,
                234,
                "Beautiful tea plantations with scenic mountain views",
                "Wayanad, Kerala",
                (11.6854, 76.1320),
            ),
            sample_place(
                "Spice Garden Restaurant",
                "Restaurant",
                4.6,
                1.2,
                156,
                "Authentic Kerala cuisine with traditional spices",
                "Kalpetta, Wayanad",
                (11.6081, 76.0836),
            ),
            sample_place(
                "Banasura Sagar Dam",
                "Adventure",
                4.7,
                5.8,
                189,
                "Largest earthen dam in India with boating facilities",
                "Padinharathara, Wayanad",
                (11.7867, 76.1693),
            ),
            sample_place(
                "Edakkal Caves",
                "Historical",
                4.5,
                8.2,
                278,
                "Ancient caves with prehistoric petroglyphs",
                "Ambukuthi Hills, Wayanad",
                (11.6664, 76.1788),
            ),
        ])
    }

    fn list_routes(&self) -> Result<Vec<NewBusRoute>, CatalogError> {
        Ok(vec![
            NewBusRoute::new("Sulthan Bathery - Pala", "7:00 PM", "Rs 280").with_duration("10h 30m"),
            NewBusRoute::new("Kalpetta - Kochi", "6:30 AM", "Rs 240").with_duration("6h 45m"),
            NewBusRoute::new("Mananthavady - Kozhikode", "5:45 PM", "Rs 180")
                .with_duration("4h 15m"),
        ])
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_place(
    name: &str,
    category: &str,
    rating: f64,
    distance_km: f64,
    review_count: u32,
    description: &str,
    location: &str,
    (latitude, longitude): (f64, f64),
) -> NewPlace {
    NewPlace {
        name: name.to_string(),
        category: category.to_string(),
        rating,
        distance_km: Some(distance_km),
        review_count: Some(review_count),
        description: Some(description.to_string()),
        location: Some(location.to_string()),
        latitude: Some(latitude),
        longitude: Some(longitude),
    }
}

/// On-disk seed file layout.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    places: Vec<NewPlace>,
    #[serde(default)]
    bus_routes: Vec<NewBusRoute>,
}

/// Seed data read from a JSON file.
///
/// ```json
/// { "places": [ { "name": "...", "category": "Nature", "rating": 4.8 } ],
///   "bus_routes": [ { "route_label": "A - B", "departure_time": "07:00", "fare": "Rs 100" } ] }
/// ```
#[derive(Debug)]
pub struct JsonCatalog {
    file: CatalogFile,
}

impl JsonCatalog {
    /// Read and parse the seed file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref().to_path_buf();
        let contents = std::fs::read_to_string(&path).map_err(|e| CatalogError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let file: CatalogFile =
            serde_json::from_str(&contents).map_err(|e| CatalogError::Json {
                path,
                message: e.to_string(),
            })?;
        Ok(Self { file })
    }
}

impl CatalogSource for JsonCatalog {
    fn list_places(&self) -> Result<Vec<NewPlace>, CatalogError> {
        Ok(self.file.places.clone())
    }

    fn list_routes(&self) -> Result<Vec<NewBusRoute>, CatalogError> {
        Ok(self.file.bus_routes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sample_content_is_valid() {
        let places = SampleCatalog.list_places().unwrap();
        assert_eq!(places.len(), 4);
        for (i, p) in places.into_iter().enumerate() {
            assert!(p.into_place(i as u64 + 1).is_ok());
        }

        let routes = SampleCatalog.list_routes().unwrap();
        assert_eq!(routes.len(), 3);
        for (i, r) in routes.into_iter().enumerate() {
            assert!(r.into_route(i as u64 + 1).is_ok());
        }
    }

    #[test]
    fn load_json_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{
                "places": [
                    {"name": "Kuruva Island", "category": "Nature", "rating": 4.4, "latitude": 11.82, "longitude": 76.09}
                ],
                "bus_routes": [
                    {"route_name": "Kalpetta - Mysuru", "departure_time": "08:15", "fare": "Rs 210", "duration": "3h 30m"}
                ]
            }"#,
        )
        .unwrap();

        let source = JsonCatalog::load(&path).unwrap();

        let places = source.list_places().unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Kuruva Island");

        let routes = source.list_routes().unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].route_label, "Kalpetta - Mysuru");
    }

    #[test]
    fn sections_are_optional() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{"places": []}"#).unwrap();

        let source = JsonCatalog::load(&path).unwrap();
        assert!(source.list_places().unwrap().is_empty());
        assert!(source.list_routes().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = JsonCatalog::load("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonCatalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
        assert!(err.to_string().contains("catalog.json"));
    }
}
