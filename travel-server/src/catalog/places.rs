//! Place catalog.

use std::cmp::Ordering;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{CategoryFilter, CoreError, GeoLocation, NewPlace, Place};
use crate::location::LocationWatch;

use super::config::CatalogConfig;
use super::source::{CatalogError, CatalogSource};

/// How a place listing should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    /// Location is known; places are ordered by distance.
    NearYou,
    /// Location is unknown or denied; places are in catalog order.
    Popular,
}

impl Framing {
    pub fn title(&self) -> &'static str {
        match self {
            Framing::NearYou => "Near You",
            Framing::Popular => "Popular Places",
        }
    }
}

/// A framed, ordered view of the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceListing {
    pub framing: Framing,
    pub places: Vec<Place>,
}

#[derive(Debug, Default)]
struct PlaceLog {
    places: Vec<Place>,
    next_id: u64,
}

impl PlaceLog {
    fn push(&mut self, input: NewPlace) -> Result<Place, CoreError> {
        let place = input.into_place(self.next_id + 1)?;
        self.next_id += 1;
        self.places.push(place.clone());
        Ok(place)
    }
}

/// Known points of interest.
///
/// Reads share a lock; additions take it exclusively. Entries are never
/// edited in place.
#[derive(Debug)]
pub struct PlaceCatalog {
    inner: RwLock<PlaceLog>,
    location: LocationWatch,
    config: CatalogConfig,
}

impl PlaceCatalog {
    /// Create an empty catalog.
    pub fn new(location: LocationWatch, config: CatalogConfig) -> Self {
        Self {
            inner: RwLock::new(PlaceLog::default()),
            location,
            config,
        }
    }

    /// Create a catalog seeded from `source`. Ids follow source order.
    pub fn from_source(
        source: &dyn CatalogSource,
        location: LocationWatch,
        config: CatalogConfig,
    ) -> Result<Self, CatalogError> {
        let mut log = PlaceLog::default();
        for (index, input) in source.list_places()?.into_iter().enumerate() {
            log.push(input).map_err(|source| CatalogError::InvalidEntry {
                kind: "place",
                index,
                source,
            })?;
        }
        info!(count = log.places.len(), "seeded place catalog");

        Ok(Self {
            inner: RwLock::new(log),
            location,
            config,
        })
    }

    /// List places, optionally restricted to one category.
    ///
    /// With location granted the listing is framed "near you" and sorted by
    /// distance, then rating (highest first), then name. Otherwise it is
    /// framed "popular" and kept in catalog order.
    pub async fn list_places(&self, filter: &CategoryFilter) -> PlaceListing {
        let origin = self.location.borrow().location();
        let guard = self.inner.read().await;

        let mut places: Vec<Place> = guard
            .places
            .iter()
            .filter(|p| filter.accepts(&p.category))
            .cloned()
            .collect();
        drop(guard);

        let framing = match origin {
            Some(origin) => {
                for place in &mut places {
                    place.distance_km = place.distance_from(Some(&origin));
                }
                places.sort_by(near_you_order);
                Framing::NearYou
            }
            None => Framing::Popular,
        };

        debug!(?framing, ?filter, count = places.len(), "listed places");
        PlaceListing { framing, places }
    }

    /// Places whose name contains `query`, case-insensitively, in catalog order.
    pub async fn search(&self, query: &str) -> Vec<Place> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let guard = self.inner.read().await;
        guard
            .places
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .take(self.config.search_limit)
            .cloned()
            .collect()
    }

    /// Highly rated places in catalog order.
    pub async fn popular(&self) -> Vec<Place> {
        let guard = self.inner.read().await;
        guard
            .places
            .iter()
            .filter(|p| p.rating >= self.config.popular_min_rating)
            .take(self.config.popular_limit)
            .cloned()
            .collect()
    }

    /// Places with known coordinates within `radius_km` of `center`, nearest first.
    ///
    /// The returned `distance_km` is measured from `center`.
    pub async fn nearby(&self, center: &GeoLocation, radius_km: f64) -> Vec<Place> {
        let guard = self.inner.read().await;
        let mut found: Vec<Place> = guard
            .places
            .iter()
            .filter_map(|p| {
                let d = center.distance_km(p.coordinates.as_ref()?);
                (d <= radius_km).then(|| Place {
                    distance_km: d,
                    ..p.clone()
                })
            })
            .collect();
        drop(guard);

        found.sort_by(near_you_order);
        found.truncate(self.config.nearby_limit);
        found
    }

    /// Validate and append a new place.
    pub async fn add_place(&self, input: NewPlace) -> Result<Place, CoreError> {
        let mut guard = self.inner.write().await;
        let place = guard.push(input)?;
        info!(id = place.id, name = %place.name, "added place");
        Ok(place)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.places.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.places.is_empty()
    }
}

/// Distance ascending, then rating descending, then name ascending.
fn near_you_order(a: &Place, b: &Place) -> Ordering {
    a.distance_km
        .total_cmp(&b.distance_km)
        .then_with(|| b.rating.total_cmp(&a.rating))
        .then_with(|| a.name.cmp(&b.name))
}
