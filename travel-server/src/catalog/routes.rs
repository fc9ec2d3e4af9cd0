//! Bus route catalog.

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::{BusRoute, CoreError, NewBusRoute};

use super::config::CatalogConfig;
use super::source::{CatalogError, CatalogSource};

#[derive(Debug, Default)]
struct RouteLog {
    routes: Vec<BusRoute>,
    next_id: u64,
}

impl RouteLog {
    fn push(&mut self, input: NewBusRoute) -> Result<BusRoute, CoreError> {
        let route = input.into_route(self.next_id + 1)?;
        self.next_id += 1;
        self.routes.push(route.clone());
        Ok(route)
    }
}

/// Known bus routes, in the order they were added.
///
/// Routes are only ever appended. Identical contributions are kept as
/// separate entries.
#[derive(Debug)]
pub struct BusRouteCatalog {
    inner: RwLock<RouteLog>,
    config: CatalogConfig,
}

impl BusRouteCatalog {
    /// Create an empty catalog.
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            inner: RwLock::new(RouteLog::default()),
            config,
        }
    }

    /// Create a catalog seeded from `source`.
    pub fn from_source(
        source: &dyn CatalogSource,
        config: CatalogConfig,
    ) -> Result<Self, CatalogError> {
        let mut log = RouteLog::default();
        for (index, input) in source.list_routes()?.into_iter().enumerate() {
            log.push(input).map_err(|source| CatalogError::InvalidEntry {
                kind: "bus route",
                index,
                source,
            })?;
        }
        info!(count = log.routes.len(), "seeded bus route catalog");

        Ok(Self {
            inner: RwLock::new(log),
            config,
        })
    }

    /// All routes in insertion order.
    pub async fn list_routes(&self) -> Vec<BusRoute> {
        self.inner.read().await.routes.clone()
    }

    /// Validate and append a route contributed by a traveler.
    ///
    /// On failure the catalog is unchanged.
    pub async fn add_route(&self, input: NewBusRoute) -> Result<BusRoute, CoreError> {
        let mut guard = self.inner.write().await;
        match guard.push(input) {
            Ok(route) => {
                info!(
                    id = route.id,
                    label = %route.route_label,
                    departs = %route.departure_time,
                    "added bus route"
                );
                Ok(route)
            }
            Err(e) => {
                warn!(error = %e, "rejected bus route");
                Err(e)
            }
        }
    }

    /// Routes whose label mentions either end of a journey.
    pub async fn search(&self, origin: &str, destination: &str) -> Vec<BusRoute> {
        let guard = self.inner.read().await;
        guard
            .routes
            .iter()
            .filter(|r| r.label_contains(origin) || r.label_contains(destination))
            .cloned()
            .collect()
    }

    /// Routes that pass through `location`.
    pub async fn passing_through(&self, location: &str) -> Vec<BusRoute> {
        let guard = self.inner.read().await;
        guard
            .routes
            .iter()
            .filter(|r| r.label_contains(location))
            .take(self.config.route_location_limit)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.routes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.routes.is_empty()
    }
}
