//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::{BusRouteCatalog, CatalogConfig, CatalogError, CatalogSource, PlaceCatalog};
use crate::config::AppConfig;
use crate::location::{GeoLocationProvider, ReportedLocation};
use crate::planner::ItineraryPlanner;
use crate::reviews::ReviewSubmissionService;
use crate::trips::TripStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Location permission and coordinates
    pub location: Arc<GeoLocationProvider>,

    /// Where the UI pushes the device's position
    pub reported: Arc<ReportedLocation>,

    /// Points of interest
    pub places: Arc<PlaceCatalog>,

    /// Bus departures
    pub routes: Arc<BusRouteCatalog>,

    /// Review validation
    pub reviews: Arc<ReviewSubmissionService>,

    /// Trip planning
    pub planner: Arc<ItineraryPlanner>,

    /// Submitted trips
    pub trips: Arc<TripStore>,
}

impl AppState {
    /// Create the app state, seeding both catalogs from `catalog`.
    ///
    /// The location provider starts out `Unknown`; callers resolve it with
    /// [`GeoLocationProvider::request_permission`].
    pub fn new(catalog: &dyn CatalogSource, config: &AppConfig) -> Result<Self, CatalogError> {
        let reported = Arc::new(ReportedLocation::new());
        let location = Arc::new(GeoLocationProvider::new(
            reported.clone(),
            config.location_timeout,
        ));

        let catalog_config = CatalogConfig::default();
        let places = PlaceCatalog::from_source(catalog, location.subscribe(), catalog_config.clone())?;
        let routes = BusRouteCatalog::from_source(catalog, catalog_config)?;

        let reviews = ReviewSubmissionService::new(location.subscribe(), config.review_radius_km);

        let trips = Arc::new(TripStore::new());
        let planner = ItineraryPlanner::new(trips.clone(), config.itinerary.build());

        Ok(Self {
            location,
            reported,
            places: Arc::new(places),
            routes: Arc::new(routes),
            reviews: Arc::new(reviews),
            planner: Arc::new(planner),
            trips,
        })
    }
}
