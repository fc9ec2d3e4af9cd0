//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::catalog::{Framing, PlaceListing};
use crate::domain::{
    Accepted, BusRoute, GeoLocation, InvalidCoordinates, Place, ReviewSubmission, TripId,
    TripRequest,
};
use crate::location::{LocationStatus, PermissionState};

/// Radius used by `/places/nearby` when none is given.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 5.0;

/// Current location permission.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    /// unknown, granted or denied
    pub permission: PermissionState,

    /// Coordinates when granted
    pub location: Option<GeoLocation>,
}

/// Position (or refusal) reported by the device.
#[derive(Debug, Deserialize)]
pub struct ReportLocationRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// The traveler refused to share their position
    #[serde(default)]
    pub denied: bool,
}

/// Page size for `/places` when no limit is given.
pub const DEFAULT_PLACES_LIMIT: usize = 100;

/// Page size for `/bus-routes` when no limit is given.
pub const DEFAULT_ROUTES_LIMIT: usize = 100;

/// Page size for `/trips` when no limit is given.
pub const DEFAULT_TRIPS_LIMIT: usize = 50;

/// Offset and page size for a listing.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Entries to skip; defaults to 0
    pub skip: Option<usize>,

    /// Most entries to return
    pub limit: Option<usize>,
}

impl PageQuery {
    /// The requested window of an already ordered listing.
    pub fn apply<T>(&self, items: Vec<T>, default_limit: usize) -> Vec<T> {
        items
            .into_iter()
            .skip(self.skip.unwrap_or(0))
            .take(self.limit.unwrap_or(default_limit))
            .collect()
    }
}

/// Query for the place listing.
#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    /// Category name; absent or "All" means every category
    pub category: Option<String>,

    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl PlacesQuery {
    pub fn page(&self) -> PageQuery {
        PageQuery {
            skip: self.skip,
            limit: self.limit,
        }
    }
}

/// A framed place listing.
#[derive(Debug, Serialize)]
pub struct PlaceListingResponse {
    /// near_you or popular
    pub framing: Framing,

    /// Heading to display above the list
    pub title: String,

    /// Places in display order
    pub places: Vec<Place>,
}

/// Query for name search.
#[derive(Debug, Deserialize)]
pub struct PlaceSearchQuery {
    /// Substring of the place name
    #[serde(default)]
    pub q: String,
}

/// Query for places around a point.
#[derive(Debug, Deserialize)]
pub struct NearbyPlacesQuery {
    pub lat: f64,
    pub lng: f64,

    /// Kilometres; defaults to 5
    pub radius: Option<f64>,
}

/// A bus route in results.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub id: u64,

    /// e.g. "Sulthan Bathery - Pala"
    pub route_label: String,

    /// Departure time in HH:MM format
    pub departure_time: String,

    /// Journey time, e.g. "10h 30m"
    pub duration: String,

    /// Journey time in minutes
    pub duration_minutes: u32,

    /// Fare, e.g. "Rs 280"
    pub fare: String,

    /// Operator name
    pub operator: String,
}

/// Query for route search.
#[derive(Debug, Deserialize)]
pub struct RouteSearchQuery {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
}

/// Query for routes through a place.
#[derive(Debug, Deserialize)]
pub struct RoutesNearbyQuery {
    /// Town or stop name
    pub location: String,
}

/// A review plus where the reviewed place is.
#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    #[serde(flatten)]
    pub review: ReviewSubmission,

    /// Place latitude, for the proximity check
    pub place_latitude: Option<f64>,

    /// Place longitude, for the proximity check
    pub place_longitude: Option<f64>,
}

/// Acknowledgement of an accepted review.
#[derive(Debug, Serialize)]
pub struct ReviewReceipt {
    pub message: String,
    pub review: Accepted,
}

/// A freshly issued trip id.
#[derive(Debug, Serialize)]
pub struct TripIdResponse {
    pub id: TripId,
}

/// A stored trip with its itinerary.
#[derive(Debug, Serialize)]
pub struct TripDetailResponse {
    pub trip: TripRequest,

    /// Ordered travel steps
    pub steps: Vec<String>,
}

/// Collection sizes.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub places: usize,
    pub bus_routes: usize,
    pub trips: usize,
    pub reviews_accepted: usize,
    pub permission: PermissionState,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl LocationResponse {
    pub fn from_status(status: &LocationStatus) -> Self {
        Self {
            permission: status.permission(),
            location: status.location(),
        }
    }
}

impl PlaceListingResponse {
    pub fn from_listing(listing: PlaceListing) -> Self {
        Self {
            framing: listing.framing,
            title: listing.framing.title().to_string(),
            places: listing.places,
        }
    }
}

impl RouteResult {
    /// Create from a domain BusRoute.
    pub fn from_route(route: &BusRoute) -> Self {
        Self {
            id: route.id,
            route_label: route.route_label.clone(),
            departure_time: route.departure_time.to_string(),
            duration: route.duration_label(),
            duration_minutes: route.duration_minutes,
            fare: route.fare.to_string(),
            operator: route.operator.clone(),
        }
    }
}

impl SubmitReviewRequest {
    /// The reviewed place's coordinates, if both were given.
    pub fn place_location(&self) -> Result<Option<GeoLocation>, InvalidCoordinates> {
        match (self.place_latitude, self.place_longitude) {
            (Some(lat), Some(lng)) => GeoLocation::new(lat, lng).map(Some),
            _ => Ok(None),
        }
    }
}
