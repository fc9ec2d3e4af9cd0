//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{
    BusRoute, CategoryFilter, CoreError, GeoLocation, Itinerary, NewBusRoute, NewPlace, Place,
    TripForm, TripId, TripRequest,
};
use crate::location::LocationError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/location", get(location).post(report_location))
        .route("/places", get(list_places).post(add_place))
        .route("/places/search", get(search_places))
        .route("/places/popular", get(popular_places))
        .route("/places/nearby", get(nearby_places))
        .route("/bus-routes", get(list_routes).post(add_route))
        .route("/bus-routes/search", get(search_routes))
        .route("/bus-routes/nearby", get(routes_through))
        .route("/reviews", post(submit_review))
        .route("/trips/new-id", get(new_trip_id))
        .route("/trips", get(list_trips).post(plan_trip))
        .route("/trips/:id", get(get_trip))
        .route("/stats", get(stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, logging it on failure.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

async fn location(State(state): State<AppState>) -> Json<LocationResponse> {
    Json(LocationResponse::from_status(&state.location.status()))
}

/// Record what the device reported, then resolve permission from it.
async fn report_location(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LocationResponse>, AppError> {
    let req: ReportLocationRequest = parse_json(&body)?;

    if req.denied {
        state.reported.deny().await;
    } else {
        let (Some(lat), Some(lng)) = (req.latitude, req.longitude) else {
            return Err(AppError::BadRequest {
                message: "latitude and longitude are required unless denied".to_string(),
            });
        };
        let here = GeoLocation::new(lat, lng).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;
        state.reported.report(here).await;
    }

    let status = state.location.request_permission().await?;
    Ok(Json(LocationResponse::from_status(&status)))
}

/// Framed place listing, optionally filtered by category.
async fn list_places(
    State(state): State<AppState>,
    Query(query): Query<PlacesQuery>,
) -> Json<PlaceListingResponse> {
    let filter = CategoryFilter::from_input(query.category.as_deref());
    let mut listing = state.places.list_places(&filter).await;
    listing.places = query.page().apply(listing.places, DEFAULT_PLACES_LIMIT);
    Json(PlaceListingResponse::from_listing(listing))
}

async fn add_place(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Place>), AppError> {
    let input: NewPlace = parse_json(&body)?;
    let place = state.places.add_place(input).await?;
    Ok((StatusCode::CREATED, Json(place)))
}

async fn search_places(
    State(state): State<AppState>,
    Query(query): Query<PlaceSearchQuery>,
) -> Json<Vec<Place>> {
    Json(state.places.search(&query.q).await)
}

async fn popular_places(State(state): State<AppState>) -> Json<Vec<Place>> {
    Json(state.places.popular().await)
}

async fn nearby_places(
    State(state): State<AppState>,
    Query(query): Query<NearbyPlacesQuery>,
) -> Result<Json<Vec<Place>>, AppError> {
    let center = GeoLocation::new(query.lat, query.lng).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let radius = query.radius.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);
    if !radius.is_finite() || radius < 0.0 {
        return Err(AppError::BadRequest {
            message: format!("Invalid radius: {radius}"),
        });
    }
    Ok(Json(state.places.nearby(&center, radius).await))
}

fn route_results(routes: &[BusRoute]) -> Vec<RouteResult> {
    routes.iter().map(RouteResult::from_route).collect()
}

async fn list_routes(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Json<Vec<RouteResult>> {
    let routes = page.apply(state.routes.list_routes().await, DEFAULT_ROUTES_LIMIT);
    Json(route_results(&routes))
}

async fn add_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RouteResult>), AppError> {
    let input: NewBusRoute = parse_json(&body)?;
    let route = state.routes.add_route(input).await?;
    Ok((StatusCode::CREATED, Json(RouteResult::from_route(&route))))
}

async fn search_routes(
    State(state): State<AppState>,
    Query(query): Query<RouteSearchQuery>,
) -> Json<Vec<RouteResult>> {
    let routes = state.routes.search(&query.origin, &query.destination).await;
    Json(route_results(&routes))
}

async fn routes_through(
    State(state): State<AppState>,
    Query(query): Query<RoutesNearbyQuery>,
) -> Json<Vec<RouteResult>> {
    Json(route_results(
        &state.routes.passing_through(&query.location).await,
    ))
}

async fn submit_review(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ReviewReceipt>), AppError> {
    let req: SubmitReviewRequest = parse_json(&body)?;
    let place_location = req.place_location().map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let review = state.reviews.submit(req.review, place_location)?;
    Ok((
        StatusCode::CREATED,
        Json(ReviewReceipt {
            message: "Review submitted successfully".to_string(),
            review,
        }),
    ))
}

async fn new_trip_id(State(state): State<AppState>) -> Json<TripIdResponse> {
    Json(TripIdResponse {
        id: state.planner.issue_trip_id(),
    })
}

async fn plan_trip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Itinerary>), AppError> {
    let form: TripForm = parse_json(&body)?;
    let itinerary = state.planner.plan(form).await?;
    Ok((StatusCode::CREATED, Json(itinerary)))
}

async fn list_trips(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Json<Vec<TripRequest>> {
    Json(page.apply(state.trips.list().await, DEFAULT_TRIPS_LIMIT))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TripDetailResponse>, AppError> {
    let id = TripId::from_raw(id);
    let (trip, itinerary) = state
        .planner
        .trip(&id)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("Trip {id} not found"),
        })?;

    Ok(Json(TripDetailResponse {
        trip,
        steps: itinerary.steps,
    }))
}

async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        places: state.places.len().await,
        bus_routes: state.routes.len().await,
        trips: state.trips.len().await,
        reviews_accepted: state.reviews.accepted_count(),
        permission: state.location.status().permission(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Unprocessable { message: String },
    Internal { message: String },
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        let message = e.to_string();
        match e {
            CoreError::Validation { .. } => AppError::BadRequest { message },
            CoreError::DuplicateId(_) => AppError::Conflict { message },
            CoreError::OutOfRange { .. } => AppError::Unprocessable { message },
        }
    }
}

impl From<LocationError> for AppError {
    fn from(e: LocationError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SampleCatalog;
    use crate::config::AppConfig;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> (Router, AppState) {
        let state = AppState::new(&SampleCatalog, &AppConfig::default()).unwrap();
        (create_router(state.clone()), state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, Method::POST, uri, Some(body)).await
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (app, _) = app();
        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn places_are_popular_until_location_reported() {
        let (app, _) = app();

        let (status, body) = get(&app, "/places").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["framing"], "popular");
        assert_eq!(body["title"], "Popular Places");

        let (status, body) = post(
            &app,
            "/location",
            json!({"latitude": 11.6081, "longitude": 76.0836}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["permission"], "granted");

        let (_, body) = get(&app, "/places").await;
        assert_eq!(body["framing"], "near_you");
    }

    #[tokio::test]
    async fn denied_location_stays_popular() {
        let (app, _) = app();
        let (_, body) = post(&app, "/location", json!({"denied": true})).await;
        assert_eq!(body["permission"], "denied");

        let (_, body) = get(&app, "/location").await;
        assert_eq!(body["permission"], "denied");
        assert_eq!(body["location"], Value::Null);
    }

    #[tokio::test]
    async fn location_requires_coordinates() {
        let (app, _) = app();
        let (status, body) = post(&app, "/location", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("latitude"));
    }

    #[tokio::test]
    async fn category_filter() {
        let (app, _) = app();
        let (_, body) = get(&app, "/places?category=Nature").await;
        let places = body["places"].as_array().unwrap();
        assert!(!places.is_empty());
        assert!(places.iter().all(|p| p["category"] == "Nature"));

        let (_, all) = get(&app, "/places?category=All").await;
        assert!(all["places"].as_array().unwrap().len() > places.len());
    }

    #[tokio::test]
    async fn listings_are_paged() {
        let (app, _) = app();
        let (_, all) = get(&app, "/places").await;
        let all = all["places"].as_array().unwrap().clone();
        assert_eq!(all.len(), 4);

        let (_, page) = get(&app, "/places?skip=1&limit=2").await;
        assert_eq!(page["framing"], "popular");
        assert_eq!(page["places"].as_array().unwrap(), &all[1..3]);

        let (_, nature) = get(&app, "/places?category=Nature&limit=1").await;
        let nature = nature["places"].as_array().unwrap();
        assert_eq!(nature.len(), 1);
        assert_eq!(nature[0]["category"], "Nature");

        let (_, routes) = get(&app, "/bus-routes?limit=1").await;
        assert_eq!(routes.as_array().unwrap().len(), 1);
        let (_, routes) = get(&app, "/bus-routes?skip=2").await;
        assert_eq!(routes.as_array().unwrap().len(), 1);

        for origin in ["Kalpetta", "Meppadi", "Vythiri"] {
            let form = json!({"origin": origin, "destination": "Kochi", "time": "08:00"});
            let (status, _) = post(&app, "/trips", form).await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let (_, trips) = get(&app, "/trips?skip=1&limit=1").await;
        let trips = trips.as_array().unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0]["origin"], "Meppadi");

        let (status, _) = get(&app, "/trips?limit=lots").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn add_place_then_search() {
        let (app, _) = app();
        let (status, body) = post(
            &app,
            "/places",
            json!({"name": "Pookode Lake", "category": "Nature", "rating": 4.4}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Pookode Lake");

        let (_, found) = get(&app, "/places/search?q=pookode").await;
        assert_eq!(found.as_array().unwrap().len(), 1);

        let (status, body) = post(
            &app,
            "/places",
            json!({"name": " ", "category": "Nature", "rating": 4.0}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid name: is required");
    }

    #[tokio::test]
    async fn nearby_rejects_bad_coordinates() {
        let (app, _) = app();
        let (status, _) = get(&app, "/places/nearby?lat=95&lng=76").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get(&app, "/places/nearby?lat=11.6&lng=76.1&radius=50").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_array());
    }

    #[tokio::test]
    async fn add_route_and_list() {
        let (app, state) = app();
        let before = state.routes.len().await;

        let (status, body) = post(
            &app,
            "/bus-routes",
            json!({"route_label": "A-B", "departure_time": "07:00", "fare": "Rs 100"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["fare"], "Rs 100");
        assert_eq!(body["departure_time"], "07:00");

        let (_, routes) = get(&app, "/bus-routes").await;
        let routes = routes.as_array().unwrap();
        assert_eq!(routes.len(), before + 1);
        assert_eq!(routes.last().unwrap()["route_label"], "A-B");

        let (status, _) = post(
            &app,
            "/bus-routes",
            json!({"route_label": "", "departure_time": "07:00", "fare": "Rs 100"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.routes.len().await, before + 1);
    }

    #[tokio::test]
    async fn route_search_and_nearby() {
        let (app, _) = app();
        let (_, found) = get(&app, "/bus-routes/search?origin=kalpetta").await;
        assert_eq!(found.as_array().unwrap().len(), 1);

        let (_, through) = get(&app, "/bus-routes/nearby?location=Pala").await;
        assert_eq!(through[0]["route_label"], "Sulthan Bathery - Pala");
    }

    #[tokio::test]
    async fn review_statuses() {
        let (app, state) = app();

        let (status, body) = post(
            &app,
            "/reviews",
            json!({"place_name": "Cafe", "category": "Restaurant", "description": "Great dosa"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["review"]["rating"], 5);

        let (status, _) = post(
            &app,
            "/reviews",
            json!({"place_name": "", "category": "Restaurant", "description": "x"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        state
            .reported
            .report(GeoLocation::new(11.6081, 76.0836).unwrap())
            .await;
        state.location.request_permission().await.unwrap();

        let (status, body) = post(
            &app,
            "/reviews",
            json!({
                "place_name": "Chembra Peak",
                "category": "Adventure",
                "description": "Heart lake",
                "place_latitude": 11.5131,
                "place_longitude": 76.0876
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("km"));
        assert_eq!(state.reviews.accepted_count(), 1);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (app, _) = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/trips")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn plan_list_and_fetch_trip() {
        let (app, _) = app();

        let (_, issued) = get(&app, "/trips/new-id").await;
        let id = issued["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("TRIP"));

        let (status, itinerary) = post(
            &app,
            "/trips",
            json!({
                "trip_number": id,
                "origin": "Sulthan Bathery",
                "destination": "IIIT Kottayam",
                "time": "7:00 PM",
                "mode": "bus"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(itinerary["trip_request_id"], id.as_str());
        assert_eq!(itinerary["steps"].as_array().unwrap().len(), 6);

        let (_, trips) = get(&app, "/trips").await;
        assert_eq!(trips.as_array().unwrap().len(), 1);
        assert_eq!(trips[0]["departure_time"], "19:00");

        let (status, detail) = get(&app, &format!("/trips/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["trip"]["origin"], "Sulthan Bathery");

        let (status, _) = get(&app, "/trips/TRIP0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_trip_is_conflict() {
        let (app, state) = app();
        let form = json!({"id": "TRIP7", "origin": "A", "destination": "B", "departure_time": "08:00"});

        let (status, _) = post(&app, "/trips", form.clone()).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = post(&app, "/trips", form).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "trip TRIP7 already exists");
        assert_eq!(state.trips.len().await, 1);
    }

    #[tokio::test]
    async fn invalid_trip_leaves_store_empty() {
        let (app, state) = app();
        let (status, body) = post(
            &app,
            "/trips",
            json!({"origin": "A", "destination": "", "departure_time": "08:00"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid destination: is required");
        assert!(state.trips.is_empty().await);
    }

    #[tokio::test]
    async fn stats_counts_collections() {
        let (app, state) = app();
        let (_, body) = get(&app, "/stats").await;

        assert_eq!(body["places"], state.places.len().await);
        assert_eq!(body["bus_routes"], 3);
        assert_eq!(body["trips"], 0);
        assert_eq!(body["reviews_accepted"], 0);
        assert_eq!(body["permission"], "unknown");
    }
}
