//! Server configuration.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::domain::GeoLocation;
use crate::location::DEFAULT_LOCATION_TIMEOUT;
use crate::planner::GeneratorKind;
use crate::reviews::DEFAULT_REVIEW_RADIUS_KM;

/// Runtime configuration for the travel server.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Reviews must be written within this distance of the place.
    pub review_radius_km: f64,

    /// How long a location lookup may take before it counts as denied.
    pub location_timeout: Duration,

    /// JSON file to seed the catalogs from. The built-in sample data is used
    /// when absent.
    pub catalog_path: Option<PathBuf>,

    /// Which itinerary generator to use.
    pub itinerary: GeneratorKind,

    /// Coordinates to report as the traveler's position at start-up.
    pub home: Option<GeoLocation>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            review_radius_km: DEFAULT_REVIEW_RADIUS_KM,
            location_timeout: DEFAULT_LOCATION_TIMEOUT,
            catalog_path: None,
            itinerary: GeneratorKind::default(),
            home: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from `TRAVEL_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults. Unparseable values are logged and
    /// also keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let review_radius_km = parse_or(
            "TRAVEL_REVIEW_RADIUS_KM",
            get("TRAVEL_REVIEW_RADIUS_KM"),
            defaults.review_radius_km,
        );
        let review_radius_km = if review_radius_km.is_finite() && review_radius_km > 0.0 {
            review_radius_km
        } else {
            warn!(value = review_radius_km, "review radius must be positive; using default");
            defaults.review_radius_km
        };

        let location_timeout = match get("TRAVEL_LOCATION_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(
                        key = "TRAVEL_LOCATION_TIMEOUT_SECS",
                        value = %raw,
                        "expected a positive number of seconds; using default"
                    );
                    defaults.location_timeout
                }
            },
            None => defaults.location_timeout,
        };

        Self {
            bind_addr: parse_or("TRAVEL_BIND_ADDR", get("TRAVEL_BIND_ADDR"), defaults.bind_addr),
            review_radius_km,
            location_timeout,
            catalog_path: get("TRAVEL_CATALOG_PATH").map(PathBuf::from),
            itinerary: parse_or("TRAVEL_ITINERARY", get("TRAVEL_ITINERARY"), defaults.itinerary),
            home: home_location(get("TRAVEL_HOME_LAT"), get("TRAVEL_HOME_LNG")),
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = raw else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        warn!(key, value = %raw, error = %e, "invalid setting; using default");
        default
    })
}

fn home_location(lat: Option<String>, lng: Option<String>) -> Option<GeoLocation> {
    match (lat, lng) {
        (None, None) => None,
        (Some(lat), Some(lng)) => {
            let parsed = lat
                .trim()
                .parse::<f64>()
                .ok()
                .zip(lng.trim().parse::<f64>().ok())
                .and_then(|(lat, lng)| GeoLocation::new(lat, lng).ok());
            if parsed.is_none() {
                warn!(%lat, %lng, "invalid home coordinates; ignoring");
            }
            parsed
        }
        _ => {
            warn!("TRAVEL_HOME_LAT and TRAVEL_HOME_LNG must be set together; ignoring");
            None
        }
    }
}
