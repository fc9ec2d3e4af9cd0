//! Device location capabilities.
//!
//! A [`LocationSource`] is whatever can answer "where is the traveler right
//! now?". Any failure it reports is treated as a denial by the provider,
//! never as a fatal error.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::GeoLocation;

/// Why a location lookup produced no coordinates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationUnavailable {
    /// The traveler (or platform) refused access.
    #[error("location permission denied")]
    PermissionDenied,

    /// The platform could not determine a position.
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous access to the device's position.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Look up the current position.
    async fn locate(&self) -> Result<GeoLocation, LocationUnavailable>;
}

/// A source that always reports the same coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub GeoLocation);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn locate(&self) -> Result<GeoLocation, LocationUnavailable> {
        Ok(self.0)
    }
}

/// A source for deployments with no positioning at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationSource for NoLocation {
    async fn locate(&self) -> Result<GeoLocation, LocationUnavailable> {
        Err(LocationUnavailable::Unavailable(
            "no location source configured".to_string(),
        ))
    }
}

/// Coordinates pushed in by the UI layer.
///
/// A browser resolves `navigator.geolocation` on its own and reports either
/// a position or a refusal; this source hands out the latest report.
/// Until something is reported, lookups are denied.
#[derive(Debug, Default)]
pub struct ReportedLocation {
    latest: Mutex<Option<Result<GeoLocation, LocationUnavailable>>>,
}

impl ReportedLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position reported by the device.
    pub async fn report(&self, location: GeoLocation) {
        *self.latest.lock().await = Some(Ok(location));
    }

    /// Record that the device refused access.
    pub async fn deny(&self) {
        *self.latest.lock().await = Some(Err(LocationUnavailable::PermissionDenied));
    }
}

#[async_trait]
impl LocationSource for ReportedLocation {
    async fn locate(&self) -> Result<GeoLocation, LocationUnavailable> {
        self.latest
            .lock()
            .await
            .clone()
            .unwrap_or(Err(LocationUnavailable::PermissionDenied))
    }
}
