//! Device location and permission handling.
//!
//! The provider resolves asynchronously and publishes its state on a watch
//! channel. Catalogs and services hold a [`LocationWatch`] and read the
//! latest value on every call, so nothing they do waits on the device.

mod provider;
mod source;

pub use provider::{
    DEFAULT_LOCATION_TIMEOUT, GeoLocationProvider, LocationError, LocationStatus, LocationWatch,
    PermissionState,
};
pub use source::{FixedLocation, LocationSource, LocationUnavailable, NoLocation, ReportedLocation};
