//! In-memory catalogs of places and bus routes.
//!
//! Both catalogs are owned collections that only grow. They are seeded from
//! a [`CatalogSource`] and then accept user contributions.

mod config;
mod places;
mod routes;
mod source;

pub use config::CatalogConfig;
pub use places::{Framing, PlaceCatalog, PlaceListing};
pub use routes::BusRouteCatalog;
pub use source::{CatalogError, CatalogSource, JsonCatalog, SampleCatalog};
