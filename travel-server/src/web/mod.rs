//! Web layer for the travel suggester.
//!
//! A JSON API over the catalogs, reviews and trip planner. Handlers parse
//! input, call the core and map its errors to status codes.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
