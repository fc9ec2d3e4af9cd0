//! Travel suggester server.
//!
//! Suggests places to visit and ways to get there: a place catalog that
//! reorders itself once the traveler's position is known, contributed bus
//! routes, proximity-checked reviews and a trip planner that records
//! requests and produces step-by-step itineraries.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod location;
pub mod planner;
pub mod reviews;
pub mod trips;
pub mod web;
