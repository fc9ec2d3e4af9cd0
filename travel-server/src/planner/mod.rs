//! Trip planning.
//!
//! A trip form is validated into a [`TripRequest`](crate::domain::TripRequest),
//! given an id, appended to the trip store and turned into an itinerary by a
//! pluggable [`ItineraryGenerator`].

mod generator;
mod ids;
mod itinerary;

pub use generator::{
    GeneratorKind, GuidedItinerary, ItineraryGenerator, SampleItinerary, UnknownGenerator,
};
pub use ids::{TRIP_ID_PREFIX, TripIdGenerator};
pub use itinerary::ItineraryPlanner;
