//! Domain types for the travel suggester.
//!
//! Value types enforce their invariants at construction time, so code that
//! receives them can trust their validity. Raw user input lives in the
//! `New*`/`*Form`/`*Submission` types and is validated into records by the
//! owning catalog or service.

mod category;
mod error;
mod fare;
mod geo;
mod place;
mod review;
mod route;
mod time;
mod trip;

pub use category::{Category, CategoryFilter, InvalidCategory};
pub use error::{CoreError, require};
pub use fare::{Fare, InvalidFare};
pub use geo::{GeoLocation, InvalidCoordinates};
pub use place::{MAX_PLACE_RATING, NewPlace, Place};
pub use review::{Accepted, InvalidRating, Rating, ReviewSubmission};
pub use route::{BusRoute, DEFAULT_OPERATOR, NewBusRoute, format_duration, parse_duration};
pub use time::{TimeError, TimeOfDay};
pub use trip::{InvalidMode, Itinerary, TravelMode, TripForm, TripId, TripRequest};
