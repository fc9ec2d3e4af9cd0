//! Itinerary generation strategies.
//!
//! Real routing is not part of this service. Generators turn a trip request
//! into readable steps; swapping one for a routing-backed implementation
//! does not change how trips are planned or stored.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::{TravelMode, TripRequest};

/// Produces the ordered steps for a trip.
pub trait ItineraryGenerator: Send + Sync {
    fn generate(&self, request: &TripRequest) -> Vec<String>;
}

/// Always returns the Sulthan Bathery to IIIT Kottayam walkthrough.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleItinerary;

impl ItineraryGenerator for SampleItinerary {
    fn generate(&self, _request: &TripRequest) -> Vec<String> {
        [
            "Take KSRTC bus from Sulthan Bathery to Pala Kottaramattom bus stand",
            "Journey time: 10h 30m, Arrival: 5:30 AM next day",
            "From Pala, take auto to IIIT Kottayam, Nechipuzhoor (Rs 50-80)",
            "Alternative: Wait till 7:15 AM for bus to Ramapuram via Nechipuzhoor (Rs 15)",
            "Get down at Nechipuzhoor and take auto to IIIT Kottayam",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

/// Detailed steps for corridors we have local knowledge of, and a general
/// checklist for everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuidedItinerary;

impl GuidedItinerary {
    fn is_bathery_to_iiit(request: &TripRequest) -> bool {
        request.mode() == TravelMode::Bus
            && request.origin().to_lowercase().contains("sulthan bathery")
            && request.destination().to_lowercase().contains("iiit kottayam")
    }
}

impl ItineraryGenerator for GuidedItinerary {
    fn generate(&self, request: &TripRequest) -> Vec<String> {
        if Self::is_bathery_to_iiit(request) {
            return vec![
                format!(
                    "Take KSRTC bus from Sulthan Bathery at {} to Pala Kottaramattom bus stand",
                    request.departure_time()
                ),
                "Journey time: 10h 30m, Arrival: 5:30 AM next day (Fare: Rs 280)".to_string(),
                "From Pala, take an auto directly to IIIT Kottayam, Nechipuzhoor (Rs 50-80)"
                    .to_string(),
                "Alternative: wait till 7:15 AM for the bus to Ramapuram via Nechipuzhoor \
                 (Rs 15), get down at Nechipuzhoor and take an auto to IIIT Kottayam (Rs 30-50)"
                    .to_string(),
                "Total journey time: 11-12 hours".to_string(),
                "Estimated total cost: Rs 310-360".to_string(),
            ];
        }

        vec![
            format!(
                "Depart {} at {} by {} towards {}",
                request.origin(),
                request.departure_time(),
                request.mode(),
                request.destination()
            ),
            "Check local transport options and timings".to_string(),
            "Consider booking tickets in advance for better rates".to_string(),
            "Keep alternative routes ready in case of delays".to_string(),
            "Carry necessary identification and travel documents".to_string(),
        ]
    }
}

/// Error returned for an unknown generator name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown itinerary generator: {0} (expected \"guided\" or \"sample\")")]
pub struct UnknownGenerator(String);

/// Selects a built-in generator by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeneratorKind {
    #[default]
    Guided,
    Sample,
}

impl GeneratorKind {
    pub fn build(self) -> Arc<dyn ItineraryGenerator> {
        match self {
            GeneratorKind::Guided => Arc::new(GuidedItinerary),
            GeneratorKind::Sample => Arc::new(SampleItinerary),
        }
    }
}

impl FromStr for GeneratorKind {
    type Err = UnknownGenerator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guided" => Ok(GeneratorKind::Guided),
            "sample" => Ok(GeneratorKind::Sample),
            _ => Err(UnknownGenerator(s.to_string())),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorKind::Guided => f.write_str("guided"),
            GeneratorKind::Sample => f.write_str("sample"),
        }
    }
}
