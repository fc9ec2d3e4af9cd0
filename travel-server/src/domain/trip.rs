//! Trip requests and itineraries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::require;
use super::{CoreError, TimeOfDay};

/// Opaque unique trip identifier, e.g. `TRIP1718000000123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    /// Wrap an identifier issued elsewhere (a stored trip, a URL path).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned for an unrecognised travel mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel mode: {0}")]
pub struct InvalidMode(String);

/// How the traveler wants to get there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Bus,
    Train,
    Car,
    Mixed,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Bus => "bus",
            TravelMode::Train => "train",
            TravelMode::Car => "car",
            TravelMode::Mixed => "mixed",
        }
    }
}

impl FromStr for TravelMode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bus" => Ok(TravelMode::Bus),
            "train" => Ok(TravelMode::Train),
            "car" => Ok(TravelMode::Car),
            "mixed" | "mixed transport" => Ok(TravelMode::Mixed),
            _ => Err(InvalidMode(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for TravelMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trip as typed into the planning form, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripForm {
    /// Identifier shown to the traveler before submitting, if any.
    #[serde(default, alias = "trip_number")]
    pub id: Option<TripId>,
    pub origin: String,
    pub destination: String,
    #[serde(alias = "time")]
    pub departure_time: String,
    /// Absent or blank means bus.
    #[serde(default)]
    pub mode: Option<String>,
}

impl TripForm {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_time: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_time: departure_time.into(),
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = Some(mode.as_str().to_string());
        self
    }
}

/// A validated, immutable trip request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRequest {
    id: TripId,
    origin: String,
    destination: String,
    departure_time: TimeOfDay,
    mode: TravelMode,
}

impl TripRequest {
    /// Validate `form` and bind it to `id`.
    ///
    /// The id is issued by the caller before validation, so a rejected
    /// form consumes it and a retry gets a fresh one.
    pub fn new(id: TripId, form: &TripForm) -> Result<Self, CoreError> {
        let origin = require("origin", &form.origin)?;
        let destination = require("destination", &form.destination)?;

        require("departure_time", &form.departure_time)?;
        let departure_time = TimeOfDay::parse(&form.departure_time)
            .map_err(|e| CoreError::validation("departure_time", e.to_string()))?;

        let mode = match form.mode.as_deref().map(str::trim) {
            None | Some("") => TravelMode::default(),
            Some(m) => m
                .parse()
                .map_err(|e: InvalidMode| CoreError::validation("mode", e.to_string()))?,
        };

        Ok(Self {
            id,
            origin,
            destination,
            departure_time,
            mode,
        })
    }

    pub fn id(&self) -> &TripId {
        &self.id
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn departure_time(&self) -> TimeOfDay {
        self.departure_time
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }
}

/// Ordered, human-readable travel steps for one trip request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    pub trip_request_id: TripId,
    pub steps: Vec<String>,
}
