//! Trip planning: validate, record, then generate an itinerary.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{CoreError, Itinerary, TripForm, TripId, TripRequest};
use crate::trips::TripStore;

use super::generator::ItineraryGenerator;
use super::ids::TripIdGenerator;

/// Plans trips and records them in a [`TripStore`].
pub struct ItineraryPlanner {
    trips: Arc<TripStore>,
    generator: Arc<dyn ItineraryGenerator>,
    ids: TripIdGenerator,
}

impl ItineraryPlanner {
    pub fn new(trips: Arc<TripStore>, generator: Arc<dyn ItineraryGenerator>) -> Self {
        Self {
            trips,
            generator,
            ids: TripIdGenerator::new(),
        }
    }

    /// Issue a fresh trip id, e.g. to show on the form before it is submitted.
    pub fn issue_trip_id(&self) -> TripId {
        self.ids.issue()
    }

    /// Validate the form, record the trip and return its itinerary.
    ///
    /// The form's own id is used when present, otherwise one is issued. A
    /// form that fails validation leaves the store untouched.
    pub async fn plan(&self, form: TripForm) -> Result<Itinerary, CoreError> {
        let supplied = form
            .id
            .as_ref()
            .map(|id| id.as_str().trim())
            .filter(|id| !id.is_empty())
            .map(TripId::from_raw);
        let id = match supplied {
            Some(id) => id,
            None => self.ids.issue(),
        };

        let request = TripRequest::new(id, &form).inspect_err(|e| {
            warn!(error = %e, "rejected trip request");
        })?;

        self.ids.observe(request.id());
        self.trips.append(request.clone()).await?;

        let itinerary = self.itinerary_for(&request);
        debug!(
            id = %itinerary.trip_request_id,
            steps = itinerary.steps.len(),
            "generated itinerary"
        );
        Ok(itinerary)
    }

    /// The itinerary for an already-validated request.
    pub fn itinerary_for(&self, request: &TripRequest) -> Itinerary {
        Itinerary {
            trip_request_id: request.id().clone(),
            steps: self.generator.generate(request),
        }
    }

    /// A recorded trip together with its (regenerated) itinerary.
    pub async fn trip(&self, id: &TripId) -> Option<(TripRequest, Itinerary)> {
        let request = self.trips.get(id).await?;
        let itinerary = self.itinerary_for(&request);
        Some((request, itinerary))
    }

    pub fn trips(&self) -> &Arc<TripStore> {
        &self.trips
    }
}

impl std::fmt::Debug for ItineraryPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItineraryPlanner")
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}
