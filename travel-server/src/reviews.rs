//! Review submission.
//!
//! Reviews are validated and acknowledged but not stored; the place catalog
//! is never modified by a review.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{info, warn};

use crate::domain::{Accepted, CoreError, GeoLocation, Rating, ReviewSubmission, require};
use crate::location::LocationWatch;

/// Reviews must be written within this many kilometres of the place.
pub const DEFAULT_REVIEW_RADIUS_KM: f64 = 5.0;

/// Validates and accepts place reviews.
#[derive(Debug)]
pub struct ReviewSubmissionService {
    location: LocationWatch,
    radius_km: f64,
    accepted: AtomicUsize,
}

impl ReviewSubmissionService {
    pub fn new(location: LocationWatch, radius_km: f64) -> Self {
        Self {
            location,
            radius_km,
            accepted: AtomicUsize::new(0),
        }
    }

    /// Check a review and acknowledge it.
    ///
    /// `place_location` is where the reviewed place is. When the traveler's
    /// own position is known and the place is farther than the configured
    /// radius, the review is rejected with [`CoreError::OutOfRange`]. Without
    /// either position the proximity rule cannot apply and is skipped.
    pub fn submit(
        &self,
        submission: ReviewSubmission,
        place_location: Option<GeoLocation>,
    ) -> Result<Accepted, CoreError> {
        let result = self.check(submission, place_location);
        match &result {
            Ok(accepted) => {
                self.accepted.fetch_add(1, Ordering::Relaxed);
                info!(
                    place = %accepted.place_name,
                    category = %accepted.category,
                    rating = accepted.rating.stars(),
                    "accepted review"
                );
            }
            Err(e) => warn!(error = %e, "rejected review"),
        }
        result
    }

    fn check(
        &self,
        submission: ReviewSubmission,
        place_location: Option<GeoLocation>,
    ) -> Result<Accepted, CoreError> {
        let place_name = require("place_name", &submission.place_name)?;
        require("description", &submission.description)?;

        let rating = match submission.rating {
            None => Rating::default(),
            Some(stars) => {
                Rating::new(stars).map_err(|e| CoreError::validation("rating", e.to_string()))?
            }
        };

        let here = self.location.borrow().location();
        if let (Some(here), Some(place)) = (here, place_location) {
            let distance_km = here.distance_km(&place);
            if distance_km > self.radius_km {
                return Err(CoreError::OutOfRange {
                    distance_km,
                    radius_km: self.radius_km,
                });
            }
        }

        Ok(Accepted {
            place_name,
            category: submission.category,
            rating,
            location: submission
                .location
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
        })
    }

    /// The radius within which reviews are accepted.
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Number of reviews accepted since start-up.
    pub fn accepted_count(&self) -> usize {
        self.accepted.load(Ordering::Relaxed)
    }
}
