//! Review submissions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Category;

/// Error returned for a star rating outside 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid rating {0}: must be 1-5 stars")]
pub struct InvalidRating(pub i64);

/// A review's star rating, 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: Rating = Rating(5);

    pub fn new(stars: i64) -> Result<Self, InvalidRating> {
        match u8::try_from(stars) {
            Ok(s @ 1..=5) => Ok(Rating(s)),
            _ => Err(InvalidRating(stars)),
        }
    }

    pub fn stars(&self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating::MAX
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// A place review as typed into the contribution form.
///
/// Required text fields are plain strings here; emptiness is checked by the
/// review service so it can report which field is missing.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSubmission {
    pub place_name: String,
    pub category: Category,
    /// Star rating; absent means 5.
    #[serde(default)]
    pub rating: Option<i64>,
    pub description: String,
    /// Free-text locality, e.g. "Kalpetta".
    #[serde(default)]
    pub location: Option<String>,
}

impl ReviewSubmission {
    pub fn new(
        place_name: impl Into<String>,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            place_name: place_name.into(),
            category,
            rating: None,
            description: description.into(),
            location: None,
        }
    }

    pub fn with_rating(mut self, stars: i64) -> Self {
        self.rating = Some(stars);
        self
    }
}

/// Receipt for an accepted review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accepted {
    pub place_name: String,
    pub category: Category,
    pub rating: Rating,
    pub location: Option<String>,
}
