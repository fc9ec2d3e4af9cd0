//! Domain error types.
//!
//! Every failure in the core is local and recoverable: it is reported to the
//! immediate caller and no state is mutated. Location denial is not an error
//! at all; see [`crate::location::PermissionState`].

use super::TripId;

/// Errors returned by catalog, review and trip operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// A required field is missing or malformed.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// An identifier is already present in an append-only collection.
    #[error("trip {0} already exists")]
    DuplicateId(TripId),

    /// A review targets a place outside the allowed radius.
    #[error("place is {distance_km:.1} km away; reviews are limited to {radius_km:.1} km")]
    OutOfRange { distance_km: f64, radius_km: f64 },
}

impl CoreError {
    /// Shorthand for a validation failure on `field`.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Validation failure for a required field left empty.
    pub fn required(field: &'static str) -> Self {
        Self::validation(field, "is required")
    }
}

/// Returns the trimmed value, or a validation error if nothing is left.
pub fn require(field: &'static str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::required(field));
    }
    Ok(trimmed.to_string())
}
