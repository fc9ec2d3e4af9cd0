//! Trip identifier issuance.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::domain::TripId;

/// Prefix on every issued trip id.
pub const TRIP_ID_PREFIX: &str = "TRIP";

/// Issues `TRIP<millis>` identifiers.
///
/// The numeric part is the current Unix time in milliseconds, bumped past
/// the last issued value when two requests land in the same millisecond (or
/// the clock steps back). Ids are therefore unique and strictly increasing
/// for the life of the generator, across threads.
#[derive(Debug, Default)]
pub struct TripIdGenerator {
    last: AtomicU64,
}

impl TripIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue an id stamped with the current time.
    pub fn issue(&self) -> TripId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.issue_at(now)
    }

    /// Issue an id for the given clock reading.
    pub fn issue_at(&self, now_millis: u64) -> TripId {
        let bump = |last: u64| now_millis.max(last.saturating_add(1));
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(bump(last)))
        {
            Ok(prev) | Err(prev) => prev,
        };
        TripId::from_raw(format!("{TRIP_ID_PREFIX}{}", bump(previous)))
    }

    /// Note an id that came from elsewhere, so later ids are issued past it.
    ///
    /// Ids not of the `TRIP<digits>` form cannot collide and are ignored.
    pub fn observe(&self, id: &TripId) {
        let stamp = id
            .as_str()
            .strip_prefix(TRIP_ID_PREFIX)
            .and_then(|digits| digits.parse::<u64>().ok())
            // leave headroom so issuance can always move forward
            .filter(|&stamp| stamp < u64::MAX / 2);
        if let Some(stamp) = stamp {
            self.last.fetch_max(stamp, Ordering::SeqCst);
        }
    }
}
