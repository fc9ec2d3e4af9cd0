//! Permission and position state for the traveler's device.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::domain::GeoLocation;

use super::source::LocationSource;

/// Default upper bound on a single location lookup.
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether the traveler has shared their position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Unknown,
    Granted,
    Denied,
}

/// Resolved location state. Coordinates exist only when granted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum LocationStatus {
    #[default]
    Unknown,
    Granted(GeoLocation),
    Denied,
}

impl LocationStatus {
    pub fn permission(&self) -> PermissionState {
        match self {
            LocationStatus::Unknown => PermissionState::Unknown,
            LocationStatus::Granted(_) => PermissionState::Granted,
            LocationStatus::Denied => PermissionState::Denied,
        }
    }

    pub fn location(&self) -> Option<GeoLocation> {
        match self {
            LocationStatus::Granted(loc) => Some(*loc),
            _ => None,
        }
    }
}

/// Read handle on the location state, shared by catalogs and services.
pub type LocationWatch = watch::Receiver<LocationStatus>;

/// Error reported to a caller whose request never resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// The lookup was cancelled before it finished.
    #[error("location request cancelled")]
    Cancelled,
}

/// Requests and holds the device's coordinates.
///
/// Each lookup runs on its own task so callers never block. The most recently
/// issued request wins: a slower, older lookup that finishes after a newer one
/// has been applied is discarded. A lookup resolves on its task, so it still
/// lands if the caller stops waiting.
pub struct GeoLocationProvider {
    source: Arc<dyn LocationSource>,
    timeout: Duration,
    /// Ticket of the most recently issued request.
    issued: AtomicU64,
    shared: Arc<Shared>,
}

/// State touched by both the provider and its lookup tasks.
struct Shared {
    state: watch::Sender<LocationStatus>,
    /// Ticket of the request whose outcome is currently applied.
    applied: AtomicU64,
    pending: Mutex<HashMap<u64, AbortHandle>>,
}

impl Shared {
    fn apply(&self, ticket: u64, resolved: LocationStatus) {
        self.state.send_if_modified(|current| {
            if ticket <= self.applied.load(Ordering::SeqCst) {
                debug!(ticket, "discarding superseded location result");
                return false;
            }
            self.applied.store(ticket, Ordering::SeqCst);
            if *current == resolved {
                return false;
            }
            info!(
                from = ?current.permission(),
                to = ?resolved.permission(),
                "location permission changed"
            );
            *current = resolved;
            true
        });
    }

    fn pending(&self) -> MutexGuard<'_, HashMap<u64, AbortHandle>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Removes a lookup from the pending table however its task ends.
struct PendingEntry {
    shared: Arc<Shared>,
    ticket: u64,
}

impl Drop for PendingEntry {
    fn drop(&mut self) {
        self.shared.pending().remove(&self.ticket);
    }
}

impl GeoLocationProvider {
    /// Create a provider in the `Unknown` state.
    pub fn new(source: Arc<dyn LocationSource>, timeout: Duration) -> Self {
        let (state, _) = watch::channel(LocationStatus::Unknown);
        Self {
            source,
            timeout,
            issued: AtomicU64::new(0),
            shared: Arc::new(Shared {
                state,
                applied: AtomicU64::new(0),
                pending: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Current state snapshot.
    pub fn status(&self) -> LocationStatus {
        *self.shared.state.borrow()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> LocationWatch {
        self.shared.state.subscribe()
    }

    /// Number of lookups still in flight.
    pub fn pending_requests(&self) -> usize {
        self.shared.pending().len()
    }

    /// Ask the device for its position and update the shared state.
    ///
    /// Denial, platform errors and timeouts all resolve to
    /// [`LocationStatus::Denied`]. Returns the state in force once this
    /// request has been applied (or superseded).
    pub async fn request_permission(&self) -> Result<LocationStatus, LocationError> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let source = Arc::clone(&self.source);
        let timeout = self.timeout;
        let entry = PendingEntry {
            shared: Arc::clone(&self.shared),
            ticket,
        };

        let task = {
            // held until the handle is recorded, so the entry cannot be
            // removed before it exists
            let mut pending = self.shared.pending();
            let task = tokio::spawn(async move {
                let resolved = match tokio::time::timeout(timeout, source.locate()).await {
                    Ok(Ok(location)) => LocationStatus::Granted(location),
                    Ok(Err(reason)) => {
                        debug!(%reason, "location lookup refused");
                        LocationStatus::Denied
                    }
                    Err(_) => {
                        warn!(timeout_ms = timeout.as_millis() as u64, "location lookup timed out");
                        LocationStatus::Denied
                    }
                };
                entry.shared.apply(ticket, resolved);
                drop(entry);
            });
            pending.insert(ticket, task.abort_handle());
            task
        };

        match task.await {
            Ok(()) => Ok(self.status()),
            Err(e) if e.is_cancelled() => {
                debug!(ticket, "location request cancelled");
                Err(LocationError::Cancelled)
            }
            Err(e) => {
                warn!(error = %e, "location source failed");
                self.shared.apply(ticket, LocationStatus::Denied);
                Ok(self.status())
            }
        }
    }

    /// Abort every lookup in flight. Waiting callers get
    /// [`LocationError::Cancelled`]; the state is left as it was.
    pub fn cancel(&self) -> usize {
        let handles: Vec<_> = self.shared.pending().drain().map(|(_, h)| h).collect();
        let count = handles.len();
        for handle in handles {
            handle.abort();
        }
        if count > 0 {
            info!(count, "cancelled pending location requests");
        }
        count
    }
}

impl Drop for GeoLocationProvider {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for GeoLocationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoLocationProvider")
            .field("status", &self.status())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
