//! Append-only record of trip requests.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{CoreError, TripId, TripRequest};

#[derive(Debug, Default)]
struct TripLog {
    trips: Vec<TripRequest>,
    /// Position of each trip in `trips`.
    index: HashMap<TripId, usize>,
}

/// Submitted trip requests, in submission order.
///
/// There is no update or removal: the store only grows for the life of the
/// process.
#[derive(Debug, Default)]
pub struct TripStore {
    inner: RwLock<TripLog>,
}

impl TripStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trip. Fails with [`CoreError::DuplicateId`] if the id is taken.
    pub async fn append(&self, trip: TripRequest) -> Result<(), CoreError> {
        let mut guard = self.inner.write().await;
        if guard.index.contains_key(trip.id()) {
            return Err(CoreError::DuplicateId(trip.id().clone()));
        }

        info!(
            id = %trip.id(),
            origin = trip.origin(),
            destination = trip.destination(),
            mode = %trip.mode(),
            "recorded trip"
        );
        let position = guard.trips.len();
        guard.index.insert(trip.id().clone(), position);
        guard.trips.push(trip);
        Ok(())
    }

    /// All trips in submission order.
    pub async fn list(&self) -> Vec<TripRequest> {
        self.inner.read().await.trips.clone()
    }

    pub async fn get(&self, id: &TripId) -> Option<TripRequest> {
        let guard = self.inner.read().await;
        guard.index.get(id).map(|&i| guard.trips[i].clone())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.trips.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.trips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TripForm;
    use proptest::prelude::*;

    fn trip(id: &str) -> TripRequest {
        TripRequest::new(
            TripId::from_raw(id),
            &TripForm::new("Sulthan Bathery", "IIIT Kottayam", "19:00"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn append_and_list() {
        let store = TripStore::new();
        assert!(store.is_empty().await);

        store.append(trip("TRIP1")).await.unwrap();
        store.append(trip("TRIP2")).await.unwrap();

        let ids: Vec<_> = store
            .list()
            .await
            .iter()
            .map(|t| t.id().as_str().to_string())
            .collect();
        assert_eq!(ids, ["TRIP1", "TRIP2"]);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let store = TripStore::new();
        store.append(trip("TRIP1")).await.unwrap();

        let err = store.append(trip("TRIP1")).await.unwrap_err();
        assert_eq!(err, CoreError::DuplicateId(TripId::from_raw("TRIP1")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_by_id() {
        let store = TripStore::new();
        store.append(trip("TRIP1")).await.unwrap();
        store.append(trip("TRIP2")).await.unwrap();

        let found = store.get(&TripId::from_raw("TRIP2")).await.unwrap();
        assert_eq!(found.id().as_str(), "TRIP2");
        assert!(store.get(&TripId::from_raw("TRIP3")).await.is_none());
    }

    proptest! {
        /// N distinct appends leave N trips in submission order
        #[test]
        fn distinct_appends_preserve_order(ids in proptest::collection::hash_set("[A-Z0-9]{1,8}", 0..40)) {
            let ids: Vec<String> = ids.into_iter().collect();
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let listed = rt.block_on(async {
                let store = TripStore::new();
                for id in &ids {
                    store.append(trip(id)).await.unwrap();
                }
                store.list().await
            });

            prop_assert_eq!(listed.len(), ids.len());
            for (trip, id) in listed.iter().zip(&ids) {
                prop_assert_eq!(trip.id().as_str(), id.as_str());
            }
        }
    }
}
