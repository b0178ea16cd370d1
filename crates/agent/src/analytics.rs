//! Analytics recorder
//!
//! Writes exactly one query log entry per turn. A failed write is logged
//! and swallowed; analytics must never affect the reply path.

use concierge_core::QueryLogEntry;
use concierge_store::DataStore;
use std::sync::Arc;

pub struct AnalyticsRecorder {
    store: Arc<dyn DataStore>,
}

impl AnalyticsRecorder {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Record one turn. Infallible from the caller's point of view.
    pub async fn record(&self, entry: QueryLogEntry) {
        let (intent, success, latency_ms) = (entry.intent, entry.success, entry.latency_ms);
        if let Err(e) = self.store.log_query(entry).await {
            tracing::warn!(%intent, success, latency_ms, error = %e, "Dropping analytics entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use concierge_core::{FaqEntry, Intent, RoomRecord, RoomType};
    use concierge_store::{InMemoryStore, StoreError};

    struct FailingStore;

    #[async_trait]
    impl DataStore for FailingStore {
        async fn get_room(&self, _room_type: RoomType) -> Result<RoomRecord, StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn list_rooms(&self) -> Result<Vec<RoomRecord>, StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn find_faq(&self, _normalized: &str) -> Result<Option<FaqEntry>, StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn log_query(&self, _entry: QueryLogEntry) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn recent_queries(&self, _limit: usize) -> Result<Vec<QueryLogEntry>, StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
    }

    #[tokio::test]
    async fn successful_write_lands_in_the_store() {
        let store = Arc::new(InMemoryStore::seeded());
        let recorder = AnalyticsRecorder::new(store.clone());
        recorder
            .record(QueryLogEntry::new(Intent::Greeting, true, 2, 5))
            .await;
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn failed_write_is_swallowed() {
        let recorder = AnalyticsRecorder::new(Arc::new(FailingStore));
        // Must not panic or propagate.
        recorder
            .record(QueryLogEntry::new(Intent::Faq, false, 9, 20))
            .await;
    }
}
