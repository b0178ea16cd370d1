//! Data access layer
//!
//! The [`DataStore`] trait is the only way the rest of the pipeline touches
//! persisted data: the room catalog, the FAQ table and the append-only query
//! log. The bundled [`InMemoryStore`] serves a seeded catalog and is the
//! default deployment; a networked store can replace it behind the same
//! trait without touching any caller.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use concierge_core::{FaqEntry, QueryLogEntry, RoomRecord, RoomType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The room type is known to the vocabulary but not sold here.
    #[error("no catalog entry for {0} rooms")]
    RoomNotFound(RoomType),

    /// The backing store could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage seam for the concierge pipeline.
///
/// Reads are frequent (every turn); `log_query` is exactly once per turn.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Catalog entry for one room type.
    async fn get_room(&self, room_type: RoomType) -> Result<RoomRecord, StoreError>;

    /// Full catalog, cheapest first.
    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, StoreError>;

    /// Best-matching FAQ for a normalized utterance, if any keyword hits.
    async fn find_faq(&self, normalized: &str) -> Result<Option<FaqEntry>, StoreError>;

    /// Append one analytics record.
    async fn log_query(&self, entry: QueryLogEntry) -> Result<(), StoreError>;

    /// Most recent analytics records, newest first.
    async fn recent_queries(&self, limit: usize) -> Result<Vec<QueryLogEntry>, StoreError>;
}
