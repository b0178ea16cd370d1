//! In-memory data store
//!
//! Process-local catalog, FAQ table and query log behind `RwLock`s. The
//! seeded catalog matches the property's current rate card; deployments that
//! need durable analytics swap in a different [`DataStore`] implementation.

use async_trait::async_trait;
use concierge_core::{FaqEntry, QueryLogEntry, RoomRecord, RoomType};
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::{DataStore, StoreError};

/// Thread-safe in-memory store.
pub struct InMemoryStore {
    rooms: RwLock<HashMap<RoomType, RoomRecord>>,
    faqs: Vec<FaqEntry>,
    query_log: RwLock<Vec<QueryLogEntry>>,
}

impl InMemoryStore {
    /// Empty store; useful for tests that seed their own data.
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            faqs: Vec::new(),
            query_log: RwLock::new(Vec::new()),
        }
    }

    /// Store seeded with the standard catalog and FAQ table.
    pub fn seeded() -> Self {
        let mut rooms = HashMap::new();
        for record in seed_rooms() {
            rooms.insert(record.room_type, record);
        }
        let store = Self {
            rooms: RwLock::new(rooms),
            faqs: seed_faqs(),
            query_log: RwLock::new(Vec::new()),
        };
        tracing::info!(
            rooms = store.rooms.read().len(),
            faqs = store.faqs.len(),
            "In-memory store seeded"
        );
        store
    }

    /// Replace or insert one catalog entry.
    pub fn upsert_room(&self, record: RoomRecord) {
        self.rooms.write().insert(record.room_type, record);
    }

    /// Number of logged queries so far.
    pub fn query_count(&self) -> usize {
        self.query_log.read().len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn get_room(&self, room_type: RoomType) -> Result<RoomRecord, StoreError> {
        self.rooms
            .read()
            .get(&room_type)
            .cloned()
            .ok_or(StoreError::RoomNotFound(room_type))
    }

    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, StoreError> {
        let mut rooms: Vec<RoomRecord> = self.rooms.read().values().cloned().collect();
        rooms.sort_by_key(|r| r.list_price);
        Ok(rooms)
    }

    async fn find_faq(&self, normalized: &str) -> Result<Option<FaqEntry>, StoreError> {
        // Most keyword hits wins; earlier table order breaks ties.
        let best = self
            .faqs
            .iter()
            .map(|faq| {
                let hits = faq
                    .keywords
                    .iter()
                    .filter(|kw| normalized.contains(kw.as_str()))
                    .count();
                (hits, faq)
            })
            .filter(|(hits, _)| *hits > 0)
            .max_by_key(|(hits, _)| *hits)
            .map(|(_, faq)| faq.clone());
        Ok(best)
    }

    async fn log_query(&self, entry: QueryLogEntry) -> Result<(), StoreError> {
        self.query_log.write().push(entry);
        Ok(())
    }

    async fn recent_queries(&self, limit: usize) -> Result<Vec<QueryLogEntry>, StoreError> {
        let log = self.query_log.read();
        Ok(log.iter().rev().take(limit).cloned().collect())
    }
}

fn room(
    room_type: RoomType,
    list_price: i64,
    description: &str,
    amenities: &str,
    inventory: u32,
) -> RoomRecord {
    RoomRecord {
        room_type,
        list_price,
        description: description.to_string(),
        amenities: amenities.to_string(),
        inventory,
    }
}

fn seed_rooms() -> Vec<RoomRecord> {
    vec![
        room(
            RoomType::Standard,
            3_000,
            "Cozy room with all the essentials for a comfortable stay",
            "Queen bed, AC, TV, Free WiFi, Tea/coffee maker",
            10,
        ),
        room(
            RoomType::Deluxe,
            5_000,
            "Spacious room with a city view and premium furnishings",
            "King bed, AC, Smart TV, Free WiFi, Mini bar, City view",
            5,
        ),
        room(
            RoomType::Executive,
            6_500,
            "Premium room with a dedicated work area and lounge access",
            "King bed, AC, Smart TV, Free WiFi, Mini bar, Work desk, Lounge access",
            4,
        ),
        room(
            RoomType::Suite,
            8_000,
            "Luxury suite with a separate living area and panoramic views",
            "King bed, Living room, AC, Smart TV, Free WiFi, Mini bar, Bathtub, Balcony",
            2,
        ),
    ]
}

fn faq(question: &str, answer: &str, keywords: &[&str]) -> FaqEntry {
    FaqEntry {
        question: question.to_string(),
        answer: answer.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

fn seed_faqs() -> Vec<FaqEntry> {
    vec![
        faq(
            "What are the check-in and check-out times?",
            "Check-in is from 2 PM and check-out is until 11 AM. Early check-in is subject to availability.",
            &["check-in", "check in", "check-out", "check out", "checkin", "checkout"],
        ),
        faq(
            "Do you provide airport pickup?",
            "Yes, we offer airport pickup and drop at an additional charge. Please share your flight details a day in advance.",
            &["airport", "pickup", "pick up", "shuttle", "drop"],
        ),
        faq(
            "Is WiFi available?",
            "Yes, complimentary high-speed WiFi is available in all rooms and common areas.",
            &["wifi", "wi-fi", "internet", "password"],
        ),
        faq(
            "What is the cancellation policy?",
            "Free cancellation up to 24 hours before check-in. Later cancellations are charged one night's tariff.",
            &["cancel", "cancellation", "refund"],
        ),
        faq(
            "Is parking available?",
            "Yes, free parking is available for all our guests.",
            &["parking", "park", "car"],
        ),
        faq(
            "Is breakfast included?",
            "A complimentary breakfast buffet is served from 7 AM to 10:30 AM for all direct bookings.",
            &["breakfast", "food", "meal", "dining", "restaurant"],
        ),
        faq(
            "What payment methods do you accept?",
            "We accept credit and debit cards, UPI, and cash at the front desk.",
            &["payment", "pay", "credit card", "debit card", "cash", "upi"],
        ),
        faq(
            "Are pets allowed?",
            "We're sorry, pets are not allowed at the property, with the exception of service animals.",
            &["pet", "pets", "dog", "cat", "animal"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_catalog_serves_every_room_type() {
        let store = InMemoryStore::seeded();
        for room_type in RoomType::ALL {
            let record = store.get_room(room_type).await.unwrap();
            assert_eq!(record.room_type, room_type);
            assert!(record.list_price > 0);
            assert!(record.is_available());
        }
    }

    #[tokio::test]
    async fn missing_catalog_entry_is_room_not_found() {
        let store = InMemoryStore::new();
        let err = store.get_room(RoomType::Suite).await.unwrap_err();
        assert!(matches!(err, StoreError::RoomNotFound(RoomType::Suite)));
    }

    #[tokio::test]
    async fn list_rooms_is_cheapest_first() {
        let store = InMemoryStore::seeded();
        let rooms = store.list_rooms().await.unwrap();
        assert_eq!(rooms.len(), 4);
        let prices: Vec<i64> = rooms.iter().map(|r| r.list_price).collect();
        let mut sorted = prices.clone();
        sorted.sort();
        assert_eq!(prices, sorted);
    }

    #[tokio::test]
    async fn faq_routing_picks_the_best_keyword_match() {
        let store = InMemoryStore::seeded();

        let hit = store.find_faq("is wifi free in the rooms").await.unwrap();
        assert!(hit.unwrap().answer.contains("WiFi"));

        let hit = store
            .find_faq("what is your cancellation policy")
            .await
            .unwrap();
        assert!(hit.unwrap().answer.contains("cancellation"));

        let miss = store.find_faq("tell me a joke").await.unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn query_log_appends_and_reads_newest_first() {
        let store = InMemoryStore::seeded();
        store
            .log_query(QueryLogEntry::new(
                concierge_core::Intent::Greeting,
                true,
                3,
                5,
            ))
            .await
            .unwrap();
        store
            .log_query(QueryLogEntry::new(
                concierge_core::Intent::PricingInquiry,
                true,
                7,
                28,
            ))
            .await
            .unwrap();

        assert_eq!(store.query_count(), 2);
        let recent = store.recent_queries(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].intent, concierge_core::Intent::PricingInquiry);
    }
}
