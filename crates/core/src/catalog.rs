//! Room catalog and FAQ records
//!
//! These types mirror what the data store serves. They are read-only to the
//! pipeline; ownership of the underlying data stays with the store.

use serde::{Deserialize, Serialize};

/// Room categories the hotel sells.
///
/// The vocabulary is fixed; synonym folding in the extractor maps phrases
/// like "luxury room" onto these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Standard,
    Deluxe,
    Executive,
    Suite,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::Standard,
        RoomType::Deluxe,
        RoomType::Executive,
        RoomType::Suite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Standard => "standard",
            RoomType::Deluxe => "deluxe",
            RoomType::Executive => "executive",
            RoomType::Suite => "suite",
        }
    }

    /// Display name used in replies ("Deluxe Room").
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomType::Standard => "Standard Room",
            RoomType::Deluxe => "Deluxe Room",
            RoomType::Executive => "Executive Room",
            RoomType::Suite => "Suite Room",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the room catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRecord {
    pub room_type: RoomType,
    /// List (rack/OTA) price per night in whole rupees.
    pub list_price: i64,
    pub description: String,
    /// Comma-separated amenity list as stored in the catalog.
    pub amenities: String,
    /// Rooms currently bookable. Zero means sold out.
    pub inventory: u32,
}

impl RoomRecord {
    pub fn is_available(&self) -> bool {
        self.inventory > 0
    }
}

/// One FAQ row: an answer plus the keywords that route a question to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    /// Lowercase trigger keywords matched against the normalized utterance.
    pub keywords: Vec<String>,
}
