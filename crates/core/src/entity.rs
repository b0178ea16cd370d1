//! Extracted entities
//!
//! An entity is a typed fact pulled out of one utterance, together with the
//! byte span it was found at. Extraction never fails; an utterance with no
//! recognizable entities simply yields none.

use crate::RoomType;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Entity type tag, used for per-type dedup and lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    RoomType,
    Quantity,
    Date,
}

/// Typed entity value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityValue {
    Room(RoomType),
    /// Small count (rooms, nights, guests), already bounds-checked.
    Quantity(u32),
    /// Date expression as matched ("tomorrow", "12/05/2026"). Calendar
    /// resolution is left to the booking layer; the pipeline only needs to
    /// know a date was mentioned.
    Date(String),
}

/// One extracted fragment: value plus its span in the normalized utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub value: EntityValue,
    pub span: Range<usize>,
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self.value {
            EntityValue::Room(_) => EntityKind::RoomType,
            EntityValue::Quantity(_) => EntityKind::Quantity,
            EntityValue::Date(_) => EntityKind::Date,
        }
    }

    /// Room type carried by this entity, if it is one.
    pub fn room_type(&self) -> Option<RoomType> {
        match self.value {
            EntityValue::Room(room) => Some(room),
            _ => None,
        }
    }
}
