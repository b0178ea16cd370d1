//! Core domain types for the hotel concierge pipeline
//!
//! This crate defines the shared vocabulary of the system: intents, entities,
//! dialogue context, catalog records, pricing quotes and analytics entries.
//! It carries no behavior beyond small helpers and has no knowledge of how
//! patterns are matched or replies rendered.
//!
//! Seam traits (currently only [`GenerativeBackend`]) also live here so that
//! higher crates can depend on the abstraction without pulling in the
//! implementation crate.

mod analytics;
mod catalog;
mod context;
mod entity;
mod intent;
mod quote;
pub mod traits;

pub use analytics::QueryLogEntry;
pub use catalog::{FaqEntry, RoomRecord, RoomType};
pub use context::{ContextPatch, DialogueContext};
pub use entity::{Entity, EntityKind, EntityValue};
pub use intent::Intent;
pub use quote::Quote;
pub use traits::{GenerativeBackend, GenerativeError};
