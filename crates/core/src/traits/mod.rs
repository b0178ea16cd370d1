//! Seam traits
//!
//! Abstractions implemented outside this crate so the orchestrator can be
//! tested with mocks and backends can be swapped by configuration.

mod generative;

pub use generative::{GenerativeBackend, GenerativeError};
