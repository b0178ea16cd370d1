//! Query analytics entry
//!
//! One append-only record per processed turn, success or failure.

use crate::Intent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Write-once record describing one turn through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub timestamp: DateTime<Utc>,
    pub intent: Intent,
    /// False when the turn ended on an apology/failure path.
    pub success: bool,
    pub latency_ms: u64,
    /// Length of the raw utterance in characters. The utterance text itself
    /// is not logged.
    pub utterance_len: usize,
}

impl QueryLogEntry {
    pub fn new(intent: Intent, success: bool, latency_ms: u64, utterance_len: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            intent,
            success,
            latency_ms,
            utterance_len,
        }
    }
}
