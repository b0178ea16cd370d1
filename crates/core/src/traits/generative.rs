//! Generative fallback channel
//!
//! Optional alternate response source used when rule coverage is
//! insufficient. The pipeline must operate fully rule-based with this
//! channel disabled; absence of a backend is configuration, not an error.

use async_trait::async_trait;

/// Failures of the generative channel.
///
/// All variants are handled locally by the response generator and converted
/// to the clarification template; none of them reaches a caller.
#[derive(Debug, thiserror::Error)]
pub enum GenerativeError {
    #[error("generation timed out")]
    Timeout,

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("malformed backend response: {0}")]
    InvalidResponse(String),
}

/// A text-generation backend reachable over the network.
///
/// Implementations must bound every call with a timeout; `generate` is the
/// only operation in the pipeline allowed to perform network I/O.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Produce a reply for `utterance` given a short summary of the dialogue
    /// context (last intent, referenced room, turn count).
    async fn generate(
        &self,
        utterance: &str,
        context_summary: &str,
    ) -> Result<String, GenerativeError>;

    /// Cheap liveness probe, used only for logging at startup.
    async fn is_available(&self) -> bool;

    /// Model identifier for log lines.
    fn model_name(&self) -> &str;
}
