//! Generative fallback backend
//!
//! Implements [`concierge_core::GenerativeBackend`] against an
//! Ollama-compatible endpoint. This channel is optional: the pipeline runs
//! fully rule-based without it, and every call through here is bounded by
//! the configured timeout so a stuck model can never stall a turn.

mod backend;
mod prompt;

pub use backend::OllamaBackend;
pub use prompt::PromptBuilder;
