//! Conversational concierge pipeline
//!
//! Ties the pieces together: normalize an utterance, classify its intent,
//! extract entities, resolve references against the session's dialogue
//! context, render a reply and record one analytics entry. The public
//! surface is [`ConciergeAgent::respond`], which always returns a reply
//! string; every failure path inside the turn degrades to an apology or a
//! clarification instead of an error.

mod agent;
mod analytics;
mod pricing;
mod session;
mod templates;

pub use agent::ConciergeAgent;
pub use analytics::AnalyticsRecorder;
pub use pricing::PricingCalculator;
pub use session::SessionManager;
pub use templates::ReplyTemplates;

use thiserror::Error;

/// Construction-time failures. Turn processing itself never returns these.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Config(#[from] concierge_config::ConfigError),

    #[error(transparent)]
    Store(#[from] concierge_store::StoreError),
}
