//! Configuration for the hotel concierge pipeline
//!
//! Two documents live here:
//!
//! - [`Settings`]: runtime knobs (business rules, generative channel),
//!   layered from an optional TOML file plus `CONCIERGE_*` environment
//!   variables.
//! - [`PatternLibrary`]: the declarative lexical tables the NLU crate
//!   compiles — intent trigger patterns with priorities, and entity
//!   vocabularies. Ships with a complete built-in hotel default and can be
//!   overridden from YAML.
//!
//! Both are constructed once at startup and passed around by reference;
//! there is no global mutable configuration state.

mod patterns;
mod settings;

pub use patterns::{
    EntityPatterns, IntentPatterns, NumberWord, PatternLibrary, RoomSynonym,
};
pub use settings::{BusinessSettings, GenerativeSettings, NluSettings, Settings};

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pattern library: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),
}
