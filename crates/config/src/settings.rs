//! Runtime settings
//!
//! Layering order: built-in defaults, then an optional TOML file, then
//! `CONCIERGE_*` environment variables (`CONCIERGE_BUSINESS__DISCOUNT_PERCENT=10`).

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Top-level application settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Business rules (discount, currency).
    #[serde(default)]
    pub business: BusinessSettings,

    /// NLU knobs.
    #[serde(default)]
    pub nlu: NluSettings,

    /// Optional generative fallback channel.
    #[serde(default)]
    pub generative: GenerativeSettings,
}

/// Business logic configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessSettings {
    /// Direct-booking discount off the list price, whole percent.
    #[serde(default = "default_discount_percent")]
    pub discount_percent: u8,

    /// Symbol used when formatting prices in replies.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_discount_percent() -> u8 {
    15
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for BusinessSettings {
    fn default() -> Self {
        Self {
            discount_percent: default_discount_percent(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// NLU configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NluSettings {
    /// Optional YAML file overriding the built-in pattern library.
    #[serde(default)]
    pub patterns_path: Option<String>,
}

/// Generative fallback configuration.
///
/// Disabled by default; the pipeline is fully rule-based without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerativeSettings {
    #[serde(default)]
    pub enabled: bool,

    /// Ollama-compatible endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Hard ceiling for one generation call, in milliseconds. On expiry the
    /// turn falls back to the clarification template.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "qwen3:4b-instruct-2507-q4_K_M".to_string()
}

fn default_timeout_ms() -> u64 {
    4_000
}

fn default_max_tokens() -> usize {
    200
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for GenerativeSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix("CONCIERGE").separator("__"))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        tracing::debug!(
            discount_percent = settings.business.discount_percent,
            generative_enabled = settings.generative.enabled,
            "Settings loaded"
        );
        Ok(settings)
    }
}
