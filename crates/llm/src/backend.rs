//! Ollama backend
//!
//! Talks to an Ollama-compatible `/api/generate` endpoint. Every `generate`
//! call is wrapped in `tokio::time::timeout` with the configured ceiling, on
//! top of the HTTP client's own timeout; transient network failures are
//! retried with backoff as long as the outer deadline allows.

use async_trait::async_trait;
use concierge_config::GenerativeSettings;
use concierge_core::{GenerativeBackend, GenerativeError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::PromptBuilder;

const MAX_RETRIES: u32 = 2;
const INITIAL_BACKOFF: Duration = Duration::from_millis(100);

/// Generative backend over the Ollama HTTP API.
#[derive(Clone)]
pub struct OllamaBackend {
    client: Client,
    settings: GenerativeSettings,
    prompt: PromptBuilder,
}

impl OllamaBackend {
    pub fn new(settings: GenerativeSettings) -> Result<Self, GenerativeError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| GenerativeError::Request(format!("http client: {e}")))?;
        Ok(Self {
            client,
            settings,
            prompt: PromptBuilder::default(),
        })
    }

    pub fn with_prompt(mut self, prompt: PromptBuilder) -> Self {
        self.prompt = prompt;
        self
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.settings.endpoint, path)
    }

    async fn execute(&self, request: &GenerateRequest) -> Result<String, GenerativeError> {
        let response = self
            .client
            .post(self.api_url("/generate"))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerativeError::Timeout
                } else if e.is_connect() {
                    GenerativeError::Unavailable(e.to_string())
                } else {
                    GenerativeError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.is_server_error() {
                return Err(GenerativeError::Unavailable(format!("{status}: {body}")));
            }
            return Err(GenerativeError::Request(format!("{status}: {body}")));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerativeError::InvalidResponse(e.to_string()))?;

        let text = parsed.response.trim();
        if text.is_empty() {
            return Err(GenerativeError::InvalidResponse(
                "empty completion".to_string(),
            ));
        }
        Ok(text.to_string())
    }

    fn is_retryable(error: &GenerativeError) -> bool {
        matches!(
            error,
            GenerativeError::Unavailable(_) | GenerativeError::Timeout
        )
    }

    async fn generate_with_retry(
        &self,
        request: &GenerateRequest,
    ) -> Result<String, GenerativeError> {
        let mut backoff = INITIAL_BACKOFF;
        let mut last_error = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                tracing::warn!(attempt, ?backoff, "Generation failed, retrying");
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            match self.execute(request).await {
                Ok(text) => return Ok(text),
                Err(e) if Self::is_retryable(&e) => last_error = Some(e),
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| GenerativeError::Unavailable("retries exhausted".to_string())))
    }
}

#[async_trait]
impl GenerativeBackend for OllamaBackend {
    async fn generate(
        &self,
        utterance: &str,
        context_summary: &str,
    ) -> Result<String, GenerativeError> {
        let request = GenerateRequest {
            model: self.settings.model.clone(),
            prompt: self.prompt.build(utterance, context_summary),
            stream: false,
            options: GenerateOptions {
                temperature: self.settings.temperature,
                num_predict: self.settings.max_tokens as i32,
            },
        };

        // Outer deadline bounds the whole call, retries included.
        let deadline = Duration::from_millis(self.settings.timeout_ms);
        match tokio::time::timeout(deadline, self.generate_with_retry(&request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout_ms = self.settings.timeout_ms, "Generation deadline hit");
                Err(GenerativeError::Timeout)
            }
        }
    }

    async fn is_available(&self) -> bool {
        self.client
            .get(self.api_url("/tags"))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: i32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}
