//! Gemini generation client.
//!
//! The façade over the external text-generation API. Owns input validation,
//! token-budget enforcement with a single truncation self-correction, retry
//! with exponential backoff, error classification, and usage accounting.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, warn};

use notable_core::defaults;
use notable_core::tokenizer::{estimate_tokens, fits_token_budget, truncate_to_tokens};
use notable_core::{
    Error, GenerationErrorKind, GenerationOptions, Result, TextGenerator, UsageLogEntry,
    UsageStats,
};

use super::types::*;
use crate::classify::classify;
use crate::config::{GenerationConfig, GenerationConfigUpdate};
use crate::retry::with_retry;
use crate::usage::UsageLog;

/// Fixed prompt used by the health probe.
const HEALTH_CHECK_PROMPT: &str = "Hello";

/// Output cap for the health probe.
const HEALTH_CHECK_MAX_TOKENS: u32 = 10;

/// Client for the Gemini generateContent API.
///
/// Explicitly constructed and passed to orchestrators; there is no global
/// instance. The usage log is owned exclusively by this client.
pub struct GeminiClient {
    http: Client,
    config: RwLock<GenerationConfig>,
    usage: UsageLog,
}

impl GeminiClient {
    /// Create a client from a validated configuration.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        config.log();

        let http = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "ai",
            component = "gemini",
            model = %config.model,
            "Generation client initialized"
        );

        Ok(Self {
            http,
            config: RwLock::new(config),
            usage: UsageLog::default(),
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(GenerationConfig::from_env()?)
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> GenerationConfig {
        self.config.read().expect("config lock poisoned").clone()
    }

    /// Merge a partial configuration update.
    ///
    /// Deliberately skips bound re-validation; see
    /// [`GenerationConfig::apply`].
    pub fn update_config(&self, update: GenerationConfigUpdate) {
        let mut config = self.config.write().expect("config lock poisoned");
        config.apply(update);
        config.log();
    }

    /// Aggregate usage statistics over the retained log.
    pub fn usage_stats(&self) -> UsageStats {
        self.usage.stats()
    }

    /// Most recent usage log entries, oldest first.
    pub fn recent_usage(&self, n: usize) -> Vec<UsageLogEntry> {
        self.usage.recent(n)
    }

    /// Empty the usage log.
    pub fn clear_usage_log(&self) {
        self.usage.clear();
    }

    async fn generate_inner(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("Prompt must not be empty".to_string()));
        }

        let budget = {
            let config = self.config.read().expect("config lock poisoned");
            config.max_output_tokens as usize
        };

        // Single self-correction: an over-budget prompt is truncated once,
        // proportionally to the overage. The truncated prompt is guaranteed
        // to fit, so this never loops.
        let input_tokens = estimate_tokens(trimmed);
        let prompt = if fits_token_budget(input_tokens, budget) {
            trimmed.to_string()
        } else {
            let reserved = defaults::RESERVED_TOKENS_ABS
                .min((budget as f64 * defaults::RESERVED_TOKENS_FRACTION) as usize);
            let truncated = truncate_to_tokens(trimmed, budget.saturating_sub(reserved));
            warn!(
                subsystem = "ai",
                component = "gemini",
                input_tokens,
                budget,
                truncated_tokens = estimate_tokens(&truncated),
                "Prompt exceeded token budget, truncated"
            );
            truncated
        };

        let model = self.model_name();
        let input_tokens = estimate_tokens(&prompt);
        let start = Instant::now();

        let result = with_retry(|| self.call_api(&prompt, options)).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(text) => {
                self.usage.record(UsageLogEntry {
                    timestamp: Utc::now(),
                    model,
                    input_tokens,
                    output_tokens: estimate_tokens(&text),
                    latency_ms,
                    success: true,
                    error: None,
                });
                Ok(text)
            }
            Err(error) => {
                self.usage.record(UsageLogEntry {
                    timestamp: Utc::now(),
                    model,
                    input_tokens,
                    output_tokens: 0,
                    latency_ms,
                    success: false,
                    error: Some(error.to_string()),
                });
                Err(error)
            }
        }
    }

    /// One network attempt against the generateContent endpoint. All
    /// failures leave here already classified.
    async fn call_api(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let (url, api_key, timeout, generation_config) = {
            let config = self.config.read().expect("config lock poisoned");
            (
                format!(
                    "{}/v1beta/models/{}:generateContent",
                    config.base_url.trim_end_matches('/'),
                    config.model
                ),
                config.api_key.clone(),
                Duration::from_millis(config.timeout_ms),
                WireGenerationConfig {
                    max_output_tokens: options.max_tokens.unwrap_or(config.max_output_tokens),
                    temperature: options.temperature.unwrap_or(defaults::GEN_TEMPERATURE),
                    top_p: options.top_p.unwrap_or(defaults::GEN_TOP_P),
                    top_k: options.top_k.unwrap_or(defaults::GEN_TOP_K),
                },
            )
        };

        debug!(
            subsystem = "ai",
            component = "gemini",
            op = "generate",
            prompt_len = prompt.len(),
            max_output_tokens = generation_config.max_output_tokens,
            "Issuing generation request"
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config,
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &api_key)
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body: ApiErrorResponse = response.json().await.unwrap_or_default();
            let kind = classify(Some(status.as_u16()), &body.error.message);
            warn!(
                subsystem = "ai",
                component = "gemini",
                status = status.as_u16(),
                kind = %kind,
                error = %body.error.message,
                "Generation request rejected"
            );
            return Err(Error::Generation {
                kind,
                message: kind.user_message().to_string(),
            });
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            warn!(
                subsystem = "ai",
                component = "gemini",
                error = %e,
                "Malformed generation response"
            );
            Error::Generation {
                kind: GenerationErrorKind::Unknown,
                message: GenerationErrorKind::Unknown.user_message().to_string(),
            }
        })?;

        let text = body.first_text().unwrap_or_default();
        if text.trim().is_empty() {
            return Err(Error::Generation {
                kind: GenerationErrorKind::Unknown,
                message: "The model returned an empty response.".to_string(),
            });
        }

        debug!(
            subsystem = "ai",
            component = "gemini",
            op = "generate",
            response_len = text.len(),
            "Generation succeeded"
        );

        Ok(text.to_string())
    }
}

/// Classify a reqwest-level failure into a generation error.
fn transport_error(error: reqwest::Error) -> Error {
    let kind = if error.is_timeout() {
        GenerationErrorKind::Timeout
    } else if error.is_connect() {
        GenerationErrorKind::Network
    } else {
        classify(None, &error.to_string())
    };

    warn!(
        subsystem = "ai",
        component = "gemini",
        kind = %kind,
        error = %error,
        "Generation transport failure"
    );

    Error::Generation {
        kind,
        message: kind.user_message().to_string(),
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        self.generate_inner(prompt, &options).await
    }

    async fn health_check(&self) -> bool {
        let options = GenerationOptions {
            max_tokens: Some(HEALTH_CHECK_MAX_TOKENS),
            ..Default::default()
        };

        match self.generate_inner(HEALTH_CHECK_PROMPT, &options).await {
            Ok(text) => !text.trim().is_empty(),
            Err(error) => {
                warn!(
                    subsystem = "ai",
                    component = "gemini",
                    op = "health_check",
                    error = %error,
                    "Health check failed"
                );
                false
            }
        }
    }

    fn model_name(&self) -> String {
        self.config.read().expect("config lock poisoned").model.clone()
    }
}
