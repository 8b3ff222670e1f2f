//! Generation client configuration.
//!
//! Environment-sourced and eagerly validated: construction fails if the API
//! credential is absent or any numeric setting falls outside its bounds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use notable_core::defaults;
use notable_core::{Error, Result};

/// Immutable per-client configuration for the generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// API credential. Required; never logged.
    pub api_key: String,
    /// Model identifier requests are issued against.
    pub model: String,
    /// Base URL of the generation API.
    pub base_url: String,
    /// Maximum output tokens per request (1..=32768). Also serves as the
    /// overall token budget an input prompt is validated against.
    pub max_output_tokens: u32,
    /// Request timeout in milliseconds (1000..=60000).
    pub timeout_ms: u64,
    /// Emit verbose config/diagnostic logging.
    pub debug: bool,
    /// Requests-per-minute budget. Informational; the provider meters the
    /// actual quota.
    pub requests_per_minute: u32,
}

/// Partial configuration for the lightweight update path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfigUpdate {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub timeout_ms: Option<u64>,
    pub debug: Option<bool>,
    pub requests_per_minute: Option<u32>,
}

impl GenerationConfig {
    /// Build a configuration from environment variables.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `GEMINI_API_KEY` | (required) | API credential |
    /// | `GEMINI_MODEL` | `gemini-2.0-flash-001` | Model identifier |
    /// | `GEMINI_BASE_URL` | Google endpoint | API base URL |
    /// | `GEMINI_MAX_OUTPUT_TOKENS` | `8192` | Output token cap (1..=32768) |
    /// | `GEMINI_TIMEOUT_MS` | `30000` | Request timeout (1000..=60000) |
    /// | `GEMINI_DEBUG` | `false` | Verbose diagnostics |
    /// | `GEMINI_REQUESTS_PER_MINUTE` | `60` | RPM budget (> 0) |
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("GEMINI_API_KEY is not set".to_string()))?;

        let config = Self {
            api_key,
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| defaults::GEN_MODEL.to_string()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| defaults::GEMINI_BASE_URL.to_string()),
            max_output_tokens: std::env::var("GEMINI_MAX_OUTPUT_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::GEN_MAX_OUTPUT_TOKENS),
            timeout_ms: std::env::var("GEMINI_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::GEN_TIMEOUT_MS),
            debug: std::env::var("GEMINI_DEBUG")
                .map(|v| v == "1" || v.to_lowercase() == "true")
                .unwrap_or(false),
            requests_per_minute: std::env::var("GEMINI_REQUESTS_PER_MINUTE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::GEN_REQUESTS_PER_MINUTE),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate all bounds. Called eagerly at construction.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::Config("API key must not be empty".to_string()));
        }
        if self.model.is_empty() {
            return Err(Error::Config("Model identifier must not be empty".to_string()));
        }
        if !(defaults::GEN_MAX_OUTPUT_TOKENS_MIN..=defaults::GEN_MAX_OUTPUT_TOKENS_MAX)
            .contains(&self.max_output_tokens)
        {
            return Err(Error::Config(format!(
                "max_output_tokens must be within {}..={}, got {}",
                defaults::GEN_MAX_OUTPUT_TOKENS_MIN,
                defaults::GEN_MAX_OUTPUT_TOKENS_MAX,
                self.max_output_tokens
            )));
        }
        if !(defaults::GEN_TIMEOUT_MS_MIN..=defaults::GEN_TIMEOUT_MS_MAX)
            .contains(&self.timeout_ms)
        {
            return Err(Error::Config(format!(
                "timeout_ms must be within {}..={}, got {}",
                defaults::GEN_TIMEOUT_MS_MIN,
                defaults::GEN_TIMEOUT_MS_MAX,
                self.timeout_ms
            )));
        }
        if self.requests_per_minute == 0 {
            return Err(Error::Config(
                "requests_per_minute must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Merge a partial update into this configuration.
    ///
    /// Intentionally skips re-validation: this is the documented lightweight
    /// update path for runtime tuning. Callers that need bound checks can
    /// run [`GenerationConfig::validate`] afterwards.
    pub fn apply(&mut self, update: GenerationConfigUpdate) {
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(base_url) = update.base_url {
            self.base_url = base_url;
        }
        if let Some(max_output_tokens) = update.max_output_tokens {
            self.max_output_tokens = max_output_tokens;
        }
        if let Some(timeout_ms) = update.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(debug) = update.debug {
            self.debug = debug;
        }
        if let Some(rpm) = update.requests_per_minute {
            self.requests_per_minute = rpm;
        }
    }

    /// Log the active configuration at debug level. The credential is never
    /// logged; only its length.
    pub fn log(&self) {
        if self.debug {
            debug!(
                subsystem = "ai",
                component = "config",
                model = %self.model,
                base_url = %self.base_url,
                max_output_tokens = self.max_output_tokens,
                timeout_ms = self.timeout_ms,
                requests_per_minute = self.requests_per_minute,
                api_key_len = self.api_key.len(),
                "Generation config loaded"
            );
        }
    }
}
