//! Centralized default constants for the notable system.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers. When adding new constants, place them in the appropriate
//! section and document the rationale for the chosen value.

// =============================================================================
// GENERATION
// =============================================================================

/// Default generation model identifier.
pub const GEN_MODEL: &str = "gemini-2.0-flash-001";

/// Default Gemini API base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default maximum output tokens per generation request.
pub const GEN_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Hard bounds on configurable max output tokens.
pub const GEN_MAX_OUTPUT_TOKENS_MIN: u32 = 1;
pub const GEN_MAX_OUTPUT_TOKENS_MAX: u32 = 32_768;

/// Default request timeout in milliseconds.
pub const GEN_TIMEOUT_MS: u64 = 30_000;

/// Hard bounds on the configurable request timeout.
pub const GEN_TIMEOUT_MS_MIN: u64 = 1_000;
pub const GEN_TIMEOUT_MS_MAX: u64 = 60_000;

/// Default requests-per-minute budget. Informational for operators; the
/// provider meters the actual quota.
pub const GEN_REQUESTS_PER_MINUTE: u32 = 60;

/// Default sampling temperature when a call does not override it.
pub const GEN_TEMPERATURE: f32 = 0.7;

/// Default nucleus sampling parameter.
pub const GEN_TOP_P: f32 = 0.8;

/// Default top-k sampling parameter.
pub const GEN_TOP_K: u32 = 40;

/// Low temperature used by the summary and tag orchestrators for
/// deterministic output.
pub const ORCHESTRATOR_TEMPERATURE: f32 = 0.3;

// =============================================================================
// RETRY
// =============================================================================

/// Default maximum attempts for a retryable generation call.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;

/// Base backoff delay in milliseconds. Attempt n sleeps base * 2^(n-1).
pub const RETRY_BASE_DELAY_MS: u64 = 1_000;

// =============================================================================
// TOKEN BUDGET
// =============================================================================

/// Product-level cap on note content submitted for summarization or tagging,
/// in estimated tokens. Stricter than the model's technical context limit.
pub const CONTENT_TOKEN_CAP: usize = 8_000;

/// Token head-room reserved for the model's own output when validating an
/// input against a budget: min(RESERVED_TOKENS_ABS, 20% of the budget).
pub const RESERVED_TOKENS_ABS: usize = 2_000;

/// Fraction of the budget reserved for output.
pub const RESERVED_TOKENS_FRACTION: f64 = 0.2;

// =============================================================================
// ORCHESTRATION
// =============================================================================

/// Maximum output tokens for a summary generation.
pub const SUMMARY_MAX_TOKENS: u32 = 1_000;

/// Maximum output tokens for a tag generation.
pub const TAG_MAX_TOKENS: u32 = 200;

/// Maximum tags retained from a model response.
pub const GENERATED_TAG_CAP: usize = 6;

/// Maximum tags accepted from a manual edit. Looser than the generation cap
/// since human curation is trusted more than model output.
pub const MANUAL_TAG_CAP: usize = 10;

// =============================================================================
// USAGE ACCOUNTING
// =============================================================================

/// Maximum retained usage log entries; oldest entries are evicted beyond this.
pub const USAGE_LOG_CAPACITY: usize = 1_000;
