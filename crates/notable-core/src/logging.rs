//! Structured logging field name constants for notable.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |

/// Subsystem originating the log event.
/// Values: "ai", "db"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "gemini", "retry", "summary", "tags", "pool"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "generate", "upsert_summary", "replace_tags", "health_check"
pub const OPERATION: &str = "op";

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// User UUID on whose behalf the operation runs.
pub const USER_ID: &str = "user_id";

/// Model name used for generation.
pub const MODEL: &str = "model";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

/// Estimated input token count.
pub const INPUT_TOKENS: &str = "input_tokens";

/// Retry attempt number (1-based).
pub const ATTEMPT: &str = "attempt";

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
