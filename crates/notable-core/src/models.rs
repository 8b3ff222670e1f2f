//! Core data models for notable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Model identifier recorded on summaries authored by hand rather than
/// generated. Distinguishes human-edited content from model output.
pub const MANUAL_EDIT_MODEL: &str = "manual-edit";

/// A user's note. Read-only from this workspace's perspective: lifecycle
/// (create/update/soft-delete) is owned by the surrounding application.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The single current summary for a note.
///
/// At most one live row per note: every write replaces, never appends.
/// `model` is the generation model identifier, or [`MANUAL_EDIT_MODEL`] when
/// a human authored the text.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Summary {
    pub note_id: Uuid,
    pub model: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// One tag attached to a note. Composite identity is (note_id, tag); the full
/// tag set for a note is replaced atomically on every regeneration or edit.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NoteTag {
    pub note_id: Uuid,
    pub tag: String,
    pub created_at: DateTime<Utc>,
}

/// One record per generation attempt, retained in a bounded in-memory buffer
/// owned by a single generation client. Never persisted externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageLogEntry {
    pub timestamp: DateTime<Utc>,
    pub model: String,
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub latency_ms: u64,
    pub success: bool,
    pub error: Option<String>,
}

/// Aggregate statistics derived from the retained usage log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub error_rate_percent: f64,
    pub average_latency_ms: f64,
    pub total_tokens: usize,
}

/// Discriminated success/failure result returned by every public service
/// operation. `error` is a ready-to-render localized message; callers never
/// have to parse provider-specific error shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ServiceResponse<T> {
    /// Successful response carrying a payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed response carrying a user-facing message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Per-check outcomes of the full service health probe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthChecks {
    pub config: bool,
    pub generation: bool,
    pub storage: bool,
}

impl HealthChecks {
    /// True when every subsystem passed.
    pub fn all_healthy(&self) -> bool {
        self.config && self.generation && self.storage
    }
}

/// Result of the full service health probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub success: bool,
    pub checks: HealthChecks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
