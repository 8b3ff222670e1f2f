//! Repository and backend traits.
//!
//! These traits are the seams between the AI orchestration layer and its
//! collaborators: the relational store and the external text-generation API.
//! Orchestrators hold trait objects, so tests run against in-memory fakes and
//! a mock generator without touching Postgres or the network.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Note, NoteTag, Summary};

/// Ownership-scoped read access to notes.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Fetch a note by id, only if it is owned by `user_id` and not
    /// soft-deleted. Returns `None` both for missing notes and notes owned
    /// by someone else.
    async fn get_by_id(&self, note_id: Uuid, user_id: Uuid) -> Result<Option<Note>>;
}

/// Replace-semantics storage for note summaries.
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Insert or replace the summary for a note. At most one live row per
    /// note; returns the stored row including its timestamp.
    async fn upsert(&self, note_id: Uuid, model: &str, content: &str) -> Result<Summary>;

    /// Fetch the current summary for a note owned by `user_id`.
    async fn get_for_note(&self, note_id: Uuid, user_id: Uuid) -> Result<Option<Summary>>;

    /// Delete the summary for a note. Used only by diagnostics; returns
    /// whether a row was removed.
    async fn delete_for_note(&self, note_id: Uuid) -> Result<bool>;
}

/// Full-replace storage for note tags.
#[async_trait]
pub trait NoteTagRepository: Send + Sync {
    /// Atomically replace the entire tag set for a note. Never a partial
    /// merge. Returns the stored rows.
    async fn replace_for_note(&self, note_id: Uuid, tags: &[String]) -> Result<Vec<NoteTag>>;

    /// Fetch all tags for a note owned by `user_id`.
    async fn get_for_note(&self, note_id: Uuid, user_id: Uuid) -> Result<Vec<NoteTag>>;
}

/// Per-call overrides for a generation request. Unset fields fall back to the
/// client configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
}

impl GenerationOptions {
    /// Options for deterministic orchestrator calls: a fixed output cap and
    /// low temperature.
    pub fn deterministic(max_tokens: u32) -> Self {
        Self {
            max_tokens: Some(max_tokens),
            temperature: Some(crate::defaults::ORCHESTRATOR_TEMPERATURE),
            ..Default::default()
        }
    }
}

/// Facade over the external text-generation API.
///
/// Implementations own validation, token-budget enforcement, retry, and
/// usage accounting; callers see classified errors only.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt. Fails fast on empty prompts without a
    /// network call; surfaces failures as `Error::Generation`.
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String>;

    /// Probe the backend with a minimal request. Never errors: all failures
    /// collapse to `false`.
    async fn health_check(&self) -> bool;

    /// The model identifier requests are issued against.
    fn model_name(&self) -> String;
}
