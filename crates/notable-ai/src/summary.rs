//! Summary orchestration.
//!
//! Validates, prompts the generation backend, and persists the result as the
//! note's single current summary. Every public operation returns a
//! [`ServiceResponse`] the UI can render directly; nothing here panics or
//! leaks provider error shapes.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use notable_core::defaults::{CONTENT_TOKEN_CAP, SUMMARY_MAX_TOKENS};
use notable_core::tokenizer::estimate_tokens;
use notable_core::{
    Error, GenerationOptions, Note, NoteRepository, ServiceResponse, Summary, SummaryRepository,
    TextGenerator, MANUAL_EDIT_MODEL,
};

pub(crate) const MSG_MISSING_PARAMS: &str = "Missing required parameters.";
pub(crate) const MSG_NOT_FOUND: &str = "Note not found or access denied.";
pub(crate) const MSG_TOO_LONG: &str = "Note content is too long to process.";
const MSG_GENERATION_FAILED: &str = "Failed to generate summary. Please try again.";
const MSG_LOAD_FAILED: &str = "Failed to load summary. Please try again.";

fn summary_prompt(content: &str) -> String {
    format!(
        "Summarize the following note content into 3-6 bullet points, each concise: {}",
        content
    )
}

/// Orchestrates summary generation and persistence for notes.
pub struct SummaryService {
    generator: Arc<dyn TextGenerator>,
    notes: Arc<dyn NoteRepository>,
    summaries: Arc<dyn SummaryRepository>,
}

impl SummaryService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        notes: Arc<dyn NoteRepository>,
        summaries: Arc<dyn SummaryRepository>,
    ) -> Self {
        Self {
            generator,
            notes,
            summaries,
        }
    }

    /// Generate a summary for a note and persist it, replacing any prior one.
    ///
    /// Validation order: parameters, content size cap, then ownership.
    /// Not-found and unauthorized are deliberately indistinguishable.
    pub async fn generate(
        &self,
        note_id: Uuid,
        content: &str,
        user_id: Uuid,
    ) -> ServiceResponse<Summary> {
        if let Err(message) = self.validate(note_id, content, user_id).await {
            return ServiceResponse::failure(message);
        }

        let text = match self.generate_text(content).await {
            Ok(text) => text,
            Err(message) => return ServiceResponse::failure(message),
        };

        match self
            .summaries
            .upsert(note_id, &self.generator.model_name(), &text)
            .await
        {
            Ok(summary) => {
                info!(
                    subsystem = "ai",
                    component = "summary",
                    op = "generate",
                    note_id = %note_id,
                    response_len = text.len(),
                    "Summary generated and saved"
                );
                ServiceResponse::ok(summary)
            }
            Err(error) => {
                warn!(
                    subsystem = "ai",
                    component = "summary",
                    op = "generate",
                    note_id = %note_id,
                    error = %error,
                    "Failed to save generated summary"
                );
                ServiceResponse::failure(MSG_GENERATION_FAILED)
            }
        }
    }

    /// Fetch the current summary for a note, ownership-scoped.
    pub async fn get(&self, note_id: Uuid, user_id: Uuid) -> ServiceResponse<Option<Summary>> {
        match self.summaries.get_for_note(note_id, user_id).await {
            Ok(summary) => ServiceResponse::ok(summary),
            Err(error) => {
                warn!(
                    subsystem = "ai",
                    component = "summary",
                    op = "get",
                    note_id = %note_id,
                    error = %error,
                    "Failed to load summary"
                );
                ServiceResponse::failure(MSG_LOAD_FAILED)
            }
        }
    }

    /// Persist a human-edited summary, bypassing generation entirely.
    ///
    /// The stored model is the `manual-edit` sentinel so edited summaries
    /// stay distinguishable from generated ones.
    pub async fn update(
        &self,
        note_id: Uuid,
        content: &str,
        user_id: Uuid,
    ) -> ServiceResponse<Summary> {
        if note_id.is_nil() || user_id.is_nil() || content.trim().is_empty() {
            return ServiceResponse::failure(MSG_MISSING_PARAMS);
        }

        match self.owned_note(note_id, user_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return ServiceResponse::failure(MSG_NOT_FOUND),
            Err(message) => return ServiceResponse::failure(message),
        }

        match self
            .summaries
            .upsert(note_id, MANUAL_EDIT_MODEL, content.trim())
            .await
        {
            Ok(summary) => {
                info!(
                    subsystem = "ai",
                    component = "summary",
                    op = "update",
                    note_id = %note_id,
                    "Manual summary saved"
                );
                ServiceResponse::ok(summary)
            }
            Err(error) => {
                warn!(
                    subsystem = "ai",
                    component = "summary",
                    op = "update",
                    note_id = %note_id,
                    error = %error,
                    "Failed to save manual summary"
                );
                ServiceResponse::failure(MSG_GENERATION_FAILED)
            }
        }
    }

    /// Generate a summary without ownership checks or persistence.
    ///
    /// Diagnostics entry point used by the health check.
    pub async fn generate_unsaved(&self, content: &str) -> ServiceResponse<String> {
        if content.trim().is_empty() {
            return ServiceResponse::failure(MSG_MISSING_PARAMS);
        }
        if estimate_tokens(content) > CONTENT_TOKEN_CAP {
            return ServiceResponse::failure(MSG_TOO_LONG);
        }

        match self.generate_text(content).await {
            Ok(text) => ServiceResponse::ok(text),
            Err(message) => ServiceResponse::failure(message),
        }
    }

    async fn validate(&self, note_id: Uuid, content: &str, user_id: Uuid) -> Result<(), String> {
        if note_id.is_nil() || user_id.is_nil() || content.trim().is_empty() {
            return Err(MSG_MISSING_PARAMS.to_string());
        }

        // Product-level cap, stricter than the model's technical limit.
        if estimate_tokens(content) > CONTENT_TOKEN_CAP {
            return Err(MSG_TOO_LONG.to_string());
        }

        match self.owned_note(note_id, user_id).await? {
            Some(_) => Ok(()),
            None => Err(MSG_NOT_FOUND.to_string()),
        }
    }

    async fn owned_note(&self, note_id: Uuid, user_id: Uuid) -> Result<Option<Note>, String> {
        self.notes.get_by_id(note_id, user_id).await.map_err(|error| {
            warn!(
                subsystem = "ai",
                component = "summary",
                note_id = %note_id,
                error = %error,
                "Note lookup failed"
            );
            MSG_NOT_FOUND.to_string()
        })
    }

    async fn generate_text(&self, content: &str) -> Result<String, String> {
        let options = GenerationOptions::deterministic(SUMMARY_MAX_TOKENS);

        match self.generator.generate(&summary_prompt(content), options).await {
            Ok(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            Ok(_) => {
                warn!(
                    subsystem = "ai",
                    component = "summary",
                    "Generator returned an empty summary"
                );
                Err(MSG_GENERATION_FAILED.to_string())
            }
            Err(Error::Generation { message, kind }) => {
                warn!(
                    subsystem = "ai",
                    component = "summary",
                    kind = %kind,
                    "Summary generation failed"
                );
                Err(message)
            }
            Err(error) => {
                warn!(
                    subsystem = "ai",
                    component = "summary",
                    error = %error,
                    "Summary generation failed"
                );
                Err(MSG_GENERATION_FAILED.to_string())
            }
        }
    }
}
