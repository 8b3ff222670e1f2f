//! Tag orchestration.
//!
//! Mirrors the summary orchestrator's validation pipeline, then parses the
//! model's comma-separated reply and replaces the note's full tag set in one
//! operation. Tags are never merged with a prior set.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use notable_core::defaults::{CONTENT_TOKEN_CAP, GENERATED_TAG_CAP, MANUAL_TAG_CAP, TAG_MAX_TOKENS};
use notable_core::tokenizer::estimate_tokens;
use notable_core::{
    Error, GenerationOptions, NoteRepository, NoteTag, NoteTagRepository, ServiceResponse,
    TextGenerator,
};

use crate::summary::{MSG_MISSING_PARAMS, MSG_NOT_FOUND, MSG_TOO_LONG};

const MSG_GENERATION_FAILED: &str = "Failed to generate tags. Please try again.";
const MSG_LOAD_FAILED: &str = "Failed to load tags. Please try again.";

fn tag_prompt(content: &str) -> String {
    format!(
        "Analyze the following note content and produce up to 6 relevant tags, comma-separated on one line: {}",
        content
    )
}

/// Split a model reply into at most `cap` clean tags.
///
/// Commas delimit; segments are trimmed and empty ones dropped.
fn parse_tags(raw: &str, cap: usize) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .take(cap)
        .map(str::to_string)
        .collect()
}

/// Orchestrates tag generation and full-replace persistence for notes.
pub struct TagService {
    generator: Arc<dyn TextGenerator>,
    notes: Arc<dyn NoteRepository>,
    tags: Arc<dyn NoteTagRepository>,
}

impl TagService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        notes: Arc<dyn NoteRepository>,
        tags: Arc<dyn NoteTagRepository>,
    ) -> Self {
        Self {
            generator,
            notes,
            tags,
        }
    }

    /// Generate tags for a note and replace its full tag set.
    ///
    /// Same validation order as summaries: parameters, size cap, ownership.
    pub async fn generate(
        &self,
        note_id: Uuid,
        content: &str,
        user_id: Uuid,
    ) -> ServiceResponse<Vec<NoteTag>> {
        if let Err(message) = self.validate(note_id, content, user_id).await {
            return ServiceResponse::failure(message);
        }

        let tags = match self.generate_tags(content).await {
            Ok(tags) => tags,
            Err(message) => return ServiceResponse::failure(message),
        };

        self.replace(note_id, &tags, "generate").await
    }

    /// Fetch the current tags for a note, ownership-scoped.
    pub async fn get(&self, note_id: Uuid, user_id: Uuid) -> ServiceResponse<Vec<NoteTag>> {
        match self.tags.get_for_note(note_id, user_id).await {
            Ok(tags) => ServiceResponse::ok(tags),
            Err(error) => {
                warn!(
                    subsystem = "ai",
                    component = "tags",
                    op = "get",
                    note_id = %note_id,
                    error = %error,
                    "Failed to load tags"
                );
                ServiceResponse::failure(MSG_LOAD_FAILED)
            }
        }
    }

    /// Replace a note's tags with a human-edited set.
    ///
    /// Tags are trimmed, empties dropped, and the set capped at ten entries.
    /// An empty surviving set is valid here: it clears the note's tags.
    pub async fn update(
        &self,
        note_id: Uuid,
        tags: &[String],
        user_id: Uuid,
    ) -> ServiceResponse<Vec<NoteTag>> {
        if note_id.is_nil() || user_id.is_nil() {
            return ServiceResponse::failure(MSG_MISSING_PARAMS);
        }

        match self.owned_note(note_id, user_id).await {
            Ok(true) => {}
            Ok(false) => return ServiceResponse::failure(MSG_NOT_FOUND),
            Err(message) => return ServiceResponse::failure(message),
        }

        let cleaned: Vec<String> = tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .take(MANUAL_TAG_CAP)
            .map(str::to_string)
            .collect();

        self.replace(note_id, &cleaned, "update").await
    }

    /// Generate tags without ownership checks or persistence.
    pub async fn generate_unsaved(&self, content: &str) -> ServiceResponse<Vec<String>> {
        if content.trim().is_empty() {
            return ServiceResponse::failure(MSG_MISSING_PARAMS);
        }
        if estimate_tokens(content) > CONTENT_TOKEN_CAP {
            return ServiceResponse::failure(MSG_TOO_LONG);
        }

        match self.generate_tags(content).await {
            Ok(tags) => ServiceResponse::ok(tags),
            Err(message) => ServiceResponse::failure(message),
        }
    }

    async fn validate(&self, note_id: Uuid, content: &str, user_id: Uuid) -> Result<(), String> {
        if note_id.is_nil() || user_id.is_nil() || content.trim().is_empty() {
            return Err(MSG_MISSING_PARAMS.to_string());
        }

        if estimate_tokens(content) > CONTENT_TOKEN_CAP {
            return Err(MSG_TOO_LONG.to_string());
        }

        if self.owned_note(note_id, user_id).await? {
            Ok(())
        } else {
            Err(MSG_NOT_FOUND.to_string())
        }
    }

    async fn owned_note(&self, note_id: Uuid, user_id: Uuid) -> Result<bool, String> {
        match self.notes.get_by_id(note_id, user_id).await {
            Ok(note) => Ok(note.is_some()),
            Err(error) => {
                warn!(
                    subsystem = "ai",
                    component = "tags",
                    note_id = %note_id,
                    error = %error,
                    "Note lookup failed"
                );
                Err(MSG_NOT_FOUND.to_string())
            }
        }
    }

    async fn generate_tags(&self, content: &str) -> Result<Vec<String>, String> {
        let options = GenerationOptions::deterministic(TAG_MAX_TOKENS);

        let raw = match self.generator.generate(&tag_prompt(content), options).await {
            Ok(raw) => raw,
            Err(Error::Generation { message, kind }) => {
                warn!(
                    subsystem = "ai",
                    component = "tags",
                    kind = %kind,
                    "Tag generation failed"
                );
                return Err(message);
            }
            Err(error) => {
                warn!(
                    subsystem = "ai",
                    component = "tags",
                    error = %error,
                    "Tag generation failed"
                );
                return Err(MSG_GENERATION_FAILED.to_string());
            }
        };

        let tags = parse_tags(&raw, GENERATED_TAG_CAP);
        if tags.is_empty() {
            warn!(
                subsystem = "ai",
                component = "tags",
                response_len = raw.len(),
                "No usable tags in generator response"
            );
            return Err(MSG_GENERATION_FAILED.to_string());
        }

        Ok(tags)
    }

    async fn replace(
        &self,
        note_id: Uuid,
        tags: &[String],
        op: &str,
    ) -> ServiceResponse<Vec<NoteTag>> {
        match self.tags.replace_for_note(note_id, tags).await {
            Ok(stored) => {
                info!(
                    subsystem = "ai",
                    component = "tags",
                    op,
                    note_id = %note_id,
                    tag_count = stored.len(),
                    "Tags replaced"
                );
                ServiceResponse::ok(stored)
            }
            Err(error) => {
                warn!(
                    subsystem = "ai",
                    component = "tags",
                    op,
                    note_id = %note_id,
                    error = %error,
                    "Failed to replace tags"
                );
                ServiceResponse::failure(MSG_GENERATION_FAILED)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{InMemoryNotes, InMemoryTags, MockGenerator};
    use notable_core::defaults::ORCHESTRATOR_TEMPERATURE;
    use notable_core::GenerationErrorKind;

    struct Fixture {
        generator: Arc<MockGenerator>,
        notes: Arc<InMemoryNotes>,
        tags: Arc<InMemoryTags>,
        service: TagService,
    }

    fn fixture(generator: MockGenerator) -> Fixture {
        let generator = Arc::new(generator);
        let notes = Arc::new(InMemoryNotes::new());
        let tags = Arc::new(InMemoryTags::new());
        let service = TagService::new(generator.clone(), notes.clone(), tags.clone());
        Fixture {
            generator,
            notes,
            tags,
            service,
        }
    }

    #[test]
    fn test_parse_tags_drops_empty_segments() {
        assert_eq!(
            parse_tags("AI, , Machine Learning, , Technology", GENERATED_TAG_CAP),
            vec!["AI", "Machine Learning", "Technology"]
        );
    }

    #[test]
    fn test_parse_tags_caps_at_limit() {
        let parsed = parse_tags("a, b, c, d, e, f, g, h", GENERATED_TAG_CAP);
        assert_eq!(parsed, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_parse_tags_all_empty_yields_none() {
        assert!(parse_tags(" , ,, ", GENERATED_TAG_CAP).is_empty());
        assert!(parse_tags("", GENERATED_TAG_CAP).is_empty());
    }

    #[tokio::test]
    async fn test_generate_replaces_tag_set() {
        let fx = fixture(
            MockGenerator::new()
                .with_response("rust, tokio")
                .with_response("async, streams, pinning"),
        );
        let user_id = Uuid::new_v4();
        let note_id = fx.notes.insert(user_id, "content");

        fx.service.generate(note_id, "content", user_id).await;
        let response = fx.service.generate(note_id, "content", user_id).await;

        assert!(response.success);
        // Full replace: the first generation's tags are gone.
        assert_eq!(fx.tags.tags(note_id), vec!["async", "streams", "pinning"]);

        let options = fx.generator.last_options().unwrap();
        assert_eq!(options.max_tokens, Some(TAG_MAX_TOKENS));
        assert_eq!(options.temperature, Some(ORCHESTRATOR_TEMPERATURE));
        assert!(fx.generator.prompts()[0].starts_with("Analyze the following note content"));
    }

    #[tokio::test]
    async fn test_generate_zero_surviving_tags_is_failure() {
        let fx = fixture(MockGenerator::new().with_response(" , , "));
        let user_id = Uuid::new_v4();
        let note_id = fx.notes.insert(user_id, "content");

        let response = fx.service.generate(note_id, "content", user_id).await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some(MSG_GENERATION_FAILED));
        assert!(fx.tags.tags(note_id).is_empty());
    }

    #[tokio::test]
    async fn test_generate_validation_precedes_generator() {
        let fx = fixture(MockGenerator::new());
        let user_id = Uuid::new_v4();

        let response = fx.service.generate(Uuid::nil(), "content", user_id).await;
        assert_eq!(response.error.as_deref(), Some(MSG_MISSING_PARAMS));

        let content = "word ".repeat(20_000);
        let note_id = fx.notes.insert(user_id, &content);
        let response = fx.service.generate(note_id, &content, user_id).await;
        assert_eq!(response.error.as_deref(), Some(MSG_TOO_LONG));

        let foreign = fx.notes.insert(Uuid::new_v4(), "content");
        let response = fx.service.generate(foreign, "content", user_id).await;
        assert_eq!(response.error.as_deref(), Some(MSG_NOT_FOUND));

        assert_eq!(fx.generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_surfaces_user_message() {
        let fx = fixture(MockGenerator::new().with_failure(GenerationErrorKind::Timeout));
        let user_id = Uuid::new_v4();
        let note_id = fx.notes.insert(user_id, "content");

        let response = fx.service.generate(note_id, "content", user_id).await;

        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some(GenerationErrorKind::Timeout.user_message())
        );
    }

    #[tokio::test]
    async fn test_update_trims_filters_and_caps() {
        let fx = fixture(MockGenerator::new());
        let user_id = Uuid::new_v4();
        let note_id = fx.notes.insert(user_id, "content");

        let input: Vec<String> = (1..=12)
            .map(|i| format!("  tag{} ", i))
            .chain(["  ".to_string(), String::new()])
            .collect();

        let response = fx.service.update(note_id, &input, user_id).await;

        assert!(response.success);
        let stored = fx.tags.tags(note_id);
        assert_eq!(stored.len(), MANUAL_TAG_CAP);
        assert_eq!(stored[0], "tag1");
        assert_eq!(stored[9], "tag10");
        assert_eq!(fx.generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_with_empty_set_clears_tags() {
        let fx = fixture(MockGenerator::new().with_response("old, tags"));
        let user_id = Uuid::new_v4();
        let note_id = fx.notes.insert(user_id, "content");

        fx.service.generate(note_id, "content", user_id).await;
        assert!(!fx.tags.tags(note_id).is_empty());

        let response = fx.service.update(note_id, &[], user_id).await;

        assert!(response.success);
        assert!(fx.tags.tags(note_id).is_empty());
    }

    #[tokio::test]
    async fn test_update_requires_ownership() {
        let fx = fixture(MockGenerator::new());
        let note_id = fx.notes.insert(Uuid::new_v4(), "content");

        let response = fx
            .service
            .update(note_id, &["tag".to_string()], Uuid::new_v4())
            .await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some(MSG_NOT_FOUND));
    }

    struct FailingTags;

    #[async_trait::async_trait]
    impl NoteTagRepository for FailingTags {
        async fn replace_for_note(
            &self,
            _note_id: Uuid,
            _tags: &[String],
        ) -> notable_core::Result<Vec<NoteTag>> {
            Err(notable_core::Error::Internal("storage down".to_string()))
        }

        async fn get_for_note(
            &self,
            _note_id: Uuid,
            _user_id: Uuid,
        ) -> notable_core::Result<Vec<NoteTag>> {
            Err(notable_core::Error::Internal("storage down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_get_storage_failure_reports_load_error() {
        let service = TagService::new(
            Arc::new(MockGenerator::new()),
            Arc::new(InMemoryNotes::new()),
            Arc::new(FailingTags),
        );

        let response = service.get(Uuid::new_v4(), Uuid::new_v4()).await;

        assert!(!response.success);
        // A load failure must not masquerade as a generation failure.
        assert_eq!(response.error.as_deref(), Some(MSG_LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_generate_unsaved_skips_persistence() {
        let fx = fixture(MockGenerator::new().with_response("one, two"));

        let response = fx.service.generate_unsaved("content").await;

        assert!(response.success);
        assert_eq!(response.data.unwrap(), vec!["one", "two"]);
    }
}
