//! Deterministic test doubles for the AI layer.
//!
//! Provides a scriptable [`MockGenerator`] and in-memory repository fakes so
//! orchestrator tests run without Postgres or the network.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use notable_core::{
    Error, GenerationErrorKind, GenerationOptions, Note, NoteRepository, NoteTag,
    NoteTagRepository, Result, Summary, SummaryRepository, TextGenerator,
};

/// One scripted outcome for a mock generation call.
#[derive(Debug, Clone)]
enum Script {
    Respond(String),
    Fail(GenerationErrorKind),
}

/// Scriptable [`TextGenerator`] double.
///
/// Scripted outcomes are consumed in order; once exhausted, every call
/// returns the default response.
pub struct MockGenerator {
    script: Mutex<VecDeque<Script>>,
    default_response: String,
    calls: Mutex<Vec<(String, GenerationOptions)>>,
    healthy: bool,
    model: String,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerator {
    /// Create a mock that always succeeds with a fixed default response.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_response: "Mock response".to_string(),
            calls: Mutex::new(Vec::new()),
            healthy: true,
            model: "mock-model".to_string(),
        }
    }

    /// Set the response returned when the script is exhausted.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    /// Queue one successful response.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Script::Respond(response.into()));
        self
    }

    /// Queue one classified failure.
    pub fn with_failure(self, kind: GenerationErrorKind) -> Self {
        self.script.lock().unwrap().push_back(Script::Fail(kind));
        self
    }

    /// Set the health probe outcome.
    pub fn with_healthy(mut self, healthy: bool) -> Self {
        self.healthy = healthy;
        self
    }

    /// Number of generation calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }

    /// Options of the most recent call.
    pub fn last_options(&self) -> Option<GenerationOptions> {
        self.calls.lock().unwrap().last().map(|(_, o)| o.clone())
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), options));

        match self.script.lock().unwrap().pop_front() {
            Some(Script::Respond(text)) => Ok(text),
            Some(Script::Fail(kind)) => Err(Error::generation(kind)),
            None => Ok(self.default_response.clone()),
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}

/// In-memory [`NoteRepository`] fake.
#[derive(Default)]
pub struct InMemoryNotes {
    notes: Mutex<HashMap<Uuid, Note>>,
}

impl InMemoryNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a note and return its id.
    pub fn insert(&self, user_id: Uuid, content: &str) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.notes.lock().unwrap().insert(
            id,
            Note {
                id,
                user_id,
                title: "Test note".to_string(),
                content: content.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        id
    }
}

#[async_trait]
impl NoteRepository for InMemoryNotes {
    async fn get_by_id(&self, note_id: Uuid, user_id: Uuid) -> Result<Option<Note>> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .get(&note_id)
            .filter(|n| n.user_id == user_id)
            .cloned())
    }
}

/// In-memory [`SummaryRepository`] fake with replace semantics.
#[derive(Default)]
pub struct InMemorySummaries {
    rows: Mutex<HashMap<Uuid, Summary>>,
}

impl InMemorySummaries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current row for a note, bypassing ownership scoping.
    pub fn row(&self, note_id: Uuid) -> Option<Summary> {
        self.rows.lock().unwrap().get(&note_id).cloned()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SummaryRepository for InMemorySummaries {
    async fn upsert(&self, note_id: Uuid, model: &str, content: &str) -> Result<Summary> {
        let summary = Summary {
            note_id,
            model: model.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().insert(note_id, summary.clone());
        Ok(summary)
    }

    async fn get_for_note(&self, note_id: Uuid, _user_id: Uuid) -> Result<Option<Summary>> {
        Ok(self.rows.lock().unwrap().get(&note_id).cloned())
    }

    async fn delete_for_note(&self, note_id: Uuid) -> Result<bool> {
        Ok(self.rows.lock().unwrap().remove(&note_id).is_some())
    }
}

/// In-memory [`NoteTagRepository`] fake with full-replace semantics.
#[derive(Default)]
pub struct InMemoryTags {
    rows: Mutex<HashMap<Uuid, Vec<NoteTag>>>,
}

impl InMemoryTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tag texts for a note, bypassing ownership scoping.
    pub fn tags(&self, note_id: Uuid) -> Vec<String> {
        self.rows
            .lock()
            .unwrap()
            .get(&note_id)
            .map(|rows| rows.iter().map(|t| t.tag.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NoteTagRepository for InMemoryTags {
    async fn replace_for_note(&self, note_id: Uuid, tags: &[String]) -> Result<Vec<NoteTag>> {
        let now = Utc::now();
        // Duplicates collapse, mirroring the composite primary key.
        let mut stored: Vec<NoteTag> = Vec::new();
        for tag in tags {
            if !stored.iter().any(|t| &t.tag == tag) {
                stored.push(NoteTag {
                    note_id,
                    tag: tag.clone(),
                    created_at: now,
                });
            }
        }
        self.rows.lock().unwrap().insert(note_id, stored.clone());
        Ok(stored)
    }

    async fn get_for_note(&self, note_id: Uuid, _user_id: Uuid) -> Result<Vec<NoteTag>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&note_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_scripted_then_default() {
        let generator = MockGenerator::new()
            .with_response("first")
            .with_failure(GenerationErrorKind::Network)
            .with_default_response("fallback");

        assert_eq!(
            generator
                .generate("a", GenerationOptions::default())
                .await
                .unwrap(),
            "first"
        );
        assert!(generator
            .generate("b", GenerationOptions::default())
            .await
            .is_err());
        assert_eq!(
            generator
                .generate("c", GenerationOptions::default())
                .await
                .unwrap(),
            "fallback"
        );
        assert_eq!(generator.call_count(), 3);
        assert_eq!(generator.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_in_memory_notes_ownership_scoped() {
        let notes = InMemoryNotes::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let id = notes.insert(owner, "content");

        assert!(notes.get_by_id(id, owner).await.unwrap().is_some());
        assert!(notes.get_by_id(id, stranger).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_tags_collapse_duplicates() {
        let tags = InMemoryTags::new();
        let note_id = Uuid::new_v4();

        let stored = tags
            .replace_for_note(
                note_id,
                &["rust".to_string(), "rust".to_string(), "ai".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert_eq!(tags.tags(note_id), vec!["rust", "ai"]);
    }
}
