//! Note repository implementation (read path).
//!
//! Notes are owned by the surrounding application; this layer only reads
//! them to verify ownership and obtain content for generation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use notable_core::{Error, Note, NoteRepository, Result};

/// PostgreSQL implementation of [`NoteRepository`].
pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn get_by_id(&self, note_id: Uuid, user_id: Uuid) -> Result<Option<Note>> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at
            FROM notes
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(note_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(note)
    }
}
