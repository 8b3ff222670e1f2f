//! Note tag repository implementation.
//!
//! The tag set for a note is replaced wholesale inside one transaction:
//! delete everything for the note, insert the new set. Never a partial merge.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use notable_core::{Error, NoteTag, NoteTagRepository, Result};

/// PostgreSQL implementation of [`NoteTagRepository`].
pub struct PgNoteTagRepository {
    pool: PgPool,
}

impl PgNoteTagRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteTagRepository for PgNoteTagRepository {
    async fn replace_for_note(&self, note_id: Uuid, tags: &[String]) -> Result<Vec<NoteTag>> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        sqlx::query("DELETE FROM note_tags WHERE note_id = $1")
            .bind(note_id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        let mut stored = Vec::with_capacity(tags.len());
        for tag in tags {
            let row = sqlx::query_as::<_, NoteTag>(
                r#"
                INSERT INTO note_tags (note_id, tag, created_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (note_id, tag) DO NOTHING
                RETURNING note_id, tag, created_at
                "#,
            )
            .bind(note_id)
            .bind(tag)
            .bind(now)
            .fetch_optional(&mut *tx)
            .await
            .map_err(Error::Database)?;

            // Duplicate tags within one replace collapse to a single row.
            if let Some(row) = row {
                stored.push(row);
            }
        }

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "tags",
            op = "replace_for_note",
            note_id = %note_id,
            tag_count = stored.len(),
            "Tag set replaced"
        );

        Ok(stored)
    }

    async fn get_for_note(&self, note_id: Uuid, user_id: Uuid) -> Result<Vec<NoteTag>> {
        let tags = sqlx::query_as::<_, NoteTag>(
            r#"
            SELECT t.note_id, t.tag, t.created_at
            FROM note_tags t
            JOIN notes n ON n.id = t.note_id
            WHERE t.note_id = $1 AND n.user_id = $2 AND n.deleted_at IS NULL
            ORDER BY t.created_at, t.tag
            "#,
        )
        .bind(note_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(tags)
    }
}
