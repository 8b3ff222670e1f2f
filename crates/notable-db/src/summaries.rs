//! Summary repository implementation.
//!
//! Summaries have replace semantics: at most one live row per note, enforced
//! by a unique constraint on note_id and an `ON CONFLICT DO UPDATE` upsert.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use notable_core::{Error, Result, Summary, SummaryRepository};

/// PostgreSQL implementation of [`SummaryRepository`].
pub struct PgSummaryRepository {
    pool: PgPool,
}

impl PgSummaryRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryRepository for PgSummaryRepository {
    async fn upsert(&self, note_id: Uuid, model: &str, content: &str) -> Result<Summary> {
        let now = Utc::now();

        let summary = sqlx::query_as::<_, Summary>(
            r#"
            INSERT INTO summaries (note_id, model, content, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (note_id)
            DO UPDATE SET model = EXCLUDED.model,
                          content = EXCLUDED.content,
                          created_at = EXCLUDED.created_at
            RETURNING note_id, model, content, created_at
            "#,
        )
        .bind(note_id)
        .bind(model)
        .bind(content)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "summaries",
            op = "upsert",
            note_id = %note_id,
            model = model,
            "Summary upserted"
        );

        Ok(summary)
    }

    async fn get_for_note(&self, note_id: Uuid, user_id: Uuid) -> Result<Option<Summary>> {
        let summary = sqlx::query_as::<_, Summary>(
            r#"
            SELECT s.note_id, s.model, s.content, s.created_at
            FROM summaries s
            JOIN notes n ON n.id = s.note_id
            WHERE s.note_id = $1 AND n.user_id = $2 AND n.deleted_at IS NULL
            "#,
        )
        .bind(note_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(summary)
    }

    async fn delete_for_note(&self, note_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM summaries WHERE note_id = $1")
            .bind(note_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
