//! # notable-db
//!
//! PostgreSQL database layer for notable.
//!
//! This crate provides:
//! - Connection pool management
//! - Ownership-scoped note reads
//! - Replace-semantics summary storage (upsert, at most one row per note)
//! - Full-replace tag storage (transactional delete + insert)
//!
//! ## Example
//!
//! ```rust,ignore
//! use notable_db::Database;
//! use notable_core::SummaryRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/notable").await?;
//!     let summary = db.summaries.upsert(note_id, "gemini-2.0-flash-001", "…").await?;
//!     println!("stored at {}", summary.created_at);
//!     Ok(())
//! }
//! ```

pub mod notes;
pub mod pool;
pub mod summaries;
pub mod tags;

use std::sync::Arc;

use sqlx::PgPool;

// Re-export core types
pub use notable_core::*;

pub use notes::PgNoteRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use summaries::PgSummaryRepository;
pub use tags::PgNoteTagRepository;

/// Bundle of repositories over one connection pool.
#[derive(Clone)]
pub struct Database {
    pub notes: Arc<PgNoteRepository>,
    pub summaries: Arc<PgSummaryRepository>,
    pub tags: Arc<PgNoteTagRepository>,
    pool: PgPool,
}

impl Database {
    /// Connect to the database and build all repositories.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        log_pool_metrics(&pool);
        Ok(Self::from_pool(pool))
    }

    /// Build the repository bundle from an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            notes: Arc::new(PgNoteRepository::new(pool.clone())),
            summaries: Arc::new(PgSummaryRepository::new(pool.clone())),
            tags: Arc::new(PgNoteTagRepository::new(pool.clone())),
            pool,
        }
    }

    /// Run pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
