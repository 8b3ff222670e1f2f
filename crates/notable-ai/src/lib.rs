//! # notable-ai
//!
//! AI orchestration and resilience layer for notable.
//!
//! This crate provides:
//! - Gemini generation client with retry, truncation, and usage accounting
//! - Error classification into a single retry/display taxonomy
//! - Summary and tag orchestrators over dependency-injected repositories
//! - Fire-and-forget note enrichment dispatch
//! - Full-service health probe
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use notable_ai::{generate_text, GeminiClient};
//!
//! #[tokio::main]
//! async fn main() -> notable_core::Result<()> {
//!     let client = Arc::new(GeminiClient::from_env()?);
//!     let response = generate_text(client, "Write a haiku about autumn").await;
//!     println!("{:?}", response.data);
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod config;
pub mod enrichment;
pub mod gemini;
pub mod health;
pub mod retry;
pub mod summary;
pub mod tags;
pub mod text;
pub mod usage;

// Scriptable generator and repository fakes for testing
#[cfg(test)]
pub mod mock;

// Re-export core types
pub use notable_core::*;

pub use classify::{classify, classify_error};
pub use config::{GenerationConfig, GenerationConfigUpdate};
pub use enrichment::spawn_note_enrichment;
pub use gemini::GeminiClient;
pub use health::health_check_full;
pub use retry::{with_retry, with_retry_policy};
pub use summary::SummaryService;
pub use tags::TagService;
pub use text::generate_text;
pub use usage::UsageLog;
