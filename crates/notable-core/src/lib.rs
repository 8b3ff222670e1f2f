//! # notable-core
//!
//! Core types, traits, and abstractions for notable.
//!
//! This crate provides:
//! - Error taxonomy and `Result` alias, including classified generation errors
//! - Data models (notes, summaries, tags, usage accounting, service results)
//! - Repository and generation-backend traits
//! - Token estimation heuristics for budget enforcement
//! - Centralized default constants
//! - Structured logging field names

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod tokenizer;
pub mod traits;

pub use error::{Error, GenerationErrorKind, Result};
pub use models::{
    HealthChecks, HealthReport, Note, NoteTag, ServiceResponse, Summary, UsageLogEntry,
    UsageStats, MANUAL_EDIT_MODEL,
};
pub use tokenizer::{estimate_tokens, fits_token_budget, truncate_to_tokens};
pub use traits::{
    GenerationOptions, NoteRepository, NoteTagRepository, SummaryRepository, TextGenerator,
};
