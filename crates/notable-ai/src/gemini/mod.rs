//! Gemini generation backend.

mod client;
mod types;

pub use client::GeminiClient;
pub use types::{
    ApiError, ApiErrorResponse, Candidate, Content, GenerateContentRequest,
    GenerateContentResponse, Part, WireGenerationConfig,
};
