//! Free-form text generation entry point.

use std::sync::Arc;

use tracing::warn;

use notable_core::defaults::CONTENT_TOKEN_CAP;
use notable_core::tokenizer::estimate_tokens;
use notable_core::{Error, GenerationOptions, ServiceResponse, TextGenerator};

const MSG_MISSING_PROMPT: &str = "Prompt must not be empty.";
const MSG_TOO_LONG: &str = "Prompt is too long to process.";
const MSG_GENERATION_FAILED: &str = "Failed to generate text. Please try again.";

/// Generate plain text from an arbitrary prompt.
///
/// Validation only; persistence and ownership are out of scope here. Returns
/// the same `{success, data?, error?}` shape as the orchestrators.
pub async fn generate_text(
    generator: Arc<dyn TextGenerator>,
    prompt: &str,
) -> ServiceResponse<String> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return ServiceResponse::failure(MSG_MISSING_PROMPT);
    }
    if estimate_tokens(prompt) > CONTENT_TOKEN_CAP {
        return ServiceResponse::failure(MSG_TOO_LONG);
    }

    match generator.generate(prompt, GenerationOptions::default()).await {
        Ok(text) if !text.trim().is_empty() => ServiceResponse::ok(text.trim().to_string()),
        Ok(_) => ServiceResponse::failure(MSG_GENERATION_FAILED),
        Err(Error::Generation { message, kind }) => {
            warn!(
                subsystem = "ai",
                component = "text",
                kind = %kind,
                "Free-form generation failed"
            );
            ServiceResponse::failure(message)
        }
        Err(error) => {
            warn!(
                subsystem = "ai",
                component = "text",
                error = %error,
                "Free-form generation failed"
            );
            ServiceResponse::failure(MSG_GENERATION_FAILED)
        }
    }
}
