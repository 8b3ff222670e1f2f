//! Error classification for generation failures.
//!
//! This is the single classification point in the system. Raw transport
//! errors are mapped to a [`GenerationErrorKind`] exactly once, at the
//! generation-client boundary; retry policy and user-facing messages both
//! derive from the resulting kind.

use notable_core::{Error, GenerationErrorKind};

/// Classify a raw error into a [`GenerationErrorKind`].
///
/// Priority order: HTTP status code first, then case-insensitive substring
/// matching on the message, defaulting to `Unknown`.
pub fn classify(status: Option<u16>, message: &str) -> GenerationErrorKind {
    let msg = message.to_lowercase();

    if let Some(code) = status {
        match code {
            401 => return GenerationErrorKind::CredentialInvalid,
            429 => return GenerationErrorKind::QuotaExceeded,
            408 => return GenerationErrorKind::Timeout,
            400 if msg.contains("safety") || msg.contains("filtered") => {
                return GenerationErrorKind::ContentFiltered;
            }
            code if code >= 500 => return GenerationErrorKind::Network,
            _ => {}
        }
    }

    if msg.contains("api key") || msg.contains("api_key") || msg.contains("unauthorized") {
        GenerationErrorKind::CredentialInvalid
    } else if msg.contains("quota") || msg.contains("rate limit") {
        GenerationErrorKind::QuotaExceeded
    } else if msg.contains("timeout") || msg.contains("timed out") {
        GenerationErrorKind::Timeout
    } else if msg.contains("safety") || msg.contains("filtered") {
        GenerationErrorKind::ContentFiltered
    } else if msg.contains("network") || msg.contains("connection") {
        GenerationErrorKind::Network
    } else {
        GenerationErrorKind::Unknown
    }
}

/// Classify an [`Error`] produced anywhere in the generation path.
///
/// Already-classified generation errors keep their kind; transport errors
/// are classified from their message; everything else is `Unknown`.
pub fn classify_error(error: &Error) -> GenerationErrorKind {
    match error {
        Error::Generation { kind, .. } => *kind,
        Error::Request(msg) => classify(None, msg),
        other => classify(None, &other.to_string()),
    }
}
