//! Error types for notable.

use thiserror::Error;

/// Result type alias using notable's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Classified failure mode of a text-generation call.
///
/// Produced exactly once, at the generation-client boundary, from the raw
/// transport error. Retry policy and user-facing messages both derive from
/// this kind, so orchestrators never inspect provider-specific error shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationErrorKind {
    /// API credential is missing, malformed, or rejected (401).
    CredentialInvalid,
    /// Provider quota or rate limit exhausted (429).
    QuotaExceeded,
    /// Request timed out at the transport level (408).
    Timeout,
    /// Content rejected by the provider's safety filter (400 + safety keyword).
    ContentFiltered,
    /// Network-level failure or provider server error (>= 500).
    Network,
    /// Anything that does not match a known category.
    Unknown,
}

impl GenerationErrorKind {
    /// Whether re-attempting the same request after a delay has a reasonable
    /// chance of succeeding.
    ///
    /// CredentialInvalid, ContentFiltered, and Unknown are never retried:
    /// they require operator intervention or a redesigned request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network | Self::QuotaExceeded)
    }

    /// Display string shown to end users when a generation fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CredentialInvalid => {
                "AI service authentication failed. Please contact an administrator."
            }
            Self::QuotaExceeded => {
                "AI service usage limit reached. Please try again in a moment."
            }
            Self::Timeout => "The AI request timed out. Please check your connection and retry.",
            Self::ContentFiltered => "The content was blocked by the AI safety policy.",
            Self::Network => "A network error occurred while contacting the AI service.",
            Self::Unknown => "An unexpected error occurred during generation.",
        }
    }
}

impl std::fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CredentialInvalid => write!(f, "credential_invalid"),
            Self::QuotaExceeded => write!(f, "quota_exceeded"),
            Self::Timeout => write!(f, "timeout"),
            Self::ContentFiltered => write!(f, "content_filtered"),
            Self::Network => write!(f, "network"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Core error type for notable operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Note not found or not owned by the requesting user.
    /// The two cases are deliberately indistinguishable so non-owners cannot
    /// probe for note existence.
    #[error("Note not found or access denied: {0}")]
    NoteNotFound(uuid::Uuid),

    /// Text generation failed after classification and retry.
    #[error("Generation error ({kind}): {message}")]
    Generation {
        kind: GenerationErrorKind,
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Authentication/authorization failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Construct a generation error with its default user-facing message.
    pub fn generation(kind: GenerationErrorKind) -> Self {
        Error::Generation {
            kind,
            message: kind.user_message().to_string(),
        }
    }

    /// The generation error kind, if this is a generation failure.
    pub fn generation_kind(&self) -> Option<GenerationErrorKind> {
        match self {
            Error::Generation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("summary".to_string());
        assert_eq!(err.to_string(), "Not found: summary");
    }

    #[test]
    fn test_error_display_note_not_found() {
        let id = Uuid::nil();
        let err = Error::NoteNotFound(id);
        assert_eq!(
            err.to_string(),
            format!("Note not found or access denied: {}", id)
        );
    }

    #[test]
    fn test_error_display_generation() {
        let err = Error::Generation {
            kind: GenerationErrorKind::Timeout,
            message: "deadline exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Generation error (timeout): deadline exceeded"
        );
    }

    #[test]
    fn test_generation_constructor_uses_user_message() {
        let err = Error::generation(GenerationErrorKind::QuotaExceeded);
        assert!(err
            .to_string()
            .contains(GenerationErrorKind::QuotaExceeded.user_message()));
    }

    #[test]
    fn test_generation_kind_accessor() {
        let err = Error::generation(GenerationErrorKind::Network);
        assert_eq!(err.generation_kind(), Some(GenerationErrorKind::Network));

        let other = Error::Internal("x".to_string());
        assert_eq!(other.generation_kind(), None);
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(GenerationErrorKind::Timeout.is_retryable());
        assert!(GenerationErrorKind::Network.is_retryable());
        assert!(GenerationErrorKind::QuotaExceeded.is_retryable());
    }

    #[test]
    fn test_non_retryable_kinds() {
        assert!(!GenerationErrorKind::CredentialInvalid.is_retryable());
        assert!(!GenerationErrorKind::ContentFiltered.is_retryable());
        assert!(!GenerationErrorKind::Unknown.is_retryable());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&GenerationErrorKind::QuotaExceeded).unwrap();
        assert_eq!(json, "\"quota_exceeded\"");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().contains("Serialization error:"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
