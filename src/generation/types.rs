//! Generation wire types and errors.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by [`crate::GenerationClient::submit`].
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// No webhook URL is configured. Nothing was sent.
    #[error("generation endpoint not configured: set {var}")]
    Configuration { var: &'static str },

    /// The webhook answered with a non-success HTTP status.
    #[error("generation endpoint responded {status}")]
    Remote {
        /// Status line, e.g. `500 Internal Server Error`.
        status: String,
        code: u16,
        /// `message` from the response body, when it had one.
        message: Option<String>,
    },

    /// The request never got an HTTP answer (DNS, refused, reset, timeout).
    #[error("generation request failed: {0}")]
    Transport(String),

    /// A success response whose body is not a generation result.
    #[error("generation response parse failed: {0}")]
    InvalidResponse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl GenerationError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "E_CONFIGURATION",
            Self::Remote { .. } => "E_REMOTE",
            Self::Transport(_) => "E_TRANSPORT",
            Self::InvalidResponse(_) => "E_INVALID_RESPONSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// Whether the user may reasonably try the same submission again.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Remote { code: 429 | 500..=599, .. })
    }

    /// Text suitable for showing next to the submit button.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration { .. } | Self::HttpClientBuild(_) => {
                "Document generation is not available right now. Please contact support.".to_owned()
            }
            Self::Remote { message: Some(message), .. } if !message.trim().is_empty() => message.clone(),
            Self::Remote { .. } | Self::InvalidResponse(_) => {
                "The document could not be generated. Please try again later.".to_owned()
            }
            Self::Transport(_) => "Network error. Check your connection and try again.".to_owned(),
        }
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// Body posted to the webhook: the draft's own fields plus identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest<T> {
    #[serde(flatten)]
    pub draft: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl<T> GenerationRequest<T> {
    pub fn new(draft: T) -> Self {
        Self { draft, guest_session_id: None, user_id: None }
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Success,
    Error,
}

/// Webhook response body, kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub status: GenerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Tagged view of a [`GenerationResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success { document_id: Option<String>, download_url: Option<String> },
    Failure { reason: String },
}

const DEFAULT_FAILURE_REASON: &str = "document generation failed";

impl GenerationResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == GenerationStatus::Success
    }

    #[must_use]
    pub fn outcome(&self) -> GenerationOutcome {
        match self.status {
            GenerationStatus::Success => GenerationOutcome::Success {
                document_id: self.document_id.clone(),
                download_url: self.download_url.clone(),
            },
            GenerationStatus::Error => GenerationOutcome::Failure {
                reason: self
                    .message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE_REASON.to_owned()),
            },
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
