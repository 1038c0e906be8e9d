//! Webhook client for document generation.
//!
//! Thin HTTP wrapper: one `POST` per submit, no retries, no caching, no
//! internal timeout beyond the transport defaults. Pure parsing lives in
//! `parse_response` and `remote_message` for testability.

use serde::Serialize;
use tracing::{error, info, warn};

use super::config::{GenerationConfig, WEBHOOK_URL_VAR};
use super::types::{GenerationError, GenerationRequest, GenerationResult};

// =============================================================================
// CLIENT
// =============================================================================

/// Submits finished drafts to the generation webhook.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    webhook_url: Option<String>,
}

impl GenerationClient {
    /// Build a client. A missing webhook URL is accepted here and reported
    /// on the first `submit`, so pages can render before config is known.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GenerationError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, webhook_url: config.webhook_url })
    }

    /// Build a client from `GENERATION_WEBHOOK_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_env() -> Result<Self, GenerationError> {
        Self::new(GenerationConfig::from_env())
    }

    #[must_use]
    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook_url.as_deref()
    }

    /// Post `request` to the webhook and return its answer unchanged.
    ///
    /// A `200` whose body says `"status": "error"` is still `Ok`; inspect
    /// [`GenerationResult::outcome`].
    ///
    /// # Errors
    ///
    /// - [`GenerationError::Configuration`] when no URL is set (nothing is sent)
    /// - [`GenerationError::Transport`] when no HTTP response arrives
    /// - [`GenerationError::Remote`] on a non-2xx status
    /// - [`GenerationError::InvalidResponse`] when a 2xx body does not parse
    pub async fn submit<T: Serialize>(
        &self,
        request: &GenerationRequest<T>,
    ) -> Result<GenerationResult, GenerationError> {
        let Some(url) = self.webhook_url.as_deref() else {
            warn!(var = WEBHOOK_URL_VAR, "generation submit without configured webhook");
            return Err(GenerationError::Configuration { var: WEBHOOK_URL_VAR });
        };

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| transport_error(&e))?;

        if !status.is_success() {
            error!(%status, "generation webhook rejected request");
            return Err(GenerationError::Remote {
                status: status.to_string(),
                code: status.as_u16(),
                message: remote_message(&text),
            });
        }

        let result = parse_response(&text)?;
        info!(status = ?result.status, document_id = ?result.document_id, "generation completed");
        Ok(result)
    }
}

fn transport_error(e: &reqwest::Error) -> GenerationError {
    error!(error = %e, "generation request failed");
    GenerationError::Transport(e.to_string())
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn parse_response(body: &str) -> Result<GenerationResult, GenerationError> {
    serde_json::from_str(body).map_err(|e| {
        error!(error = %e, "generation response parse failed");
        GenerationError::InvalidResponse(e.to_string())
    })
}

/// Pull `message` out of an error body, if the body is JSON and has one.
fn remote_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
