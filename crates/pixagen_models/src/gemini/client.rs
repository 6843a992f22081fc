//! reqwest client for the Google AI Studio REST API.

use crate::{GenerateContentRequest, GenerateContentResponse, GenerationProvider};
use async_trait::async_trait;
use pixagen_core::Credential;
use pixagen_error::{GenerationError, GenerationErrorKind};
use reqwest::Client;
use tracing::{debug, error, instrument};

/// Public Google AI Studio endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Calls `POST {base_url}/models/{model}:generateContent`.
///
/// No timeout or retry is configured; each call waits on the transport default
/// and a failure is reported straight back.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client against `base_url` (no trailing `/models`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client reusing an existing reqwest client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(url = %base_url, "Created Gemini client");
        Self { client, base_url }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Pulls `error.message` out of a Google API error body, falling back to the
/// raw body and then to the status line.
fn provider_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string));

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status.to_string(),
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, credential, request))]
    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let url = self.endpoint(model);
        debug!(url = %url, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                GenerationError::new(GenerationErrorKind::ProviderCallFailed {
                    status: None,
                    message: e.to_string(),
                })
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = provider_error_message(status, &body);
            error!(status = %status, error = %message, "Provider returned an error");
            return Err(GenerationError::new(
                GenerationErrorKind::ProviderCallFailed {
                    status: Some(status.as_u16()),
                    message,
                },
            ));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse provider response");
            GenerationError::new(GenerationErrorKind::ProviderCallFailed {
                status: Some(status.as_u16()),
                message: format!("Failed to parse provider response: {}", e),
            })
        })?;

        debug!(
            candidates = parsed.candidates.as_ref().map_or(0, Vec::len),
            "Received generateContent response"
        );
        Ok(parsed)
    }
}
