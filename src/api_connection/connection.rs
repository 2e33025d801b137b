use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use thiserror::Error;

use super::endpoints::{GenerateContentRequest, GenerateContentResponse, GenerationPreset};

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("No credential configured for the completion service")]
    MissingCredential,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },

    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Completion contained no text")]
    EmptyCompletion,
}

/// A text-completion backend. Takes a prompt, returns the raw model text.
///
/// Implementations hold no per-request state, so one provider can serve
/// any number of requests.
#[async_trait]
pub trait CompletionProvider: Send + Sync + fmt::Debug {
    async fn complete(
        &self,
        prompt: &str,
        preset: GenerationPreset,
    ) -> Result<String, ApiConnectionError>;

    fn provider_name(&self) -> &'static str;

    /// `false` for providers that can never answer. Callers skip the
    /// backoff schedule for them.
    fn is_available(&self) -> bool {
        true
    }
}

/// Client for a `generateContent` style endpoint.
#[derive(Debug, Clone)]
pub struct GenerativeLanguageProvider {
    client: Client,
    endpoint: String,
    credential: String,
}

impl GenerativeLanguageProvider {
    pub fn new(endpoint: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            credential: credential.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for GenerativeLanguageProvider {
    async fn complete(
        &self,
        prompt: &str,
        preset: GenerationPreset,
    ) -> Result<String, ApiConnectionError> {
        if self.credential.is_empty() {
            return Err(ApiConnectionError::MissingCredential);
        }

        let request = GenerateContentRequest::from_prompt(prompt, preset);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.credential.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiConnectionError::ApiError {
                status,
                error_body: body,
            });
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ApiConnectionError::MalformedEnvelope(e.to_string()))?;

        envelope
            .first_text()
            .ok_or(ApiConnectionError::EmptyCompletion)
    }

    fn provider_name(&self) -> &'static str {
        "generative-language"
    }
}
