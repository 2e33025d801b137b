//! Providers that never touch the network.
//!
//! `ScriptedProvider` replays a fixed sequence of outcomes, which lets tests
//! drive the retry and fallback paths deterministically. `UnavailableProvider`
//! fails every call, which is how the binary runs offline.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::connection::{ApiConnectionError, CompletionProvider};
use super::endpoints::GenerationPreset;

#[derive(Debug)]
enum Scripted {
    Text(String),
    ServerError(u16),
}

/// Replays queued responses in order. Once the queue is drained every call
/// fails with a 503.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    queue: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        for response in responses {
            provider.push_text(response);
        }
        provider
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Scripted::Text(text.into()));
    }

    pub fn push_server_error(&self, status: u16) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Scripted::ServerError(status));
    }

    /// Number of `complete` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn server_error(status: u16) -> ApiConnectionError {
    ApiConnectionError::ApiError {
        status: reqwest::StatusCode::from_u16(status)
            .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
        error_body: "scripted failure".to_string(),
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        prompt: &str,
        _preset: GenerationPreset,
    ) -> Result<String, ApiConnectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        let next = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(Scripted::Text(text)) => Ok(text),
            Some(Scripted::ServerError(status)) => Err(server_error(status)),
            None => Err(server_error(503)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Fails every call as if no credential were configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableProvider;

#[async_trait]
impl CompletionProvider for UnavailableProvider {
    async fn complete(
        &self,
        _prompt: &str,
        _preset: GenerationPreset,
    ) -> Result<String, ApiConnectionError> {
        Err(ApiConnectionError::MissingCredential)
    }

    fn provider_name(&self) -> &'static str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_provider_replays_in_order() {
        let provider = ScriptedProvider::with_responses(["first", "second"]);
        provider.push_server_error(500);

        let preset = GenerationPreset::NUTRITION;
        assert_eq!(provider.complete("a", preset).await.unwrap(), "first");
        assert_eq!(provider.complete("b", preset).await.unwrap(), "second");
        assert!(matches!(
            provider.complete("c", preset).await,
            Err(ApiConnectionError::ApiError { status, .. }) if status.as_u16() == 500
        ));
        assert!(provider.complete("d", preset).await.is_err());
        assert_eq!(provider.calls(), 4);
        assert_eq!(provider.prompts(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_push_after_poisoned_lock_still_queues() {
        let provider = ScriptedProvider::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = provider.queue.lock().unwrap();
            panic!("poison the queue");
        }));
        assert!(provider.queue.is_poisoned());

        provider.push_text("after poison");
        provider.push_server_error(502);
        let next = provider.queue.lock().unwrap_or_else(PoisonError::into_inner).len();
        assert_eq!(next, 2);
    }

    #[tokio::test]
    async fn test_unavailable_provider_always_fails() {
        let provider = UnavailableProvider;
        let result = provider.complete("anything", GenerationPreset::RECIPES).await;
        assert!(matches!(result, Err(ApiConnectionError::MissingCredential)));
        assert!(!provider.is_available());
        assert!(ScriptedProvider::new().is_available());
    }
}
