use std::env;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::api_connection::endpoints::DEFAULT_GENERATE_CONTENT_URL;
use crate::api_connection::{CompletionProvider, GenerativeLanguageProvider, UnavailableProvider};
use crate::retry::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES};

pub const API_KEY_ENV_VAR: &str = "HEALTH_AI_API_KEY";
pub const ENDPOINT_ENV_VAR: &str = "HEALTH_AI_ENDPOINT";
pub const MAX_RETRIES_ENV_VAR: &str = "HEALTH_AI_MAX_RETRIES";
pub const BASE_DELAY_ENV_VAR: &str = "HEALTH_AI_BASE_DELAY_MS";
pub const RECIPE_SEED_ENV_VAR: &str = "HEALTH_AI_RECIPE_SEED";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

/// Everything the assistant needs to reach the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub credential: Option<String>,
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub recipe_seed: Option<u64>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GENERATE_CONTENT_URL.to_string(),
            credential: None,
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY.as_millis() as u64,
            recipe_seed: None,
        }
    }
}

impl AssistantConfig {
    /// Reads the `HEALTH_AI_*` variables, loading a `.env` file first if
    /// one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Ok(Self {
            endpoint: read(ENDPOINT_ENV_VAR).unwrap_or(defaults.endpoint),
            credential: read(API_KEY_ENV_VAR),
            max_retries: parse_var(MAX_RETRIES_ENV_VAR, read(MAX_RETRIES_ENV_VAR))?
                .unwrap_or(defaults.max_retries)
                .max(1),
            base_delay_ms: parse_var(BASE_DELAY_ENV_VAR, read(BASE_DELAY_ENV_VAR))?
                .unwrap_or(defaults.base_delay_ms),
            recipe_seed: parse_var(RECIPE_SEED_ENV_VAR, read(RECIPE_SEED_ENV_VAR))?,
        })
    }

    /// A configuration with no credential. Every request takes the
    /// offline path.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn require_credential(&self) -> Result<&str, ConfigError> {
        self.credential
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_ENV_VAR.to_string()))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.base_delay_ms))
    }

    /// The HTTP provider when a credential is configured, otherwise one
    /// that always fails.
    pub fn provider(&self) -> Arc<dyn CompletionProvider> {
        match self.require_credential() {
            Ok(credential) => Arc::new(GenerativeLanguageProvider::new(
                self.endpoint.clone(),
                credential,
            )),
            Err(_) => Arc::new(UnavailableProvider),
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                value: raw.clone(),
            })
        })
        .transpose()
}
