//! Runtime configuration for the HireFlow backend.
//!
//! Both external collaborators are configured here:
//! - the document store (project id, web API key, endpoint)
//! - the chat/video platform (API key pair, endpoints, token TTL)
//!
//! Values come from `HIREFLOW_*` environment variables in production and
//! from builder methods in tests.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while assembling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
}

/// Default document-store endpoint.
const DEFAULT_STORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
/// Default chat endpoint.
const DEFAULT_CHAT_BASE_URL: &str = "https://chat.stream-io-api.com";
/// Default video endpoint.
const DEFAULT_VIDEO_BASE_URL: &str = "https://video.stream-io-api.com";

/// Complete backend configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document-store collaborator settings.
    pub store: StoreConfig,
    /// Chat/video platform settings.
    pub stream: StreamConfig,
}

impl AppConfig {
    /// Assemble configuration from `HIREFLOW_*` environment variables.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingEnv`] when a required variable is
    /// absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            store: StoreConfig::from_env()?,
            stream: StreamConfig::from_env()?,
        })
    }
}

/// Document-store collaborator settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project the documents live under.
    pub project_id: String,
    /// Web API key appended to requests, when the project requires one.
    pub api_key: Option<String>,
    /// REST endpoint.
    pub base_url: String,
    /// Request timeout.
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
    /// Connection timeout.
    #[serde(with = "duration_serde")]
    pub connect_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: None,
            base_url: DEFAULT_STORE_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl StoreConfig {
    /// Create a config for the given project with default settings.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    /// Set the web API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point at a non-default endpoint (emulator, proxy).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn from_env() -> Result<Self, ConfigError> {
        let project_id = require_env("HIREFLOW_FIRESTORE_PROJECT_ID")?;
        let mut config = Self::new(project_id);
        config.api_key = optional_env("HIREFLOW_FIRESTORE_API_KEY");
        if let Some(url) = optional_env("HIREFLOW_FIRESTORE_BASE_URL") {
            config.base_url = url;
        }
        Ok(config)
    }
}

/// Chat/video platform settings.
///
/// Chat and video share one API key pair; only the endpoints differ.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Platform API key (public half).
    pub api_key: String,
    /// Platform API secret used for HS256 token signing.
    pub api_secret: String,
    /// Chat REST endpoint.
    pub chat_base_url: String,
    /// Video REST endpoint.
    pub video_base_url: String,
    /// Lifetime of issued user tokens.
    #[serde(with = "duration_serde")]
    pub token_ttl: Duration,
    /// Request timeout.
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
    /// Connection timeout.
    #[serde(with = "duration_serde")]
    pub connect_timeout: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            chat_base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            video_base_url: DEFAULT_VIDEO_BASE_URL.to_string(),
            token_ttl: Duration::from_secs(3600),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl StreamConfig {
    /// Create a config for the given key pair with default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ..Self::default()
        }
    }

    /// Point chat at a non-default endpoint.
    #[must_use]
    pub fn with_chat_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.chat_base_url = base_url.into();
        self
    }

    /// Point video at a non-default endpoint.
    #[must_use]
    pub fn with_video_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.video_base_url = base_url.into();
        self
    }

    /// Set the issued-token lifetime.
    #[must_use]
    pub const fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    fn from_env() -> Result<Self, ConfigError> {
        let api_key = require_env("HIREFLOW_STREAM_API_KEY")?;
        let api_secret = require_env("HIREFLOW_STREAM_API_SECRET")?;
        let mut config = Self::new(api_key, api_secret);
        if let Some(url) = optional_env("HIREFLOW_STREAM_CHAT_URL") {
            config.chat_base_url = url;
        }
        if let Some(url) = optional_env("HIREFLOW_STREAM_VIDEO_URL") {
            config.video_base_url = url;
        }
        if let Some(ttl) = optional_env("HIREFLOW_TOKEN_TTL_SECS").and_then(|s| s.parse().ok()) {
            config.token_ttl = Duration::from_secs(ttl);
        }
        Ok(config)
    }
}

/// Read a required environment variable.
fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv(name)),
    }
}

/// Read an optional environment variable, treating empty as absent.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Serde module for Duration serialization.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = AppConfig::default();
        assert_eq!(config.store.base_url, DEFAULT_STORE_BASE_URL);
        assert_eq!(config.stream.chat_base_url, DEFAULT_CHAT_BASE_URL);
        assert_eq!(config.stream.video_base_url, DEFAULT_VIDEO_BASE_URL);
        assert_eq!(config.stream.token_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_config_builders() {
        let store = StoreConfig::new("demo-project")
            .with_api_key("web-key")
            .with_base_url("http://localhost:8080/v1")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(store.project_id, "demo-project");
        assert_eq!(store.api_key.as_deref(), Some("web-key"));
        assert_eq!(store.base_url, "http://localhost:8080/v1");
        assert_eq!(store.request_timeout, Duration::from_secs(5));

        let stream = StreamConfig::new("key", "secret").with_token_ttl(Duration::from_secs(60));
        assert_eq!(stream.api_key, "key");
        assert_eq!(stream.token_ttl, Duration::from_secs(60));
    }
}
