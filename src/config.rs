//! Service configuration.

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::MailError;

/// Default Mailgun API endpoint (US region).
pub const MAILGUN_BASE_URL: &str = "https://api.mailgun.net/v3";

/// Configuration record for [`MailgunService`](crate::MailgunService).
///
/// Deserializes from either snake_case or camelCase keys:
///
/// ```
/// use mailgun_service::MailgunConfig;
///
/// let config: MailgunConfig =
///     serde_json::from_str(r#"{"domain": "mg.example.com", "apiKey": "key-123"}"#).unwrap();
/// assert_eq!(config.api_key, "key-123");
/// assert!(config.base_url.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailgunConfig {
    /// Sending domain (e.g., "mg.yourdomain.com" or a sandbox domain)
    pub domain: String,
    /// Mailgun API key
    #[serde(alias = "apiKey")]
    pub api_key: String,
    /// API endpoint override (e.g., "https://api.eu.mailgun.net/v3")
    #[serde(alias = "baseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl MailgunConfig {
    /// Create a configuration with a domain and API key.
    pub fn new(domain: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            api_key: api_key.into(),
            base_url: None,
        }
    }

    /// Set a custom base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Load from `MAILGUN_API_KEY`, `MAILGUN_DOMAIN` and the optional
    /// `MAILGUN_BASE_URL`.
    pub fn from_env() -> Result<Self, MailError> {
        let api_key = env::var("MAILGUN_API_KEY")
            .map_err(|_| MailError::Configuration("MAILGUN_API_KEY not set".into()))?;
        let domain = env::var("MAILGUN_DOMAIN")
            .map_err(|_| MailError::Configuration("MAILGUN_DOMAIN not set".into()))?;

        let mut config = Self::new(domain, api_key);
        // EU accounts use a different endpoint
        if let Ok(base_url) = env::var("MAILGUN_BASE_URL") {
            config = config.base_url(base_url);
        }
        Ok(config)
    }

    /// True when no value is set.
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
            && self.api_key.is_empty()
            && self.base_url.as_deref().map_or(true, str::is_empty)
    }

    /// Endpoint to use, falling back to [`MAILGUN_BASE_URL`].
    pub fn endpoint(&self) -> &str {
        match self.base_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => MAILGUN_BASE_URL,
        }
    }
}
