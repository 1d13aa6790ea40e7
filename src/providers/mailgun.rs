//! Mailgun HTTP transport.
//!
//! For reference: [Mailgun API docs](https://documentation.mailgun.com/en/latest/api-sending.html#sending)
//!
//! # Example
//!
//! ```rust,ignore
//! use mailgun_service::providers::MailgunTransport;
//!
//! let transport = MailgunTransport::new();
//! ```
//!
//! For EU domains, use `.base_url("https://api.eu.mailgun.net/v3")`.
//!
//! ## Form encoding
//!
//! Each string field of the [`Message`](crate::Message) becomes a text part
//! under its own key (`to`, `from`, `h:Reply-To`, ...). Each attached file is
//! read at send time and sent as a file part named `attachment` or `inline`.

use async_trait::async_trait;
use base64::Engine;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::Deserialize;

use crate::attachment::AttachedFile;
use crate::config::MAILGUN_BASE_URL;
use crate::error::MailError;
use crate::message::Message;
use crate::transport::{DeliveryResult, SendRequest, Transport};

/// Transport for the Mailgun messages API.
///
/// Holds one reusable HTTP client. The credential arrives with each
/// [`SendRequest`], so one transport can serve several services.
#[derive(Debug, Clone)]
pub struct MailgunTransport {
    base_url: String,
    client: Client,
}

impl MailgunTransport {
    /// Create a transport for the default (US) endpoint.
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create with a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self {
            base_url: MAILGUN_BASE_URL.to_string(),
            client,
        }
    }

    /// Set a custom base URL (e.g., for EU: "https://api.eu.mailgun.net/v3").
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// URL messages for `domain` are posted to.
    pub fn messages_url(&self, domain: &str) -> String {
        format!("{}/{}/messages", self.base_url.trim_end_matches('/'), domain)
    }

    fn auth_header(api_key: &str) -> String {
        let credentials = format!("api:{}", api_key);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }

    fn build_form(message: &Message) -> Result<Form, MailError> {
        let mut form = Form::new();

        for (key, value) in message.fields() {
            form = form.text(key.to_string(), value.to_string());
        }

        for file in message.files() {
            form = form.part(file.disposition.key(), Self::file_part(file)?);
        }

        Ok(form)
    }

    fn file_part(file: &AttachedFile) -> Result<Part, MailError> {
        let data = file.read()?;
        Part::bytes(data)
            .file_name(file.filename.clone())
            .mime_str(&file.content_type())
            .map_err(|e| MailError::AttachmentError(format!("{}: {}", file.filename, e)))
    }
}

impl Default for MailgunTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MailgunTransport {
    async fn send(&self, request: SendRequest<'_>) -> Result<DeliveryResult, MailError> {
        let form = Self::build_form(request.message)?;
        let url = self.messages_url(request.domain);

        let response = self
            .client
            .post(&url)
            .header("Authorization", Self::auth_header(request.api_key))
            .header("User-Agent", format!("mailgun-service/{}", crate::VERSION))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let result: MailgunResponse = response.json().await?;
            Ok(DeliveryResult::with_response(
                result.id,
                serde_json::json!({
                    "provider": "mailgun",
                    "message": result.message,
                }),
            ))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            let error_msg = serde_json::from_str::<MailgunError>(&error_body)
                .map(|e| e.message)
                .unwrap_or(error_body);

            Err(MailError::provider_with_status(
                "mailgun",
                error_msg,
                status.as_u16(),
            ))
        }
    }

    fn provider_name(&self) -> &'static str {
        "mailgun"
    }
}

// ============================================================================
// Mailgun API Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct MailgunResponse {
    id: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct MailgunError {
    message: String,
}
