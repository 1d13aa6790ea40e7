//! Logger transport that only logs messages.
//!
//! Useful for staging environments or when you want to see what would be sent
//! without actually calling the provider.

use async_trait::async_trait;

use crate::error::MailError;
use crate::transport::{DeliveryResult, SendRequest, Transport};

/// Logger transport that emits tracing events for messages.
pub struct LoggerTransport {
    /// If true, log every field. If false, just log recipient summary.
    log_full: bool,
}

impl LoggerTransport {
    /// Create a logger transport with brief output (just recipient and subject).
    pub fn new() -> Self {
        Self { log_full: false }
    }

    /// Create a logger transport with full message details.
    pub fn full() -> Self {
        Self { log_full: true }
    }

    /// Set whether to log full message details.
    pub fn log_full(mut self, full: bool) -> Self {
        self.log_full = full;
        self
    }
}

impl Default for LoggerTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for LoggerTransport {
    async fn send(&self, request: SendRequest<'_>) -> Result<DeliveryResult, MailError> {
        let message_id = uuid::Uuid::new_v4().to_string();
        let message = request.message;

        if self.log_full {
            tracing::info!(
                message_id = %message_id,
                domain = %request.domain,
                from = ?message.get("from"),
                to = ?message.get("to"),
                cc = ?message.get("cc"),
                bcc = ?message.get("bcc"),
                subject = ?message.get("subject"),
                headers = ?message.headers().collect::<Vec<_>>(),
                has_html = message.get("html").is_some(),
                has_text = message.get("text").is_some(),
                attachments = ?message.files().map(|f| &f.filename).collect::<Vec<_>>(),
                "Message logged (full)"
            );

            // Bodies at debug level
            if let Some(text) = message.get("text") {
                tracing::debug!(body = %text, "Text body");
            }
            if let Some(html) = message.get("html") {
                tracing::debug!(body = %html, "HTML body");
            }
        } else {
            tracing::info!(
                message_id = %message_id,
                to = ?message.get("to"),
                subject = ?message.get("subject"),
                "Message logged"
            );
        }

        Ok(DeliveryResult::new(message_id))
    }

    fn provider_name(&self) -> &'static str {
        "logger"
    }
}
