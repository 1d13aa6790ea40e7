//! The message builder and sender.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use std::time::Instant;

use tracing::Instrument;

use crate::attachment::AttachedFile;
use crate::config::MailgunConfig;
use crate::error::MailError;
use crate::message::Message;
use crate::transport::{DeliveryResult, SendRequest, Transport};

/// Body format of a message.
///
/// Accepted by [`MailgunService::format`] for interface compatibility. The
/// provider infers the format from which body fields are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Html,
    Text,
}

impl FromStr for Format {
    type Err = MailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "text" | "plain" => Ok(Self::Text),
            other => Err(MailError::Configuration(format!(
                "Unknown message format: {}",
                other
            ))),
        }
    }
}

/// Builds one message at a time and sends it through Mailgun.
///
/// Setters overwrite: calling [`to`](Self::to) twice keeps the second
/// address. [`send`](Self::send) leaves the message in place, so call
/// [`reset`](Self::reset) (or use [`send_and_reset`](Self::send_and_reset))
/// before building the next one.
///
/// ```rust,ignore
/// use mailgun_service::{MailgunConfig, MailgunService};
///
/// let mut service = MailgunService::new(MailgunConfig::new("mg.example.com", "key-123"));
///
/// service
///     .to("steve.rogers@example.com")
///     .from("tony.stark@example.com", Some("Tony Stark"))
///     .subject("Hello, Avengers!")
///     .text_message("Assemble.");
///
/// let result = service.send_and_reset().await?;
/// println!("queued as {}", result.message_id);
/// ```
pub struct MailgunService {
    domain: String,
    api_key: String,
    message: Message,
    transport: Arc<dyn Transport>,
}

impl MailgunService {
    /// Create a service that talks to the Mailgun HTTP API.
    ///
    /// `config.base_url` selects the endpoint (EU accounts).
    #[cfg(feature = "mailgun")]
    pub fn new(config: MailgunConfig) -> Self {
        let transport =
            crate::providers::MailgunTransport::new().base_url(config.endpoint().to_string());
        Self::with_transport(config, transport)
    }

    /// Create a service from `MAILGUN_*` environment variables.
    #[cfg(feature = "mailgun")]
    pub fn from_env() -> Result<Self, MailError> {
        Ok(Self::new(MailgunConfig::from_env()?))
    }

    /// Create a service with any transport.
    pub fn with_transport(config: MailgunConfig, transport: impl Transport + 'static) -> Self {
        let mut service = Self {
            domain: String::new(),
            api_key: String::new(),
            message: Message::new(),
            transport: Arc::new(transport),
        };
        service.configure(&config);
        service
    }

    /// Copy the non-empty values of `config`. An empty record changes nothing.
    fn configure(&mut self, config: &MailgunConfig) {
        if config.is_empty() {
            tracing::debug!("Empty Mailgun configuration, keeping defaults");
            return;
        }
        if !config.domain.is_empty() {
            self.domain = config.domain.clone();
        }
        if !config.api_key.is_empty() {
            self.api_key = config.api_key.clone();
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The message built so far.
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Sending domain.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Check that both a domain and an API key are set.
    pub fn is_configured(&self) -> bool {
        !self.domain.is_empty() && !self.api_key.is_empty()
    }

    /// Name of the transport in use.
    pub fn transport_name(&self) -> &'static str {
        self.transport.provider_name()
    }

    // =========================================================================
    // Field Setters
    // =========================================================================

    /// Set the recipient. Replaces any previous recipient.
    pub fn to(&mut self, email: impl Into<String>) -> &mut Self {
        self.message.set("to", email);
        self
    }

    /// Set the sender, as `Name <email>` when a non-empty name is given.
    pub fn from(&mut self, email: impl Into<String>, name: Option<&str>) -> &mut Self {
        let email = email.into();
        let from = match name {
            Some(name) if !name.is_empty() => format!("{} <{}>", name, email),
            _ => email,
        };
        self.message.set("from", from);
        self
    }

    /// Set the carbon copy address.
    pub fn cc(&mut self, email: impl Into<String>) -> &mut Self {
        self.message.set("cc", email);
        self
    }

    /// Set the blind carbon copy address.
    pub fn bcc(&mut self, email: impl Into<String>) -> &mut Self {
        self.message.set("bcc", email);
        self
    }

    /// Set the reply-to address (Mailgun takes it as the `h:Reply-To` header).
    pub fn reply_to(&mut self, email: impl Into<String>) -> &mut Self {
        self.set_header("Reply-To", email)
    }

    /// Set the subject line.
    pub fn subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.message.set("subject", subject);
        self
    }

    /// Set the HTML body.
    pub fn html_message(&mut self, body: impl Into<String>) -> &mut Self {
        self.message.set("html", body);
        self
    }

    /// Set the plain text body.
    pub fn text_message(&mut self, body: impl Into<String>) -> &mut Self {
        self.message.set("text", body);
        self
    }

    /// Accepted for interface compatibility; has no effect on the message.
    pub fn format(&mut self, _format: Format) -> &mut Self {
        self
    }

    /// Set a custom header, sent as `h:<name>`.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.message.set_header(name, value);
        self
    }

    /// Attach a file as a regular attachment, named after its base name.
    pub fn attach(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.attach_file(AttachedFile::new(path))
    }

    /// Attach a file with an explicit disposition, name or MIME type.
    ///
    /// Replaces the file previously attached with the same disposition.
    ///
    /// ```rust,ignore
    /// service.attach_file(AttachedFile::new("/srv/logo-v2.png").inline().rename("logo.png"));
    /// ```
    pub fn attach_file(&mut self, file: AttachedFile) -> &mut Self {
        self.message.set_file(file);
        self
    }

    /// Clear the message, attachments included.
    pub fn reset(&mut self) -> &mut Self {
        self.message.clear();
        self
    }

    // =========================================================================
    // Sending
    // =========================================================================

    /// Send the current message. The message is left untouched.
    ///
    /// Nothing is validated first; whatever the transport reports is
    /// returned as-is.
    pub async fn send(&self) -> Result<DeliveryResult, MailError> {
        let provider = self.transport.provider_name();

        let span = tracing::info_span!(
            "mailgun.send",
            provider = provider,
            domain = %self.domain,
            to = ?self.message.get("to"),
            subject = ?self.message.get("subject"),
        );

        async {
            tracing::debug!(fields = self.message.len(), "Sending message");

            #[cfg(feature = "metrics")]
            let start = Instant::now();

            let result = self
                .transport
                .send(SendRequest {
                    api_key: &self.api_key,
                    domain: &self.domain,
                    message: &self.message,
                })
                .await;

            // Record metrics
            #[cfg(feature = "metrics")]
            {
                let duration = start.elapsed().as_secs_f64();
                let status = if result.is_ok() { "success" } else { "error" };
                metrics::counter!("mailgun_emails_total", "provider" => provider, "status" => status)
                    .increment(1);
                metrics::histogram!("mailgun_delivery_duration_seconds", "provider" => provider)
                    .record(duration);
            }

            match &result {
                Ok(r) => tracing::info!(message_id = %r.message_id, "Message sent"),
                Err(e) => tracing::error!(error = %e, "Message send failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    /// Send the current message and clear it once the provider accepts it.
    ///
    /// On failure the message is kept so the caller can retry or inspect it.
    pub async fn send_and_reset(&mut self) -> Result<DeliveryResult, MailError> {
        let result = self.send().await?;
        self.reset();
        Ok(result)
    }
}

impl fmt::Debug for MailgunService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailgunService")
            .field("domain", &self.domain)
            .field("api_key", &"[redacted]")
            .field("message", &self.message)
            .field("transport", &self.transport.provider_name())
            .finish()
    }
}
