//! Transport trait and delivery result types.
//!
//! A [`Transport`] is the provider client a
//! [`MailgunService`](crate::MailgunService) hands its assembled message to.
//! The service only shapes the field mapping; the transport owns the network
//! call.
//!
//! # Why `async_trait`?
//!
//! The service stores its transport as `Arc<dyn Transport>` so tests and
//! development setups can swap in [`LocalTransport`](crate::providers::LocalTransport)
//! or [`LoggerTransport`](crate::providers::LoggerTransport) without a type
//! parameter leaking into every caller. Native async traits are not object
//! safe, so the futures are boxed. Sending is I/O-bound and the allocation is
//! not measurable next to the request itself.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MailError;
use crate::message::Message;

/// Result of a successful send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryResult {
    /// Message ID assigned by the provider
    pub message_id: String,
    /// Optional provider-specific response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_response: Option<serde_json::Value>,
}

impl DeliveryResult {
    /// Create a new delivery result with just a message ID.
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            provider_response: None,
        }
    }

    /// Create a delivery result with provider response.
    pub fn with_response(message_id: impl Into<String>, response: serde_json::Value) -> Self {
        Self {
            message_id: message_id.into(),
            provider_response: Some(response),
        }
    }
}

/// Everything one send needs: credential, sending domain and the mapping.
#[derive(Debug, Clone, Copy)]
pub struct SendRequest<'a> {
    /// Provider credential
    pub api_key: &'a str,
    /// Sending domain registered with the provider
    pub domain: &'a str,
    /// Field mapping to submit
    pub message: &'a Message,
}

/// Provider client capability.
///
/// # Example
///
/// ```ignore
/// use mailgun_service::{DeliveryResult, MailError, SendRequest, Transport};
///
/// struct Outbox;
///
/// #[async_trait::async_trait]
/// impl Transport for Outbox {
///     async fn send(&self, request: SendRequest<'_>) -> Result<DeliveryResult, MailError> {
///         println!("{} -> {}", request.domain, request.message.to_value());
///         Ok(DeliveryResult::new("queued"))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit one message.
    ///
    /// Errors are returned as the provider reports them; the service does
    /// not interpret or retry.
    async fn send(&self, request: SendRequest<'_>) -> Result<DeliveryResult, MailError>;

    /// Get the provider name (for logging/debugging).
    fn provider_name(&self) -> &'static str {
        "unknown"
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: SendRequest<'_>) -> Result<DeliveryResult, MailError> {
        (**self).send(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
