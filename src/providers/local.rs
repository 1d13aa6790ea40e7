//! Local transport for development and testing.
//!
//! Records every submitted message in memory instead of sending it, so tests
//! can assert on the exact field mapping the service produced.
//!
//! # Testing Usage
//!
//! ```rust,ignore
//! use mailgun_service::{MailgunConfig, MailgunService};
//! use mailgun_service::providers::LocalTransport;
//!
//! #[tokio::test]
//! async fn sends_welcome_email() {
//!     let transport = LocalTransport::new();
//!     let mut service = MailgunService::with_transport(
//!         MailgunConfig::new("mg.example.com", "key"),
//!         transport.clone(),
//!     );
//!
//!     // Code under test
//!     send_welcome_email(&mut service, "user@example.com").await;
//!
//!     assert!(transport.sent_to("user@example.com"));
//! }
//! ```

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::MailError;
use crate::message::Message;
use crate::transport::{DeliveryResult, SendRequest, Transport};

/// A message captured by [`LocalTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Identifier handed back in the [`DeliveryResult`].
    pub id: String,
    /// Sending domain the message was submitted for.
    pub domain: String,
    /// Credential the message was submitted with.
    pub api_key: String,
    /// The field mapping as submitted.
    pub message: Message,
}

/// Transport that stores messages in memory.
///
/// Clones share the same record, so keep one clone for assertions and hand
/// the other to the service.
#[derive(Debug, Clone, Default)]
pub struct LocalTransport {
    sent: Arc<RwLock<Vec<SentMessage>>>,
    /// If set, send() will return this error (for testing error paths).
    fail_with: Arc<RwLock<Option<String>>>,
}

impl LocalTransport {
    /// Create a new local transport with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Failure Simulation (for testing)
    // =========================================================================

    /// Configure the transport to fail with an error message.
    ///
    /// ```rust,ignore
    /// let transport = LocalTransport::new();
    /// transport.set_failure("Forbidden");
    ///
    /// assert!(service.send().await.is_err());
    /// ```
    pub fn set_failure(&self, message: impl Into<String>) {
        *self.fail_with.write() = Some(message.into());
    }

    /// Clear the failure state.
    pub fn clear_failure(&self) {
        *self.fail_with.write() = None;
    }

    // =========================================================================
    // Message Access (for testing assertions)
    // =========================================================================

    /// All captured messages, oldest first.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.read().clone()
    }

    /// The most recently captured message.
    pub fn last(&self) -> Option<SentMessage> {
        self.sent.read().last().cloned()
    }

    /// Number of captured messages.
    pub fn count(&self) -> usize {
        self.sent.read().len()
    }

    /// Check if anything was sent.
    pub fn has_sent(&self) -> bool {
        self.count() > 0
    }

    /// Forget all captured messages.
    pub fn clear(&self) {
        self.sent.write().clear();
    }

    /// Remove and return all captured messages.
    pub fn flush(&self) -> Vec<SentMessage> {
        std::mem::take(&mut *self.sent.write())
    }

    /// Check if a message was sent to a specific address.
    pub fn sent_to(&self, email: &str) -> bool {
        self.sent.read().iter().any(|sent| {
            sent.message
                .get("to")
                .is_some_and(|to| to.eq_ignore_ascii_case(email))
        })
    }

    /// Find captured messages matching a predicate.
    pub fn find<F>(&self, predicate: F) -> Vec<SentMessage>
    where
        F: Fn(&Message) -> bool,
    {
        self.sent
            .read()
            .iter()
            .filter(|sent| predicate(&sent.message))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn send(&self, request: SendRequest<'_>) -> Result<DeliveryResult, MailError> {
        if let Some(ref message) = *self.fail_with.read() {
            return Err(MailError::provider("local", message.clone()));
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.sent.write().push(SentMessage {
            id: id.clone(),
            domain: request.domain.to_string(),
            api_key: request.api_key.to_string(),
            message: request.message.clone(),
        });
        Ok(DeliveryResult::new(id))
    }

    fn provider_name(&self) -> &'static str {
        "local"
    }
}
