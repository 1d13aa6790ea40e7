//! # mailgun-service
//!
//! Build a message field by field, then send it through the Mailgun
//! messages API in one call.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mailgun_service::{MailgunConfig, MailgunService};
//!
//! let mut service = MailgunService::new(MailgunConfig::new("mg.example.com", "key-xxxxx"));
//!
//! service
//!     .to("user@example.com")
//!     .from("noreply@example.com", Some("My App"))
//!     .subject("Welcome!")
//!     .text_message("Hello");
//!
//! service.send().await?;
//! service.reset();
//! ```
//!
//! ## Field Mapping
//!
//! The service keeps one value per field; setting a field again replaces it.
//!
//! | Call | Mapping key |
//! |------|-------------|
//! | `to`, `cc`, `bcc`, `subject` | same name |
//! | `from(email, Some(name))` | `from` = `name <email>` |
//! | `text_message` / `html_message` | `text` / `html` |
//! | `set_header(name, value)`, `reply_to` | `h:<name>`, `h:Reply-To` |
//! | `attach` / `attach_file` | `attachment` or `inline` = `{filePath, filename}` |
//!
//! ## Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `MAILGUN_API_KEY` | Mailgun API key |
//! | `MAILGUN_DOMAIN` | Mailgun sending domain |
//! | `MAILGUN_BASE_URL` | API endpoint override (e.g. EU region) |
//!
//! ## Feature Flags
//!
//! - `mailgun` (default) - HTTP transport via reqwest
//! - `metrics` - Prometheus-style metrics (counters/histograms)
//!
//! ## Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `mailgun_emails_total` | Counter | provider, status | Total messages sent |
//! | `mailgun_delivery_duration_seconds` | Histogram | provider | Send duration |

/// The version of the mailgun-service crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod attachment;
mod config;
mod error;
mod message;
mod service;
mod transport;

pub mod providers;

// Re-exports
pub use attachment::{AttachedFile, Disposition};
pub use config::{MailgunConfig, MAILGUN_BASE_URL};
pub use error::MailError;
pub use message::{Message, HEADER_PREFIX};
pub use service::{Format, MailgunService};
pub use transport::{DeliveryResult, SendRequest, Transport};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::AttachedFile;
    pub use crate::DeliveryResult;
    pub use crate::Disposition;
    pub use crate::MailError;
    pub use crate::MailgunConfig;
    pub use crate::MailgunService;
    pub use crate::Message;
    pub use crate::Transport;
}
