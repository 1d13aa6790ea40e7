//! Transport implementations.
//!
//! Each transport implements the [`Transport`](crate::Transport) trait.
//!
//! ## Available Transports
//!
//! | Transport | Feature Flag | Description |
//! |-----------|-------------|-------------|
//! | [`MailgunTransport`] | `mailgun` | Mailgun messages API over HTTP |
//! | [`LocalTransport`] | (none) | Records messages in memory for dev/testing |
//! | [`LoggerTransport`] | (none) | Logs messages without sending |

#[cfg(feature = "mailgun")]
mod mailgun;
#[cfg(feature = "mailgun")]
pub use mailgun::MailgunTransport;

mod local;
pub use local::{LocalTransport, SentMessage};

mod logger;
pub use logger::LoggerTransport;
