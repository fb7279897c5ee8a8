//! Mail transport port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A plain-text email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
    /// Sender address; `None` lets the transport use its configured default.
    pub from: Option<String>,
    pub to: Vec<String>,
}

/// Mailer trait - abstraction over mail transports (console, HTTP relay, in-memory).
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message. Returns the number of messages sent.
    async fn send(&self, message: EmailMessage) -> Result<usize, MailError>;
}

/// Mail delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Transport failed: {0}")]
    Transport(String),
}
