use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::ports::{EmailMessage, MailError, Mailer};

use super::check_message;

/// In-memory mailer: every sent message lands in an outbox.
#[derive(Default)]
pub struct InMemoryMailer {
    outbox: RwLock<Vec<EmailMessage>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the outbox, oldest first.
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.outbox.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.outbox.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.outbox.read().await.is_empty()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, message: EmailMessage) -> Result<usize, MailError> {
        check_message(&message)?;
        self.outbox.write().await.push(message);
        Ok(1)
    }
}
