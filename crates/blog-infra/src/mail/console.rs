use async_trait::async_trait;

use blog_core::ports::{EmailMessage, MailError, Mailer};

use super::{check_message, mask_addresses, mask_email};

/// Console mailer - logs every message instead of delivering it (for development).
pub struct ConsoleMailer {
    default_from: String,
}

impl ConsoleMailer {
    pub fn new(default_from: impl Into<String>) -> Self {
        Self {
            default_from: default_from.into(),
        }
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, message: EmailMessage) -> Result<usize, MailError> {
        check_message(&message)?;

        let from = message.from.as_deref().unwrap_or(&self.default_from);
        let to: Vec<String> = message.to.iter().map(|a| mask_email(a)).collect();
        tracing::info!(from = %mask_email(from), to = ?to, "Email (console backend)");
        tracing::debug!(
            subject = %mask_addresses(&message.subject),
            body = %mask_addresses(&message.body),
            "Email content"
        );

        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_mailer_counts_one_message() {
        let mailer = ConsoleMailer::new("webmaster@localhost");
        let sent = mailer
            .send(EmailMessage {
                subject: "Hello".to_string(),
                body: "World".to_string(),
                from: None,
                to: vec!["bo@example.com".to_string()],
            })
            .await
            .unwrap();
        assert_eq!(sent, 1);
    }
}
