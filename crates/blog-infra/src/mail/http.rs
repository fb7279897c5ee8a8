use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use blog_core::ports::{EmailMessage, MailError, Mailer};

use super::{check_message, mask_email};

/// Settings for an HTTP mail relay.
#[derive(Debug, Clone)]
pub struct HttpMailerConfig {
    /// Endpoint that accepts `POST` of a JSON message.
    pub url: String,
    /// Sent as a bearer token when present.
    pub token: Option<String>,
    pub default_from: String,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
}

/// Delivers messages through an HTTP relay (Mailgun/Postmark style JSON API).
pub struct HttpMailer {
    config: HttpMailerConfig,
    client: reqwest::Client,
}

impl HttpMailer {
    pub fn new(config: HttpMailerConfig) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: EmailMessage) -> Result<usize, MailError> {
        check_message(&message)?;

        let payload = RelayPayload {
            from: message.from.as_deref().unwrap_or(&self.config.default_from),
            to: &message.to,
            subject: &message.subject,
            text: &message.body,
        };

        let mut request = self.client.post(&self.config.url).json(&payload);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "Mail relay rejected message");
            return Err(MailError::Transport(format!("relay answered {status}")));
        }

        tracing::debug!(
            recipients = message.to.len(),
            first = %mask_email(&message.to[0]),
            "Email relayed"
        );
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_http_mailer_rejects_empty_recipients_before_sending() {
        let mailer = HttpMailer::new(HttpMailerConfig {
            url: "http://127.0.0.1:9/send".to_string(),
            token: None,
            default_from: "webmaster@localhost".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        let result = mailer
            .send(EmailMessage {
                subject: "s".to_string(),
                body: "b".to_string(),
                from: None,
                to: vec![],
            })
            .await;
        assert!(matches!(result, Err(MailError::InvalidMessage(_))));
    }
}
