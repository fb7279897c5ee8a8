//! Mail transports implementing the `Mailer` port.
//!
//! - `ConsoleMailer` writes messages to the log (development)
//! - `HttpMailer` posts messages to an HTTP mail relay
//! - `InMemoryMailer` keeps an outbox (tests)

mod console;
mod http;
mod memory;

pub use console::ConsoleMailer;
pub use http::{HttpMailer, HttpMailerConfig};
pub use memory::InMemoryMailer;

use blog_core::ports::{EmailMessage, MailError};

/// Hide the local part of an address for logging: `ana@example.com` -> `a***@example.com`.
pub fn mask_email(address: &str) -> String {
    match address.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        None => "***".to_string(),
    }
}

/// Mask every address embedded in free text, keeping the surrounding punctuation.
pub fn mask_addresses(text: &str) -> String {
    fn is_wrapper(c: char) -> bool {
        c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>' | '[' | ']' | ',' | ';' | ':' | '"' | '\'' | '.')
    }

    let mut masked = String::with_capacity(text.len());
    for piece in text.split_inclusive(char::is_whitespace) {
        let core = piece.trim_matches(is_wrapper);
        if !core.contains('@') {
            masked.push_str(piece);
            continue;
        }
        let start = piece.len() - piece.trim_start_matches(is_wrapper).len();
        let end = start + core.len();
        masked.push_str(&piece[..start]);
        masked.push_str(&mask_email(core));
        masked.push_str(&piece[end..]);
    }
    masked
}

/// Reject messages no transport could deliver.
fn check_message(message: &EmailMessage) -> Result<(), MailError> {
    if message.to.is_empty() {
        return Err(MailError::InvalidMessage("no recipients".to_string()));
    }
    if message.to.iter().any(|addr| !addr.contains('@')) {
        return Err(MailError::InvalidMessage("malformed recipient".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("ana@example.com"), "a***@example.com");
        assert_eq!(mask_email("nobody"), "***");
    }

    #[test]
    fn test_mask_addresses_in_subject_and_body() {
        assert_eq!(
            mask_addresses("Ana (ana@example.com) recommends you read Async Rust"),
            "Ana (a***@example.com) recommends you read Async Rust"
        );
        assert_eq!(
            mask_addresses("Write to bo@example.com.\nThanks"),
            "Write to b***@example.com.\nThanks"
        );
        assert_eq!(mask_addresses("no address here"), "no address here");
    }

    #[test]
    fn test_check_message_requires_recipients() {
        let mut message = EmailMessage {
            subject: "s".to_string(),
            body: "b".to_string(),
            from: None,
            to: vec![],
        };
        assert!(matches!(
            check_message(&message),
            Err(MailError::InvalidMessage(_))
        ));

        message.to.push("bo@example.com".to_string());
        assert!(check_message(&message).is_ok());
    }
}
