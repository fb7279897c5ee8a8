//! Composition of the "recommend this post" email.

use crate::domain::Post;
use crate::ports::EmailMessage;

/// Validated input of a share request.
#[derive(Debug, Clone)]
pub struct ShareRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub to: &'a str,
    pub comments: &'a str,
}

/// Build the recommendation email for `post`, linking to `post_url`.
pub fn compose_share_email(
    post: &Post,
    post_url: &str,
    request: &ShareRequest<'_>,
    from: Option<String>,
) -> EmailMessage {
    let subject = format!(
        "{} ({}) recommends you read {}",
        request.name, request.email, post.title
    );
    let body = format!(
        "Read {} at {}\n\n{}'s comments: {}",
        post.title, post_url, request.name, request.comments
    );

    EmailMessage {
        subject,
        body,
        from,
        to: vec![request.to.to_string()],
    }
}
