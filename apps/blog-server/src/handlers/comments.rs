//! Comment submission.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::Comment;
use blog_core::ports::BaseRepository;
use blog_shared::dto::CommentResultView;
use blog_shared::{ApiResponse, BoundForm, CommentForm};

use super::views;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /blog/{post_id}/comment/
///
/// Invalid input is answered with the bound form and its errors; nothing is stored.
pub async fn post_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_published_by_id(post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("post", post_id))?;

    let form = BoundForm::bind(form.into_inner());
    if !form.is_valid() {
        tracing::debug!(%post_id, errors = ?form.errors, "Comment rejected");
        return Ok(HttpResponse::Ok().json(ApiResponse::ok(CommentResultView {
            post: views::post_link(&post),
            form,
            comment: None,
        })));
    }

    let CommentForm { name, email, body } = form.data.clone();
    let comment = state
        .comments
        .insert(Comment::new(post.id, name, email, body))
        .await?;

    tracing::info!(%post_id, comment_id = %comment.id, "Comment added");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        CommentResultView {
            post: views::post_link(&post),
            form,
            comment: Some(views::comment_view(&comment)),
        },
        "Your comment has been added.",
    )))
}
