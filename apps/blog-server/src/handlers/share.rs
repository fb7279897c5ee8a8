//! "Recommend this post" by email.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::Post;
use blog_core::share::{ShareRequest, compose_share_email};
use blog_infra::mail::mask_email;
use blog_shared::dto::ShareView;
use blog_shared::{ApiResponse, BoundForm, EmailPostForm};

use super::views;
use crate::middleware::error::AppResult;
use crate::state::AppState;

async fn load_post(state: &AppState, post_id: Uuid) -> AppResult<Post> {
    let post = state
        .posts
        .find_published_by_id(post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("post", post_id))?;
    Ok(post)
}

/// GET /blog/{post_id}/share/
pub async fn share_form(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = load_post(&state, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ShareView {
        post: views::post_link(&post),
        form: BoundForm::<EmailPostForm>::unbound(),
        sent: false,
    })))
}

/// POST /blog/{post_id}/share/
pub async fn share_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: web::Form<EmailPostForm>,
) -> AppResult<HttpResponse> {
    let post = load_post(&state, path.into_inner()).await?;

    let form = BoundForm::bind(form.into_inner());
    if !form.is_valid() {
        return Ok(HttpResponse::Ok().json(ApiResponse::ok(ShareView {
            post: views::post_link(&post),
            form,
            sent: false,
        })));
    }

    let post_url = views::absolute_url(&req, &post.absolute_path());
    let data = &form.data;
    let message = compose_share_email(
        &post,
        &post_url,
        &ShareRequest {
            name: &data.name,
            email: &data.email,
            to: &data.to,
            comments: &data.comments,
        },
        Some(state.default_from.clone()),
    );

    state.mailer.send(message).await?;
    tracing::info!(
        post_id = %post.id,
        to = %mask_email(&data.to),
        "Post shared by email"
    );

    let message = format!("\"{}\" was successfully sent to {}.", post.title, data.to);
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        ShareView {
            post: views::post_link(&post),
            form,
            sent: true,
        },
        message,
    )))
}
