//! Post list and detail pages.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use blog_core::DomainError;
use blog_core::domain::{PublishDate, Tag};
use blog_core::pagination::{POSTS_PER_PAGE, Paginator};
use blog_core::similarity::SIMILAR_POSTS_LIMIT;
use blog_shared::dto::{PostDetailView, PostListView};
use blog_shared::{ApiResponse, BoundForm, CommentForm};

use super::views;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// GET /blog/
pub async fn post_list(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    render_list(&state, None, query.page.as_deref()).await
}

/// GET /blog/tag/{tag_slug}/
pub async fn post_list_by_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let tag_slug = path.into_inner();
    let tag = state
        .tags
        .find_by_slug(&tag_slug)
        .await?
        .ok_or_else(|| DomainError::not_found("tag", &tag_slug))?;

    render_list(&state, Some(tag), query.page.as_deref()).await
}

async fn render_list(
    state: &AppState,
    tag: Option<Tag>,
    raw_page: Option<&str>,
) -> AppResult<HttpResponse> {
    let tag_id = tag.as_ref().map(|t| t.id);
    let paginator = Paginator::new(state.posts.count_published(tag_id).await?, POSTS_PER_PAGE);
    let number = paginator.resolve(raw_page);

    let posts = state
        .posts
        .find_published(tag_id, paginator.offset(number), paginator.per_page())
        .await?;
    let page = paginator.page(number, posts);

    tracing::debug!(
        tag = tag.as_ref().map(|t| t.slug.as_str()),
        page = page.number,
        num_pages = page.num_pages,
        "Post list"
    );

    let view = PostListView {
        page: views::page_view(&page),
        posts: page.items.iter().map(views::post_summary).collect(),
        tag: tag.as_ref().map(views::tag_view),
        sidebar: views::sidebar(state).await?,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(view)))
}

/// GET /blog/{year}/{month}/{day}/{slug}/
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32, u32, String)>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();
    let date = PublishDate { year, month, day };

    let post = state
        .posts
        .find_published_by_date(date, &slug)
        .await?
        .ok_or_else(|| {
            DomainError::not_found("post", format!("{year}/{month}/{day}/{slug}"))
        })?;

    let comments = state.comments.find_active_by_post(post.id).await?;
    let similar = state.posts.find_similar(&post, SIMILAR_POSTS_LIMIT).await?;

    let view = PostDetailView {
        post: views::post_view(&post),
        comments: comments.iter().map(views::comment_view).collect(),
        form: BoundForm::<CommentForm>::unbound(),
        similar_posts: similar.iter().map(views::post_link).collect(),
        sidebar: views::sidebar(&state).await?,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(view)))
}
