//! Domain -> view model conversions shared by the page handlers.

use actix_web::HttpRequest;
use blog_core::domain::{Comment, Post, Tag};
use blog_core::pagination::Page;
use blog_shared::dto::{
    CommentView, CommentedPostLink, PageView, PostLink, PostSummary, PostView, SidebarView,
    TagView,
};

use crate::markdown::{self, EXCERPT_WORDS};
use crate::middleware::error::AppResult;
use crate::state::AppState;

const SIDEBAR_POSTS: u64 = 5;

/// `scheme://host/path` as seen by the client.
pub fn absolute_url(req: &HttpRequest, path: &str) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), path)
}

pub fn tag_view(tag: &Tag) -> TagView {
    TagView {
        name: tag.name.clone(),
        slug: tag.slug.clone(),
    }
}

pub fn post_summary(post: &Post) -> PostSummary {
    PostSummary {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        url: post.absolute_path(),
        author_id: post.author_id,
        publish: post.publish,
        excerpt_html: markdown::truncate_words_html(&post.body, EXCERPT_WORDS),
        tags: post.tags.iter().map(tag_view).collect(),
    }
}

pub fn post_view(post: &Post) -> PostView {
    PostView {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        url: post.absolute_path(),
        author_id: post.author_id,
        publish: post.publish,
        updated_at: post.updated_at,
        body: post.body.clone(),
        body_html: markdown::render(&post.body),
        tags: post.tags.iter().map(tag_view).collect(),
    }
}

pub fn post_link(post: &Post) -> PostLink {
    PostLink {
        title: post.title.clone(),
        url: post.absolute_path(),
        publish: post.publish,
    }
}

pub fn comment_view(comment: &Comment) -> CommentView {
    CommentView {
        id: comment.id,
        name: comment.name.clone(),
        body: comment.body.clone(),
        created_at: comment.created_at,
    }
}

pub fn page_view<T>(page: &Page<T>) -> PageView {
    PageView {
        number: page.number,
        num_pages: page.num_pages,
        count: page.count,
        has_previous: page.has_previous(),
        has_next: page.has_next(),
        previous_page_number: page.previous_page_number(),
        next_page_number: page.next_page_number(),
    }
}

/// Total count, latest posts and most commented posts.
pub async fn sidebar(state: &AppState) -> AppResult<SidebarView> {
    let total_posts = state.posts.count_published(None).await?;
    let latest = state.posts.find_published(None, 0, SIDEBAR_POSTS).await?;
    let most_commented = state.posts.most_commented(SIDEBAR_POSTS).await?;

    Ok(SidebarView {
        total_posts,
        latest_posts: latest.iter().map(post_link).collect(),
        most_commented: most_commented
            .iter()
            .map(|(post, total_comments)| CommentedPostLink {
                post: post_link(post),
                total_comments: *total_comments,
            })
            .collect(),
    })
}
