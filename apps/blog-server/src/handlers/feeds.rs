//! RSS/Atom feeds and the sitemap.

use actix_web::{HttpRequest, HttpResponse, web};

use blog_core::domain::Post;

use super::views;
use crate::markdown::{self, EXCERPT_WORDS};
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::syndication::{
    FEED_SIZE, FeedChannel, FeedItem, SitemapUrl, render_atom, render_rss, render_sitemap,
};

async fn feed_items(req: &HttpRequest, state: &AppState) -> AppResult<Vec<FeedItem>> {
    let posts = state.posts.find_published(None, 0, FEED_SIZE).await?;
    Ok(posts.iter().map(|post| feed_item(req, post)).collect())
}

fn feed_item(req: &HttpRequest, post: &Post) -> FeedItem {
    FeedItem {
        title: post.title.clone(),
        link: views::absolute_url(req, &post.absolute_path()),
        description: markdown::truncate_words_html(&post.body, EXCERPT_WORDS),
        published: post.publish,
        updated: post.updated_at,
    }
}

fn channel(req: &HttpRequest, state: &AppState) -> FeedChannel {
    FeedChannel {
        title: state.site.title.clone(),
        description: state.site.description.clone(),
        link: views::absolute_url(req, "/blog/"),
        self_link: views::absolute_url(req, req.path()),
    }
}

/// GET /blog/feed/
pub async fn rss_feed(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let items = feed_items(&req, &state).await?;
    let xml = render_rss(&channel(&req, &state), &items)?;

    Ok(HttpResponse::Ok()
        .content_type("application/rss+xml; charset=utf-8")
        .body(xml))
}

/// GET /blog/feed/atom/
pub async fn atom_feed(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let items = feed_items(&req, &state).await?;
    let xml = render_atom(&channel(&req, &state), &items)?;

    Ok(HttpResponse::Ok()
        .content_type("application/atom+xml; charset=utf-8")
        .body(xml))
}

/// GET /sitemap.xml
pub async fn sitemap(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let urls: Vec<SitemapUrl> = state
        .posts
        .all_published()
        .await?
        .iter()
        .map(|post| SitemapUrl {
            loc: views::absolute_url(&req, &post.absolute_path()),
            lastmod: post.updated_at,
        })
        .collect();

    let xml = render_sitemap(&urls)?;
    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(xml))
}
