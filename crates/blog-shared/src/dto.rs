//! View models - what each page of the blog renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::forms::{BoundForm, CommentForm, EmailPostForm, SearchForm};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagView {
    pub name: String,
    pub slug: String,
}

/// A post as shown in listings: markdown excerpt instead of the full body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub url: String,
    pub author_id: Uuid,
    pub publish: DateTime<Utc>,
    pub excerpt_html: String,
    pub tags: Vec<TagView>,
}

/// A post with its full rendered body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub url: String,
    pub author_id: Uuid,
    pub publish: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub body_html: String,
    pub tags: Vec<TagView>,
}

/// Title + link, used by the sidebar and similar posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostLink {
    pub title: String,
    pub url: String,
    pub publish: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: Uuid,
    pub name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<u64>,
    pub next_page_number: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentedPostLink {
    #[serde(flatten)]
    pub post: PostLink,
    pub total_comments: u64,
}

/// Blog-wide widgets shown next to listings and detail pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarView {
    pub total_posts: u64,
    pub latest_posts: Vec<PostLink>,
    pub most_commented: Vec<CommentedPostLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostListView {
    pub posts: Vec<PostSummary>,
    pub page: PageView,
    pub tag: Option<TagView>,
    pub sidebar: SidebarView,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetailView {
    pub post: PostView,
    pub comments: Vec<CommentView>,
    pub form: BoundForm<CommentForm>,
    pub similar_posts: Vec<PostLink>,
    pub sidebar: SidebarView,
}

/// Outcome of a comment submission: the new comment, or the form with errors.
#[derive(Debug, Clone, Serialize)]
pub struct CommentResultView {
    pub post: PostLink,
    pub form: BoundForm<CommentForm>,
    pub comment: Option<CommentView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareView {
    pub post: PostLink,
    pub form: BoundForm<EmailPostForm>,
    pub sent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub post: PostLink,
    pub similarity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchView {
    pub form: BoundForm<SearchForm>,
    pub query: Option<String>,
    pub results: Vec<SearchResult>,
}
