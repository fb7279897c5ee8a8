//! In-memory blog store - used when no database is configured, and in tests.
//!
//! Implements every repository port over plain vectors behind an async
//! `RwLock`, applying the same filters and orderings as the SQL queries.
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Comment, Post, PublishDate, Tag};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CommentRepository, PostRepository, SearchHit, TagRepository,
};
use blog_core::similarity;

#[derive(Default)]
struct StoreData {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    tags: Vec<Tag>,
}

impl StoreData {
    /// Published posts, newest first.
    fn published(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().filter(|p| p.is_published()).collect();
        posts.sort_by(|a, b| b.publish.cmp(&a.publish));
        posts
    }

    fn has_tag(post: &Post, tag_id: Option<Uuid>) -> bool {
        tag_id.is_none_or(|id| post.tags.iter().any(|t| t.id == id))
    }
}

/// In-memory implementation of the post, comment and tag repositories.
#[derive(Default)]
pub struct InMemoryBlogStore {
    data: RwLock<StoreData>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a post, enforcing slug uniqueness per publish date.
    pub async fn insert_post(&self, post: Post) -> Result<Post, RepoError> {
        post.validate()?;

        let mut data = self.data.write().await;
        let clash = data.posts.iter().any(|p| {
            p.id == post.id
                || (p.slug == post.slug && p.publish_date() == post.publish_date())
        });
        if clash {
            return Err(RepoError::Constraint(format!(
                "Post with slug {:?} already exists for {}",
                post.slug,
                post.publish_date()
            )));
        }

        for tag in &post.tags {
            if !data.tags.iter().any(|t| t.id == tag.id) {
                data.tags.push(tag.clone());
            }
        }
        data.posts.push(post.clone());
        Ok(post)
    }

    pub async fn insert_comment(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut data = self.data.write().await;
        if !data.posts.iter().any(|p| p.id == comment.post_id) {
            return Err(RepoError::Constraint(format!(
                "Post {} does not exist",
                comment.post_id
            )));
        }
        data.comments.push(comment.clone());
        Ok(comment)
    }

    /// Active comments of `post_id`, used by tests to observe comment creation.
    pub async fn active_comment_count(&self, post_id: Uuid) -> usize {
        let data = self.data.read().await;
        data.comments
            .iter()
            .filter(|c| c.post_id == post_id && c.active)
            .count()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let data = self.data.read().await;
        Ok(data.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        self.insert_post(entity).await
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn count_published(&self, tag_id: Option<Uuid>) -> Result<u64, RepoError> {
        let data = self.data.read().await;
        let count = data
            .published()
            .into_iter()
            .filter(|p| StoreData::has_tag(p, tag_id))
            .count();
        Ok(count as u64)
    }

    async fn find_published(
        &self,
        tag_id: Option<Uuid>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let data = self.data.read().await;
        Ok(data
            .published()
            .into_iter()
            .filter(|p| StoreData::has_tag(p, tag_id))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn all_published(&self) -> Result<Vec<Post>, RepoError> {
        let data = self.data.read().await;
        Ok(data.published().into_iter().cloned().collect())
    }

    async fn find_published_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let data = self.data.read().await;
        Ok(data
            .posts
            .iter()
            .find(|p| p.id == id && p.is_published())
            .cloned())
    }

    async fn find_published_by_date(
        &self,
        date: PublishDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let Some(day) = date.to_date() else {
            return Ok(None);
        };

        let data = self.data.read().await;
        Ok(data
            .posts
            .iter()
            .find(|p| p.is_published() && p.slug == slug && p.publish_date() == day)
            .cloned())
    }

    async fn find_similar(&self, source: &Post, limit: u64) -> Result<Vec<Post>, RepoError> {
        let data = self.data.read().await;
        Ok(similarity::rank_similar(
            source,
            data.posts.iter().cloned(),
            limit,
        ))
    }

    async fn search_by_title(
        &self,
        query: &str,
        threshold: f64,
    ) -> Result<Vec<SearchHit>, RepoError> {
        let data = self.data.read().await;
        let mut hits: Vec<SearchHit> = data
            .published()
            .into_iter()
            .map(|post| SearchHit {
                similarity: similarity::similarity(&post.title, query),
                post: post.clone(),
            })
            .filter(|hit| hit.similarity > threshold)
            .collect();

        // `published()` is already newest-first and the sort is stable.
        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        Ok(hits)
    }

    async fn most_commented(&self, limit: u64) -> Result<Vec<(Post, u64)>, RepoError> {
        let data = self.data.read().await;

        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for comment in &data.comments {
            *counts.entry(comment.post_id).or_default() += 1;
        }

        let mut ranked: Vec<(Post, u64)> = data
            .published()
            .into_iter()
            .map(|p| (p.clone(), counts.get(&p.id).copied().unwrap_or(0)))
            .collect();
        ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
        ranked.truncate(limit as usize);
        Ok(ranked)
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryBlogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let data = self.data.read().await;
        Ok(data.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, entity: Comment) -> Result<Comment, RepoError> {
        self.insert_comment(entity).await
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn find_active_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let data = self.data.read().await;
        let mut comments: Vec<Comment> = data
            .comments
            .iter()
            .filter(|c| c.post_id == post_id && c.active)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }
}

#[async_trait]
impl TagRepository for InMemoryBlogStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let data = self.data.read().await;
        Ok(data.tags.iter().find(|t| t.slug == slug).cloned())
    }
}
