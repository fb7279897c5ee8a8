use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post, PublishDate, Tag};
use crate::error::RepoError;

/// Generic repository trait for entities addressed by a primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity and return the stored version.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// A post matched by a title search, with its trigram similarity score.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub post: Post,
    pub similarity: f64,
}

/// Post repository. Every `*_published` query filters on `PostStatus::Published`
/// and returns posts with their tags loaded.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Count published posts, optionally restricted to a tag.
    async fn count_published(&self, tag_id: Option<Uuid>) -> Result<u64, RepoError>;

    /// A window of published posts, newest first.
    async fn find_published(
        &self,
        tag_id: Option<Uuid>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// Every published post, newest first.
    async fn all_published(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_published_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Find the published post with `slug` whose publish date falls on `date`.
    async fn find_published_by_date(
        &self,
        date: PublishDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError>;

    /// Published posts sharing at least one tag with `post`, excluding `post`,
    /// ranked by shared-tag count then publish time (both descending).
    async fn find_similar(&self, post: &Post, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Published posts whose title similarity to `query` is above `threshold`,
    /// best match first.
    async fn search_by_title(
        &self,
        query: &str,
        threshold: f64,
    ) -> Result<Vec<SearchHit>, RepoError>;

    /// Published posts with the most comments, paired with the comment count.
    async fn most_commented(&self, limit: u64) -> Result<Vec<(Post, u64)>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Active comments of a post, oldest first.
    async fn find_active_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Tag lookups.
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;
}
