//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use blog_core::domain::{Comment, Post, PublishDate, Tag};
use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, PostRepository, SearchHit, TagRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::postgres_base::{PostgresBaseRepository, repo_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// Similarity score computed by `pg_trgm`, cast so it decodes as `f64`.
const TITLE_SIMILARITY_SQL: &str = r#"CAST(similarity("posts"."title", ?) AS DOUBLE PRECISION)"#;

#[derive(Debug, FromQueryResult)]
struct ScoredPostRow {
    #[sea_orm(nested)]
    post: post::Model,
    similarity: f64,
}

#[derive(Debug, FromQueryResult)]
struct CommentedPostRow {
    #[sea_orm(nested)]
    post: post::Model,
    total_comments: i64,
}

impl PostgresPostRepository {
    /// The "published" manager: every public query starts here.
    fn published() -> Select<PostEntity> {
        PostEntity::find().filter(post::Column::Status.eq(post::Status::Published))
    }

    fn published_with_tag(tag_id: Option<Uuid>) -> Select<PostEntity> {
        let select = Self::published();
        match tag_id {
            Some(tag_id) => select.filter(
                post::Column::Id.in_subquery(
                    Query::select()
                        .column(post_tag::Column::PostId)
                        .from(PostTagEntity)
                        .and_where(post_tag::Column::TagId.eq(tag_id))
                        .to_owned(),
                ),
            ),
            None => select,
        }
    }

    /// Attach tags to `models` with a single query, preserving order.
    async fn with_tags(&self, models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let rows = PostTagEntity::find()
            .filter(post_tag::Column::PostId.is_in(ids))
            .find_also_related(TagEntity)
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        let mut by_post: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for (link, tag) in rows {
            if let Some(tag) = tag {
                by_post.entry(link.post_id).or_default().push(tag.into());
            }
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let tags = by_post.remove(&model.id).unwrap_or_default();
                Post::from(model).with_tags(tags)
            })
            .collect())
    }

    async fn first_with_tags(&self, model: Option<post::Model>) -> Result<Option<Post>, RepoError> {
        match model {
            Some(model) => Ok(self.with_tags(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn count_published(&self, tag_id: Option<Uuid>) -> Result<u64, RepoError> {
        Self::published_with_tag(tag_id)
            .count(&self.db)
            .await
            .map_err(repo_err)
    }

    async fn find_published(
        &self,
        tag_id: Option<Uuid>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let models = Self::published_with_tag(tag_id)
            .order_by_desc(post::Column::Publish)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        self.with_tags(models).await
    }

    async fn all_published(&self) -> Result<Vec<Post>, RepoError> {
        let models = Self::published()
            .order_by_desc(post::Column::Publish)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        self.with_tags(models).await
    }

    async fn find_published_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let model = Self::published()
            .filter(post::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        self.first_with_tags(model).await
    }

    async fn find_published_by_date(
        &self,
        date: PublishDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let Some((start, end)) = date.utc_range() else {
            return Ok(None);
        };

        let model = Self::published()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Publish.gte(start))
            .filter(post::Column::Publish.lt(end))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        self.first_with_tags(model).await
    }

    async fn find_similar(&self, source: &Post, limit: u64) -> Result<Vec<Post>, RepoError> {
        if source.tags.is_empty() {
            return Ok(Vec::new());
        }

        let tag_ids: Vec<Uuid> = source.tags.iter().map(|t| t.id).collect();
        let shared_tags = Expr::col((PostTagEntity, post_tag::Column::TagId)).count();

        let models = Self::published()
            .join(JoinType::InnerJoin, post::Relation::PostTag.def())
            .filter(post_tag::Column::TagId.is_in(tag_ids))
            .filter(post::Column::Id.ne(source.id))
            .group_by(post::Column::Id)
            .order_by_desc(shared_tags)
            .order_by_desc(post::Column::Publish)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        tracing::debug!(post_id = %source.id, found = models.len(), "Similar posts loaded");
        self.with_tags(models).await
    }

    async fn search_by_title(
        &self,
        query: &str,
        threshold: f64,
    ) -> Result<Vec<SearchHit>, RepoError> {
        let score = Expr::cust_with_values(TITLE_SIMILARITY_SQL, [query.to_string()]);

        let rows = Self::published()
            .column_as(score.clone(), "similarity")
            .filter(Expr::expr(score.clone()).gt(threshold))
            .order_by_desc(score)
            .order_by_desc(post::Column::Publish)
            .into_model::<ScoredPostRow>()
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        let scores: Vec<f64> = rows.iter().map(|r| r.similarity).collect();
        let posts = self
            .with_tags(rows.into_iter().map(|r| r.post).collect())
            .await?;

        Ok(posts
            .into_iter()
            .zip(scores)
            .map(|(post, similarity)| SearchHit { post, similarity })
            .collect())
    }

    async fn most_commented(&self, limit: u64) -> Result<Vec<(Post, u64)>, RepoError> {
        let total_comments = Expr::col((CommentEntity, comment::Column::Id)).count();

        let rows = Self::published()
            .column_as(total_comments.clone(), "total_comments")
            .join(JoinType::LeftJoin, post::Relation::Comment.def())
            .group_by(post::Column::Id)
            .order_by_desc(total_comments)
            .order_by_desc(post::Column::Publish)
            .limit(limit)
            .into_model::<CommentedPostRow>()
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        let counts: Vec<u64> = rows
            .iter()
            .map(|r| u64::try_from(r.total_comments).unwrap_or(0))
            .collect();
        let posts = self
            .with_tags(rows.into_iter().map(|r| r.post).collect())
            .await?;

        Ok(posts.into_iter().zip(counts).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_active_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::Active.eq(true))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }
}
