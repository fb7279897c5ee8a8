#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::database::entity::{comment, post, post_tag};
    use crate::database::postgres_base::repo_err;
    use crate::database::postgres_repo::{PostgresCommentRepository, PostgresPostRepository};
    use blog_core::domain::{Comment, Post, PostStatus};
    use blog_core::error::RepoError;
    use blog_core::ports::{BaseRepository, PostRepository};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};

    fn post_model(id: uuid::Uuid, title: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            author_id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            slug: title.to_lowercase().replace(' ', "-"),
            body: "Body".to_owned(),
            publish: now.into(),
            created_at: now.into(),
            updated_at: now.into(),
            status: post::Status::Published,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(post_id, "Test Post")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.status, PostStatus::Published);
        assert!(post.tags.is_empty());
    }

    #[tokio::test]
    async fn test_find_published_by_id_loads_tags() {
        let post_id = uuid::Uuid::new_v4();

        // First the post, then its (empty) tag rows.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(post_id, "Tagged")]])
            .append_query_results(vec![Vec::<post_tag::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let post = repo.find_published_by_id(post_id).await.unwrap().unwrap();

        assert_eq!(post.id, post_id);
        assert!(post.tags.is_empty());
    }

    #[tokio::test]
    async fn test_count_published() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(7)),
            )])]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        assert_eq!(repo.count_published(None).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_find_similar_without_tags_skips_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PostgresPostRepository::new(db);

        let source = Post::new(uuid::Uuid::new_v4(), "Lonely", "body");
        assert!(repo.find_similar(&source, 4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_comment() {
        let post_id = uuid::Uuid::new_v4();
        let comment = Comment::new(
            post_id,
            "Ana".to_owned(),
            "ana@example.com".to_owned(),
            "Great read".to_owned(),
        );

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![comment::Model {
                id: comment.id,
                post_id,
                name: comment.name.clone(),
                email: comment.email.clone(),
                body: comment.body.clone(),
                created_at: comment.created_at.into(),
                updated_at: comment.updated_at.into(),
                active: true,
            }]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);
        let saved: Comment = repo.insert(comment.clone()).await.unwrap();

        assert_eq!(saved.id, comment.id);
        assert_eq!(saved.post_id, post_id);
        assert!(saved.active);
    }

    #[test]
    fn test_repo_err_maps_unique_violation() {
        let err = repo_err(DbErr::Custom(
            "duplicate key value violates unique constraint".to_owned(),
        ));
        assert!(matches!(err, RepoError::Constraint(_)));

        let err = repo_err(DbErr::Custom("syntax error".to_owned()));
        assert!(matches!(err, RepoError::Query(_)));
    }
}
