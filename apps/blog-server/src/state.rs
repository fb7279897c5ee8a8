//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use blog_core::ports::{CommentRepository, Mailer, PostRepository, TagRepository};
use blog_infra::database::{DatabaseConnections, InMemoryBlogStore};
use blog_infra::mail::{ConsoleMailer, HttpMailer, HttpMailerConfig};

#[cfg(feature = "postgres")]
use blog_infra::database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
};

use crate::config::{AppConfig, MailBackend, MailConfig, SiteConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub db: Option<Arc<DatabaseConnections>>,
    pub site: SiteConfig,
    /// Sender used for outgoing mail.
    pub default_from: String,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let mailer = build_mailer(&config.mail);

        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        tracing::info!("Application state initialized (postgres)");
                        return Self {
                            posts: Arc::new(PostgresPostRepository::new(conn.main.clone())),
                            comments: Arc::new(PostgresCommentRepository::new(conn.main.clone())),
                            tags: Arc::new(PostgresTagRepository::new(conn.main.clone())),
                            mailer,
                            db: Some(conn),
                            site: config.site.clone(),
                            default_from: config.mail.default_from.clone(),
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory store");

        let state = Self::in_memory(
            Arc::new(InMemoryBlogStore::new()),
            mailer,
            config.site.clone(),
            config.mail.default_from.clone(),
        );
        tracing::info!("Application state initialized (in-memory)");
        state
    }

    /// State backed entirely by an in-memory store.
    pub fn in_memory(
        store: Arc<InMemoryBlogStore>,
        mailer: Arc<dyn Mailer>,
        site: SiteConfig,
        default_from: String,
    ) -> Self {
        Self {
            posts: store.clone(),
            comments: store.clone(),
            tags: store,
            mailer,
            db: None,
            site,
            default_from,
        }
    }
}

fn build_mailer(config: &MailConfig) -> Arc<dyn Mailer> {
    match &config.backend {
        MailBackend::Console => Arc::new(ConsoleMailer::new(config.default_from.clone())),
        MailBackend::Http { url, token } => {
            let relay = HttpMailer::new(HttpMailerConfig {
                url: url.clone(),
                token: token.clone(),
                default_from: config.default_from.clone(),
                timeout: Duration::from_secs(10),
            });
            match relay {
                Ok(mailer) => Arc::new(mailer),
                Err(e) => {
                    tracing::error!("Failed to build mail relay client: {}. Using console.", e);
                    Arc::new(ConsoleMailer::new(config.default_from.clone()))
                }
            }
        }
    }
}
