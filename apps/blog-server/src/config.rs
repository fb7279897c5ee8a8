//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use blog_infra::database::DatabaseConfig;

/// Which transport delivers outgoing mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBackend {
    /// Log messages instead of sending them.
    Console,
    /// POST messages to an HTTP relay.
    Http { url: String, token: Option<String> },
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub backend: MailBackend,
    pub default_from: String,
}

/// Site-wide text used by feeds and outgoing mail.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My blog".to_string(),
            description: "New posts of my blog".to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub mail: MailConfig,
    pub site: SiteConfig,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env_parse("DB_MAX_CONNECTIONS", 20),
            min_connections: env_parse("DB_MIN_CONNECTIONS", 2),
            connect_timeout: Duration::from_secs(env_parse("DB_CONNECT_TIMEOUT_SECS", 8)),
        });

        let site = SiteConfig::default();

        Self {
            host: env_or("HOST", "127.0.0.1"),
            port: env_parse("PORT", 8080),
            database,
            mail: MailConfig::from_env(),
            site: SiteConfig {
                title: env_or("BLOG_TITLE", &site.title),
                description: env_or("BLOG_DESCRIPTION", &site.description),
            },
        }
    }
}

impl MailConfig {
    fn from_env() -> Self {
        let backend = match env::var("MAIL_BACKEND").as_deref() {
            Ok("http") => match env::var("MAIL_RELAY_URL") {
                Ok(url) => MailBackend::Http {
                    url,
                    token: env::var("MAIL_RELAY_TOKEN").ok(),
                },
                Err(_) => {
                    tracing::warn!("MAIL_BACKEND=http without MAIL_RELAY_URL, using console");
                    MailBackend::Console
                }
            },
            _ => MailBackend::Console,
        };

        Self {
            backend,
            default_from: env_or("DEFAULT_FROM_EMAIL", "webmaster@localhost"),
        }
    }
}
