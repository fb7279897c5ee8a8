//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! SeaORM/PostgreSQL repositories, an in-memory store, and mail transports.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No database, in-memory store only
//! - `postgres` - PostgreSQL repositories via SeaORM

pub mod database;
pub mod mail;

pub use database::{DatabaseConfig, DatabaseConnections, InMemoryBlogStore};
pub use mail::{ConsoleMailer, HttpMailer, HttpMailerConfig, InMemoryMailer};
