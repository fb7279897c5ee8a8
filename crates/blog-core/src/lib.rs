//! # Blog Core
//!
//! The domain layer of the blog.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, repository and mailer ports, pagination, trigram similarity and
//! share-mail composition.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod share;
pub mod similarity;

pub use error::DomainError;
