//! # Blog Shared
//!
//! Wire types shared by the server and any client: view models, forms with
//! their validation rules, and the response envelopes.

pub mod dto;
pub mod forms;
pub mod response;

pub use forms::{BoundForm, CommentForm, EmailPostForm, FieldErrors, Form, SearchForm};
pub use response::{ApiResponse, ErrorResponse};
