use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Tag;
use crate::error::DomainError;

pub const TITLE_MAX_LENGTH: usize = 250;
pub const SLUG_MAX_LENGTH: usize = 250;

/// Publication state of a post. Only `Published` posts are publicly visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

/// Post entity - a blog post with its tag set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: PostStatus,
    /// Loaded separately from the `post_tags` join table; empty when not hydrated.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Post {
    /// Create a new draft post. The slug is derived from the title.
    pub fn new(author_id: Uuid, title: impl Into<String>, body: impl Into<String>) -> Self {
        let title = title.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            slug: slug::slugify(&title),
            title,
            body: body.into(),
            publish: now,
            created_at: now,
            updated_at: now,
            status: PostStatus::Draft,
            tags: Vec::new(),
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Mark the post as published at the given instant.
    pub fn published_at(mut self, publish: DateTime<Utc>) -> Self {
        self.publish = publish;
        self.status = PostStatus::Published;
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Calendar date (UTC) the slug is unique for.
    pub fn publish_date(&self) -> NaiveDate {
        self.publish.date_naive()
    }

    /// Canonical path of the detail page, e.g. `/blog/2024/3/7/hello-world/`.
    pub fn absolute_path(&self) -> String {
        let date = self.publish_date();
        format!(
            "/blog/{}/{}/{}/{}/",
            date.year(),
            date.month(),
            date.day(),
            self.slug
        )
    }

    /// Number of tags this post has in common with `other`.
    pub fn shared_tag_count(&self, other: &Post) -> usize {
        self.tags
            .iter()
            .filter(|tag| other.tags.iter().any(|t| t.id == tag.id))
            .count()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("Title cannot be empty".to_string()));
        }
        if self.title.chars().count() > TITLE_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "Title exceeds {} characters",
                TITLE_MAX_LENGTH
            )));
        }
        if !is_valid_slug(&self.slug) {
            return Err(DomainError::Validation(format!(
                "Invalid slug: {:?}",
                self.slug
            )));
        }
        Ok(())
    }
}

/// Slugs are non-empty, at most 250 chars of `[a-z0-9-]`.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > SLUG_MAX_LENGTH {
        return false;
    }
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// The `(year, month, day)` part of a detail URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PublishDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl PublishDate {
    /// Resolve to a calendar date, `None` for impossible dates such as 2023/2/30.
    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Half-open UTC range `[start, end)` covering the whole day.
    pub fn utc_range(self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let date = self.to_date()?;
        let start = date.and_hms_opt(0, 0, 0)?.and_utc();
        let end = date
            .checked_add_days(Days::new(1))?
            .and_hms_opt(0, 0, 0)?
            .and_utc();
        Some((start, end))
    }
}
