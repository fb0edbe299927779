use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

use crate::error::DomainError;

/// Store-assigned post identifier. `0` means "not assigned yet".
pub type PostId = i32;

pub const MAX_TITLE_CHARS: usize = 255;
pub const MAX_CATEGORY_CHARS: usize = 100;

/// Current wall-clock time at the precision the stores persist (microseconds).
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next value for a timestamp that must move strictly forward.
fn advance(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// Unvalidated post data, shaped like a request payload.
///
/// Tags stay `Option` here because the wire format can carry `null` elements;
/// [`PostDraft::into_fields`] is where they are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<Option<String>>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: PostId) -> Self {
        self.id = id;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(|t| Some(t.into())).collect();
        self
    }

    /// Validate the draft and strip it down to the content fields of a post.
    ///
    /// Checks run in a fixed order: title, content, tags, then lengths.
    pub fn into_fields(self) -> Result<PostFields, DomainError> {
        if self.title.is_empty() {
            return Err(DomainError::validation("Post must have a title."));
        }
        if self.content.is_empty() {
            return Err(DomainError::validation("Post must have a content."));
        }

        let mut tags = Vec::with_capacity(self.tags.len());
        for (index, tag) in self.tags.into_iter().enumerate() {
            tags.push(tag.ok_or(DomainError::NullTag { index })?);
        }

        if self.title.chars().count() > MAX_TITLE_CHARS {
            return Err(DomainError::validation(format!(
                "Post title must be at most {MAX_TITLE_CHARS} characters."
            )));
        }
        if let Some(category) = &self.category {
            if category.chars().count() > MAX_CATEGORY_CHARS {
                return Err(DomainError::validation(format!(
                    "Post category must be at most {MAX_CATEGORY_CHARS} characters."
                )));
            }
        }

        Ok(PostFields {
            title: self.title,
            content: self.content,
            category: self.category,
            tags,
        })
    }
}

/// Validated post content. Only obtainable through [`PostDraft::into_fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    title: String,
    content: String,
    category: Option<String>,
    tags: Vec<String>,
}

impl PostFields {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Post entity - a blog article with its lifecycle timestamps.
///
/// Deletion state is private: it can be set through [`Post::soft_delete`]
/// but never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    is_deleted: bool,
}

impl Post {
    /// Create a new, not yet stored post.
    pub fn new(fields: PostFields, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            title: fields.title,
            content: fields.content,
            category: fields.category,
            tags: fields.tags,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            is_deleted: false,
        }
    }

    pub fn with_id(mut self, id: PostId) -> Self {
        self.id = id;
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Replace the content fields. `id` and `created_at` are kept.
    pub fn revise(&mut self, fields: PostFields, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.is_deleted {
            return Err(DomainError::Conflict { id: self.id });
        }

        self.title = fields.title;
        self.content = fields.content;
        self.category = fields.category;
        self.tags = fields.tags;
        self.updated_at = advance(self.updated_at, now);
        Ok(())
    }

    /// Mark the post as logically removed. A second call is a conflict.
    pub fn soft_delete(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.is_deleted {
            return Err(DomainError::Conflict { id: self.id });
        }

        let at = advance(self.updated_at, now);
        self.updated_at = at;
        self.deleted_at = Some(at);
        self.is_deleted = true;
        Ok(())
    }

    /// Case-sensitive substring match against title, content or any tag.
    pub fn matches(&self, term: &str) -> bool {
        self.title.contains(term)
            || self.content.contains(term)
            || self.tags.iter().any(|tag| tag.contains(term))
    }
}

/// A post exactly as persisted, used by stores to rebuild [`Post`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        // Rows flagged deleted without a timestamp count as deleted at their last update.
        let deleted_at = if record.is_deleted {
            Some(record.deleted_at.unwrap_or(record.updated_at))
        } else {
            None
        };

        Self {
            id: record.id,
            title: record.title,
            content: record.content,
            category: record.category,
            tags: record.tags,
            created_at: record.created_at,
            updated_at: record.updated_at,
            deleted_at,
            is_deleted: record.is_deleted,
        }
    }
}
