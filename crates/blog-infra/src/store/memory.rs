//! In-memory post store - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{Post, PostId};
use blog_core::error::RepoError;
use blog_core::ports::PostStore;

struct Inner {
    posts: BTreeMap<PostId, Post>,
    /// `None` once `PostId::MAX` has been handed out.
    next_id: Option<PostId>,
}

/// In-memory post store using a `BTreeMap` behind an async `RwLock`.
///
/// Each operation holds the lock for its whole duration, which makes
/// insert-if-absent and the conditional update atomic.
/// Note: Data is lost on process restart.
pub struct InMemoryPostStore {
    inner: RwLock<Inner>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                posts: BTreeMap::new(),
                next_id: Some(1),
            }),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut inner = self.inner.write().await;

        let id = if post.id > 0 {
            post.id
        } else {
            inner
                .next_id
                .ok_or_else(|| RepoError::Query("post id space exhausted".to_string()))?
        };
        if inner.posts.contains_key(&id) {
            return Err(RepoError::Duplicate(id));
        }
        inner.next_id = match (inner.next_id, id.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };

        let post = post.with_id(id);
        inner.posts.insert(id, post.clone());
        tracing::debug!(post_id = id, "Inserted post");

        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: PostId) -> Result<bool, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.contains_key(&id))
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.values().cloned().collect())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut inner = self.inner.write().await;

        let stored = inner
            .posts
            .get_mut(&post.id)
            .ok_or(RepoError::Missing(post.id))?;
        if stored.is_deleted() {
            return Err(RepoError::Stale(post.id));
        }

        *stored = post.clone();
        tracing::debug!(post_id = post.id, deleted = post.is_deleted(), "Updated post");

        Ok(post)
    }
}
