//! Post lifecycle: validation, soft deletion and timestamp bookkeeping.

use std::sync::Arc;

use crate::domain::{Post, PostDraft, PostId, timestamp_now};
use crate::error::DomainError;
use crate::ports::PostStore;

/// Application service for posts.
///
/// Stateless apart from the injected store; every check runs before the
/// single write an operation performs.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

fn ensure_positive(id: PostId) -> Result<(), DomainError> {
    if id > 0 {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "Post Id must be positive, got {id}."
        )))
    }
}

fn ensure_present(draft: Option<PostDraft>) -> Result<PostDraft, DomainError> {
    draft.ok_or_else(|| DomainError::validation("Post must not be null."))
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Create a post. A caller-supplied id is honored only if it is free.
    pub async fn create(&self, draft: Option<PostDraft>) -> Result<Post, DomainError> {
        let draft = ensure_present(draft)?;
        let id = draft.id;

        if id > 0 && self.store.exists_by_id(id).await? {
            return Err(DomainError::AlreadyExists { id });
        }

        let fields = draft.into_fields()?;
        let post = Post::new(fields, timestamp_now()).with_id(id.max(0));

        Ok(self.store.insert(post).await?)
    }

    /// Replace title, content, category and tags of a live post.
    pub async fn update(&self, id: PostId, draft: Option<PostDraft>) -> Result<Post, DomainError> {
        let draft = ensure_present(draft)?;
        ensure_positive(id)?;

        let mut post = self.live_post(id).await?;
        let fields = draft.into_fields()?;
        post.revise(fields, timestamp_now())?;

        Ok(self.store.update(post).await?)
    }

    /// Soft-delete a live post.
    pub async fn delete(&self, id: PostId) -> Result<(), DomainError> {
        ensure_positive(id)?;

        let mut post = self.live_post(id).await?;
        post.soft_delete(timestamp_now())?;
        self.store.update(post).await?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: PostId) -> Result<Post, DomainError> {
        ensure_positive(id)?;
        self.live_post(id).await
    }

    /// All posts that are not soft-deleted, in store order.
    pub async fn get_all(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self.store.list_all().await?;
        Ok(posts.into_iter().filter(|p| !p.is_deleted()).collect())
    }

    /// Live posts whose title, content or a tag contains `term`.
    pub async fn find(&self, term: Option<&str>) -> Result<Vec<Post>, DomainError> {
        let term = match term {
            Some(term) if !term.is_empty() => term,
            _ => return Err(DomainError::MissingTerm),
        };

        let posts = self.store.list_all().await?;
        Ok(posts
            .into_iter()
            .filter(|p| !p.is_deleted() && p.matches(term))
            .collect())
    }

    /// Fetch a post that exists and is not soft-deleted.
    async fn live_post(&self, id: PostId) -> Result<Post, DomainError> {
        let post = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { id })?;

        if post.is_deleted() {
            return Err(DomainError::Conflict { id });
        }

        Ok(post)
    }
}
