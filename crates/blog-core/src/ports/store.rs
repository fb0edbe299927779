use async_trait::async_trait;

use crate::domain::{Post, PostId};
use crate::error::RepoError;

/// Persistence for posts.
///
/// Stores hold no business rules beyond identifier uniqueness. The two
/// writing operations are atomic primitives so the service never has to rely
/// on a separate check followed by a write.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert-if-absent. A post with `id == 0` gets the next free identifier;
    /// any other id is kept and must not exist yet (`RepoError::Duplicate`).
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Find a post by its identifier, deleted or not.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError>;

    /// Check whether any record, deleted or not, has this identifier.
    async fn exists_by_id(&self, id: PostId) -> Result<bool, RepoError>;

    /// Every stored post in store order (ascending id).
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Overwrite a stored post, but only while the stored row is not
    /// soft-deleted (`RepoError::Stale`). Unknown ids yield `RepoError::Missing`.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;
}
