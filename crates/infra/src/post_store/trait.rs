use std::sync::Arc;

use thiserror::Error;

use posts_core::{Post, PostDraft, PostId};

/// Storage operation error.
///
/// These are **infrastructure errors**. A missing post is not an error at
/// this layer; lookups report it through `Option`/`bool` return values.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The datastore rejected the write (NOT NULL, UNIQUE, CHECK, ...).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The datastore is unreachable or failed for another reason.
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// An in-process lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Durable keyed record storage for posts with auto-incrementing ids.
///
/// Each method is one storage statement; there are no multi-row
/// transactions. Ids are assigned by the store and never reused.
#[async_trait::async_trait]
pub trait PostStore: Send + Sync {
    /// Create the posts table if it does not exist. Idempotent.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Insert a new post with a freshly assigned id.
    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError>;

    /// All posts, ascending by id.
    async fn list(&self) -> Result<Vec<Post>, StoreError>;

    async fn get(&self, id: PostId) -> Result<Option<Post>, StoreError>;

    /// Overwrite title/content of an existing post.
    ///
    /// Returns `None` (and writes nothing) when `id` is unknown.
    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Option<Post>, StoreError>;

    /// Permanently remove a post. Returns `false` when `id` is unknown.
    async fn delete(&self, id: PostId) -> Result<bool, StoreError>;

    /// Release underlying resources (connection pool). Called once on shutdown.
    async fn close(&self) {}
}

#[async_trait::async_trait]
impl<S> PostStore for Arc<S>
where
    S: PostStore + ?Sized,
{
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        (**self).ensure_schema().await
    }

    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        (**self).create(draft).await
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        (**self).list().await
    }

    async fn get(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        (**self).get(id).await
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Option<Post>, StoreError> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: PostId) -> Result<bool, StoreError> {
        (**self).delete(id).await
    }

    async fn close(&self) {
        (**self).close().await
    }
}
