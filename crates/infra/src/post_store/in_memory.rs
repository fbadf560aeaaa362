use std::collections::BTreeMap;
use std::sync::RwLock;

use posts_core::{Post, PostDraft, PostId};

use super::r#trait::{PostStore, StoreError};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<PostId, Post>,
    /// Last id handed out; only ever grows so deleted ids are not reused.
    last_id: i64,
}

/// In-memory post store.
///
/// Intended for tests/dev. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    table: RwLock<Table>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PostStore for InMemoryPostStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;

        table.last_id += 1;
        let id = PostId::new(table.last_id);
        let post = Post::new(id, draft);
        table.rows.insert(id, post.clone());

        Ok(post)
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Option<Post>, StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;

        Ok(table.rows.get_mut(&id).map(|post| {
            post.apply(draft);
            post.clone()
        }))
    }

    async fn delete(&self, id: PostId) -> Result<bool, StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        Ok(table.rows.remove(&id).is_some())
    }
}
