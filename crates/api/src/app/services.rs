//! Storage wiring for the HTTP layer.

use std::sync::Arc;

use posts_core::{Post, PostDraft, PostId};
use posts_infra::{AppConfig, InMemoryPostStore, PostStore, SqlitePostStore, StoreError, StoreKind};

/// Handle shared by all handlers.
///
/// Built once at startup; the store it wraps is closed by `shutdown()`.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn PostStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPostStore::new()))
    }

    pub async fn create_post(&self, draft: PostDraft) -> Result<Post, StoreError> {
        self.store.create(draft).await
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        self.store.list().await
    }

    pub async fn get_post(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        self.store.get(id).await
    }

    pub async fn update_post(&self, id: PostId, draft: PostDraft) -> Result<Option<Post>, StoreError> {
        self.store.update(id, draft).await
    }

    pub async fn delete_post(&self, id: PostId) -> Result<bool, StoreError> {
        self.store.delete(id).await
    }

    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}

/// Open the configured store and ensure its schema exists.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    let store: Arc<dyn PostStore> = match &config.store {
        StoreKind::InMemory => {
            tracing::warn!("USE_PERSISTENT_STORES=false; posts are kept in memory only");
            Arc::new(InMemoryPostStore::new())
        }
        StoreKind::Sqlite { database_url } => Arc::new(SqlitePostStore::connect(database_url).await?),
    };

    store.ensure_schema().await?;
    tracing::info!("post storage ready");

    Ok(AppServices::new(store))
}
