//! SQLite-backed post store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | `ErrorKind` | StoreError |
//! |------------|-------------|------------|
//! | Database | UniqueViolation / NotNullViolation / CheckViolation / ForeignKeyViolation | `Constraint` |
//! | Database | Other | `Backend` |
//! | PoolClosed, Io, Configuration, ... | N/A | `Backend` |
//!
//! ## Resource Scoping
//!
//! Every operation acquires a pooled connection for one statement and returns
//! it when the future completes, on success and on error alike. Statements
//! auto-commit, so each operation is atomic on its own.

use std::str::FromStr;
use std::time::Duration;

use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row};
use tracing::instrument;

use posts_core::{Post, PostDraft, PostId};

use super::r#trait::{PostStore, StoreError};

/// `AUTOINCREMENT` keeps SQLite from handing out the id of a deleted max row.
const CREATE_POSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    title   VARCHAR(100) NOT NULL,
    content VARCHAR(500) NOT NULL
)
"#;

/// SQLite post store over a `sqlx` connection pool.
///
/// `Clone` is cheap: the pool is reference-counted internally.
#[derive(Debug, Clone)]
pub struct SqlitePostStore {
    pool: SqlitePool,
}

impl SqlitePostStore {
    /// Wrap an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`, creating the database file if missing.
    ///
    /// In-memory URLs (`sqlite::memory:`) get a single long-lived connection,
    /// since every SQLite in-memory connection is a separate database.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| map_sqlx_error("parse_database_url", e))?
            .create_if_missing(true);

        let pool_options = if is_memory_url(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        tracing::info!(database_url, "connected to sqlite");
        Ok(Self::new(pool))
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[async_trait::async_trait]
impl PostStore for SqlitePostStore {
    #[instrument(skip(self))]
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_POSTS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let result = sqlx::query("INSERT INTO posts (title, content) VALUES (?1, ?2)")
            .bind(draft.title())
            .bind(draft.content())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create_post", e))?;

        let id = PostId::new(result.last_insert_rowid());
        Ok(Post::new(id, draft))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let rows: Vec<PostRow> = sqlx::query_as("SELECT id, title, content FROM posts ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_posts", e))?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self), fields(post_id = %id))]
    async fn get(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        let row: Option<PostRow> = sqlx::query_as("SELECT id, title, content FROM posts WHERE id = ?1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_post", e))?;

        Ok(row.map(Post::from))
    }

    #[instrument(skip(self, draft), fields(post_id = %id))]
    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Option<Post>, StoreError> {
        let result = sqlx::query("UPDATE posts SET title = ?1, content = ?2 WHERE id = ?3")
            .bind(draft.title())
            .bind(draft.content())
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update_post", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Post::new(id, draft)))
    }

    #[instrument(skip(self), fields(post_id = %id))]
    async fn delete(&self, id: PostId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_post", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => StoreError::Constraint(msg),
                _ => StoreError::Backend(msg),
            }
        }
        other => StoreError::Backend(format!("{} failed: {}", operation, other)),
    }
}

#[derive(Debug)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
}

impl<'r> FromRow<'r, SqliteRow> for PostRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(PostRow {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
        })
    }
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post::from_storage(PostId::new(row.id), row.title, row.content)
    }
}
