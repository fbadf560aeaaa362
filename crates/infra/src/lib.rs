//! Infrastructure layer: post storage engines and configuration.

pub mod config;
pub mod post_store;

pub use config::{AppConfig, ConfigError, StoreKind};
pub use post_store::{InMemoryPostStore, PostStore, SqlitePostStore, StoreError};
