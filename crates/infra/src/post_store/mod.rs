//! Post storage boundary.
//!
//! The handler layer only sees `PostStore`; the concrete engine (in-memory or
//! SQLite) is chosen once at startup.

pub mod in_memory;
pub mod sqlite;
pub mod r#trait;

pub use in_memory::InMemoryPostStore;
pub use r#trait::{PostStore, StoreError};
pub use sqlite::SqlitePostStore;
