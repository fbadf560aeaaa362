//! `posts-core` — the post persistence model.
//!
//! This crate contains **pure domain** types (no storage or HTTP concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod post;

pub use entity::Entity;
pub use error::DomainError;
pub use id::PostId;
pub use post::{CONTENT_MAX_CHARS, Post, PostDraft, TITLE_MAX_CHARS};
