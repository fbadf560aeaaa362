use serde::Deserialize;
use serde_json::Value as JsonValue;

use posts_core::{Post, PostDraft};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /posts` and `PUT /posts/{id}`.
///
/// Both fields are required strings; anything else is rejected by the
/// extractor before a handler runs.
#[derive(Debug, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
}

impl PostPayload {
    pub fn into_draft(self) -> PostDraft {
        PostDraft::new(self.title, self.content)
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn post_to_json(post: &Post) -> JsonValue {
    post.to_json()
}

pub fn posts_to_json(posts: &[Post]) -> JsonValue {
    JsonValue::Array(posts.iter().map(post_to_json).collect())
}

pub fn message(text: &str) -> JsonValue {
    serde_json::json!({ "message": text })
}
