//! The `Post` record and its create/update input.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::entity::Entity;
use crate::id::PostId;

/// Declared width of the `title` column, in characters.
///
/// Documented storage width only; SQLite does not enforce `VARCHAR(n)` and
/// neither does `PostDraft`.
pub const TITLE_MAX_CHARS: usize = 100;

/// Declared width of the `content` column, in characters.
pub const CONTENT_MAX_CHARS: usize = 500;

/// The `(title, content)` pair accepted by create and update.
///
/// Presence is the only rule, and the type already guarantees it. Any
/// string is accepted, including empty ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_parts(self) -> (String, String) {
        (self.title, self.content)
    }
}

/// A persisted post.
///
/// Serializes to `{"id": int, "title": string, "content": string}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
}

impl Post {
    /// Build a post from a storage-assigned id and a draft.
    pub fn new(id: PostId, draft: PostDraft) -> Self {
        let (title, content) = draft.into_parts();
        Self { id, title, content }
    }

    /// Rehydrate a post from trusted storage columns.
    pub fn from_storage(id: PostId, title: String, content: String) -> Self {
        Self { id, title, content }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Overwrite title and content in place; the id never changes.
    pub fn apply(&mut self, draft: PostDraft) {
        let (title, content) = draft.into_parts();
        self.title = title;
        self.content = content;
    }

    /// Transmission mapping `{id, title, content}`.
    pub fn to_json(&self) -> JsonValue {
        serde_json::json!({
            "id": self.id.get(),
            "title": self.title,
            "content": self.content,
        })
    }
}

impl Entity for Post {
    type Id = PostId;

    fn id(&self) -> PostId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_accepts_empty_strings() {
        let draft = PostDraft::new("", "");
        assert_eq!(draft.title(), "");
        assert_eq!(draft.content(), "");
    }

    #[test]
    fn draft_keeps_values_past_the_column_widths() {
        let title = "t".repeat(TITLE_MAX_CHARS + 1);
        let content = "c".repeat(CONTENT_MAX_CHARS * 2);

        let post = Post::new(PostId::new(1), PostDraft::new(title.clone(), content.clone()));

        assert_eq!(post.title(), title);
        assert_eq!(post.content(), content);
    }

    #[test]
    fn apply_keeps_id() {
        let mut post = Post::new(PostId::new(7), PostDraft::new("A", "B"));
        post.apply(PostDraft::new("C", "D"));

        assert_eq!(post.id(), PostId::new(7));
        assert_eq!(post.title(), "C");
        assert_eq!(post.content(), "D");
    }

    #[test]
    fn to_json_matches_serde_shape() {
        let post = Post::new(PostId::new(1), PostDraft::new("A", "B"));
        let expected = serde_json::json!({"id": 1, "title": "A", "content": "B"});

        assert_eq!(post.to_json(), expected);
        assert_eq!(serde_json::to_value(&post).unwrap(), expected);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any title/content pair survives into the post and its JSON verbatim.
            #[test]
            fn drafts_are_kept_verbatim(
                title in "\\PC{0,200}",
                content in "\\PC{0,600}",
            ) {
                let post = Post::new(PostId::new(3), PostDraft::new(title.clone(), content.clone()));
                let json = post.to_json();

                prop_assert_eq!(post.title(), title.as_str());
                prop_assert_eq!(post.content(), content.as_str());
                prop_assert_eq!(json["title"].as_str(), Some(title.as_str()));
                prop_assert_eq!(json["content"].as_str(), Some(content.as_str()));
            }
        }
    }
}
