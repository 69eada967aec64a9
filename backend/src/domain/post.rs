//! Posts authored by users.

use serde::Deserialize;

use super::UserId;
use super::ids::define_entity_id;

define_entity_id!(
    /// Stable post identifier.
    PostId,
    "post"
);

/// A post written by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
    author_id: UserId,
}

impl Post {
    /// Build a post from its stored fields.
    pub fn new(
        id: PostId,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: UserId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            author_id,
        }
    }

    /// Create a post with a freshly generated identifier.
    #[must_use]
    pub fn from_draft(draft: NewPost) -> Self {
        Self::new(PostId::random(), draft.title, draft.content, draft.author_id)
    }

    #[must_use]
    pub const fn id(&self) -> &PostId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: &PostPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
    }
}

/// Input for `createPost`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
}

/// Input for `changePost`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}
