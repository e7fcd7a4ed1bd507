//! Post documents.

use serde::{Deserialize, Serialize};
use steeple_core::types::{Timestamp, UserId};

/// Visibility state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Hidden,
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Published
    }
}

/// A document from the `posts` collection, immutable for the engine's
/// purposes except for its moderation [`PostStatus`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub parish_id: Option<String>,
    pub author_id: UserId,
    /// `"official"` or `"normal"`.
    #[serde(default = "default_kind")]
    pub kind: String,
    /// `"notice"`, `"community"`, ...
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub status: PostStatus,
    pub updated_at: Timestamp,
}

fn default_kind() -> String {
    "normal".to_string()
}

fn default_category() -> String {
    "community".to_string()
}

impl Post {
    /// Only official notices fan out to the whole parish.
    pub fn is_official_notice(&self) -> bool {
        self.kind == "official" && self.category == "notice"
    }
}
