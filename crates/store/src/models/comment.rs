//! Comment documents.

use serde::{Deserialize, Serialize};
use steeple_core::types::{DocId, UserId};

/// A document from the `comments` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Id of the post the comment belongs to. Defaults to empty when the
    /// client wrote a malformed document; the handler treats that as a
    /// missing prerequisite and skips the event.
    #[serde(default)]
    pub post_id: DocId,
    pub author_id: UserId,
    #[serde(default = "default_author_name")]
    pub author_name: String,
    #[serde(default)]
    pub content: String,
}

fn default_author_name() -> String {
    "ユーザー".to_string()
}
