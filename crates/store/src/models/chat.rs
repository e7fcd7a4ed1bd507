//! Chat-message documents.

use serde::{Deserialize, Serialize};
use steeple_core::types::{DocId, UserId};

/// A document from the `chat_messages` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub conversation_id: DocId,
    pub sender_id: UserId,
    #[serde(default)]
    pub sender_name: String,
    /// Absent for image-only messages.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}
