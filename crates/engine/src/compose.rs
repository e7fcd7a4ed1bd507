//! Message composition.
//!
//! One pure composer per event type builds a provider-agnostic
//! [`MessageTemplate`]; the caller stamps a recipient token per delivery.
//! Body truncation limits are explicit per-category constants. Data
//! attributes carry the category tag and the ids the client needs to
//! deep-link, all coerced to strings.

use std::collections::BTreeMap;

use steeple_core::categories::NotificationCategory;
use steeple_store::models::{ChatMessage, Comment, Post};

use crate::push::{MessagePriority, OutboundMessage};

/// Post bodies are previewed at up to 100 characters.
pub const POST_BODY_LIMIT: usize = 100;
/// Comment bodies are previewed at up to 50 characters.
pub const COMMENT_BODY_LIMIT: usize = 50;

const ELLIPSIS: &str = "...";

/// Fallback title for a notice without one.
const DEFAULT_NOTICE_TITLE: &str = "新着お知らせ";
/// Title for comment notifications.
const COMMENT_TITLE: &str = "新しいコメント";
/// Body shown for an image-only chat message.
const PHOTO_PLACEHOLDER: &str = "📷 写真が送信されました";
/// Prefix marking a chat message that carries images alongside text.
const PHOTO_PREFIX: &str = "📷 ";

/// An outbound message minus its recipient token.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    pub title: String,
    pub body: String,
    pub data: BTreeMap<String, String>,
    pub sound: Option<String>,
    pub priority: MessagePriority,
}

impl MessageTemplate {
    fn new(title: String, body: String, priority: MessagePriority) -> Self {
        Self {
            title,
            body,
            data: BTreeMap::new(),
            sound: Some("default".to_string()),
            priority,
        }
    }

    fn with_data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Stamp a recipient token onto the template.
    pub fn for_token(&self, token: impl Into<String>) -> OutboundMessage {
        OutboundMessage {
            token: token.into(),
            title: self.title.clone(),
            body: self.body.clone(),
            data: self.data.clone(),
            sound: self.sound.clone(),
            priority: self.priority,
        }
    }
}

/// Truncate `body` to `limit` characters plus an ellipsis suffix.
///
/// Counts characters rather than bytes so multibyte text never splits a
/// boundary; a body at or under the limit passes through unmodified.
pub fn truncate_body(body: &str, limit: usize) -> String {
    if body.chars().count() > limit {
        let truncated: String = body.chars().take(limit).collect();
        format!("{truncated}{ELLIPSIS}")
    } else {
        body.to_string()
    }
}

/// Compose the fan-out message for an official notice post.
pub fn compose_post_notice(post_id: &str, post: &Post) -> MessageTemplate {
    let title = if post.title.is_empty() {
        DEFAULT_NOTICE_TITLE.to_string()
    } else {
        post.title.clone()
    };
    MessageTemplate::new(
        title,
        truncate_body(&post.body, POST_BODY_LIMIT),
        MessagePriority::Normal,
    )
    .with_data("type", "official_notice")
    .with_data("category", NotificationCategory::Notices.as_str())
    .with_data("postId", post_id)
    .with_data("parishId", post.parish_id.clone().unwrap_or_default())
}

/// Compose the notification for a new comment, addressed to the post author.
pub fn compose_comment(comment_id: &str, comment: &Comment, post_parish_id: &str) -> MessageTemplate {
    let body = format!(
        "{}: {}",
        comment.author_name,
        truncate_body(&comment.content, COMMENT_BODY_LIMIT)
    );
    MessageTemplate::new(COMMENT_TITLE.to_string(), body, MessagePriority::Normal)
        .with_data("type", "comment")
        .with_data("category", NotificationCategory::Comments.as_str())
        .with_data("postId", comment.post_id.clone())
        .with_data("parishId", post_parish_id)
        .with_data("commentId", comment_id)
}

/// Compose the notification for a new chat message.
///
/// Image-only messages substitute a placeholder body; messages carrying both
/// text and images are prefixed with the photo marker.
pub fn compose_chat_message(message_id: &str, message: &ChatMessage) -> MessageTemplate {
    let text = message.text.as_deref().unwrap_or("").trim();
    let body = if text.is_empty() && !message.image_urls.is_empty() {
        PHOTO_PLACEHOLDER.to_string()
    } else if !message.image_urls.is_empty() {
        format!("{PHOTO_PREFIX}{text}")
    } else {
        text.to_string()
    };
    MessageTemplate::new(message.sender_name.clone(), body, MessagePriority::High)
        .with_data("type", "chat_message")
        .with_data("category", NotificationCategory::ChatMessages.as_str())
        .with_data("conversationId", message.conversation_id.clone())
        .with_data("messageId", message_id)
}

/// Compose the message sent by the test entry point.
pub fn compose_test(category: NotificationCategory) -> MessageTemplate {
    MessageTemplate::new(
        "テスト通知".to_string(),
        format!("カテゴリ: {category}"),
        MessagePriority::Normal,
    )
    .with_data("type", "test")
    .with_data("category", category.as_str())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use steeple_store::models::PostStatus;

    use super::*;

    fn post(title: &str, body: &str) -> Post {
        Post {
            parish_id: Some("parish-1".to_string()),
            author_id: "author".to_string(),
            kind: "official".to_string(),
            category: "notice".to_string(),
            title: title.to_string(),
            body: body.to_string(),
            status: PostStatus::Published,
            updated_at: Utc::now(),
        }
    }

    fn comment(content: &str) -> Comment {
        Comment {
            post_id: "post-1".to_string(),
            author_id: "u2".to_string(),
            author_name: "Maria".to_string(),
            content: content.to_string(),
        }
    }

    fn chat(text: Option<&str>, images: usize) -> ChatMessage {
        ChatMessage {
            conversation_id: "conv-1".to_string(),
            sender_id: "u1".to_string(),
            sender_name: "Paul".to_string(),
            text: text.map(str::to_string),
            image_urls: (0..images).map(|i| format!("img-{i}")).collect(),
        }
    }

    #[test]
    fn short_bodies_pass_through_unmodified() {
        assert_eq!(truncate_body(&"a".repeat(40), COMMENT_BODY_LIMIT), "a".repeat(40));
        assert_eq!(truncate_body("", COMMENT_BODY_LIMIT), "");
    }

    #[test]
    fn long_comment_body_truncates_to_fifty_plus_ellipsis() {
        let truncated = truncate_body(&"x".repeat(60), COMMENT_BODY_LIMIT);
        assert_eq!(truncated.chars().count(), 50 + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn body_exactly_at_the_limit_is_untouched() {
        let body = "y".repeat(50);
        assert_eq!(truncate_body(&body, COMMENT_BODY_LIMIT), body);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let body = "あ".repeat(101);
        let truncated = truncate_body(&body, POST_BODY_LIMIT);
        assert_eq!(truncated.chars().count(), 100 + 3);
    }

    #[test]
    fn post_notice_carries_deep_link_ids_as_strings() {
        let template = compose_post_notice("post-9", &post("お知らせ", "body"));
        assert_eq!(template.title, "お知らせ");
        assert_eq!(template.data["postId"], "post-9");
        assert_eq!(template.data["parishId"], "parish-1");
        assert_eq!(template.data["type"], "official_notice");
    }

    #[test]
    fn post_without_title_gets_the_default() {
        let template = compose_post_notice("post-9", &post("", "body"));
        assert_eq!(template.title, DEFAULT_NOTICE_TITLE);
    }

    #[test]
    fn post_body_truncates_at_one_hundred() {
        let template = compose_post_notice("post-9", &post("t", &"z".repeat(150)));
        assert_eq!(template.body.chars().count(), 100 + 3);
    }

    #[test]
    fn comment_body_includes_author_and_truncated_content() {
        let template = compose_comment("c-1", &comment(&"w".repeat(60)), "parish-1");
        assert!(template.body.starts_with("Maria: "));
        assert!(template.body.ends_with("..."));
        assert_eq!(template.data["commentId"], "c-1");
    }

    #[test]
    fn image_only_chat_message_uses_the_placeholder() {
        let template = compose_chat_message("m-1", &chat(None, 2));
        assert_eq!(template.body, PHOTO_PLACEHOLDER);
    }

    #[test]
    fn chat_with_text_and_images_gets_the_photo_prefix() {
        let template = compose_chat_message("m-1", &chat(Some("hello"), 1));
        assert_eq!(template.body, "📷 hello");
    }

    #[test]
    fn text_only_chat_message_passes_through() {
        let template = compose_chat_message("m-1", &chat(Some("hello"), 0));
        assert_eq!(template.body, "hello");
        assert_eq!(template.title, "Paul");
    }

    #[test]
    fn whitespace_only_text_with_images_counts_as_image_only() {
        let template = compose_chat_message("m-1", &chat(Some("   "), 1));
        assert_eq!(template.body, PHOTO_PLACEHOLDER);
    }

    #[test]
    fn template_stamps_tokens_without_sharing_state() {
        let template = compose_test(NotificationCategory::Notices);
        let a = template.for_token("tok-a");
        let b = template.for_token("tok-b");
        assert_eq!(a.token, "tok-a");
        assert_eq!(b.token, "tok-b");
        assert_eq!(a.title, b.title);
    }
}
