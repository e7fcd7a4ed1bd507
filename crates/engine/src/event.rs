//! Community document-creation events and the in-process event bus.
//!
//! [`CommunityEvent`] is a closed set of variants, each carrying the typed
//! payload of the document that was created. The trigger framework publishes
//! events into an [`EventBus`]; the [`NotificationListener`](crate::listener)
//! consumes them. Events for different documents are independent — no
//! cross-event ordering is guaranteed or required.

use steeple_core::types::DocId;
use steeple_store::models::{ChatMessage, Comment, Post, Report};
use tokio::sync::broadcast;

/// A document-creation event, one variant per triggering collection.
#[derive(Debug, Clone)]
pub enum CommunityEvent {
    PostCreated { post_id: DocId, post: Post },
    CommentCreated { comment_id: DocId, comment: Comment },
    ChatMessageCreated { message_id: DocId, message: ChatMessage },
    ReportCreated { report_id: DocId, report: Report },
}

impl CommunityEvent {
    /// Short event name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CommunityEvent::PostCreated { .. } => "post.created",
            CommunityEvent::CommentCreated { .. } => "comment.created",
            CommunityEvent::ChatMessageCreated { .. } => "chat_message.created",
            CommunityEvent::ReportCreated { .. } => "report.created",
        }
    }
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`CommunityEvent`].
pub struct EventBus {
    sender: broadcast::Sender<CommunityEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed events are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped.
    pub fn publish(&self, event: CommunityEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<CommunityEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
