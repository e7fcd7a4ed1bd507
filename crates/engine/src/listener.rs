//! Event-bus consumer driving the handlers.
//!
//! [`NotificationListener`] subscribes to the [`EventBus`](crate::EventBus)
//! and routes each [`CommunityEvent`] to its handler. One listener task per
//! process; events for different documents carry no ordering requirement, so
//! sequential processing is only a simplicity choice, not a correctness one.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::context::EngineContext;
use crate::event::CommunityEvent;
use crate::handlers;

/// Consumes community events and runs the matching notification flow.
pub struct NotificationListener {
    ctx: EngineContext,
}

impl NotificationListener {
    pub fn new(ctx: EngineContext) -> Self {
        Self { ctx }
    }

    /// Run the consume loop until the bus closes or `shutdown` fires.
    ///
    /// A lagged receiver drops the skipped events with a warning; delivery
    /// here is best-effort and nothing is replayed.
    pub async fn run(
        self,
        mut receiver: broadcast::Receiver<CommunityEvent>,
        shutdown: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Shutdown requested, notification listener stopping");
                    break;
                }
                received = receiver.recv() => match received {
                    Ok(event) => self.handle(event).await,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Notification listener lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, notification listener stopping");
                        break;
                    }
                },
            }
        }
    }

    /// Dispatch one event to its handler.
    pub async fn handle(&self, event: CommunityEvent) {
        let kind = event.kind();
        tracing::debug!(kind, "Processing community event");
        match event {
            CommunityEvent::PostCreated { post_id, post } => {
                handlers::handle_post_created(&self.ctx, &post_id, &post).await;
            }
            CommunityEvent::CommentCreated { comment_id, comment } => {
                handlers::handle_comment_created(&self.ctx, &comment_id, &comment).await;
            }
            CommunityEvent::ChatMessageCreated { message_id, message } => {
                handlers::handle_chat_message_created(&self.ctx, &message_id, &message).await;
            }
            CommunityEvent::ReportCreated { report_id, report } => {
                if let Err(e) =
                    handlers::handle_report_created(&self.ctx, &report_id, &report).await
                {
                    tracing::error!(report_id, error = %e, "Report handling failed");
                }
            }
        }
    }
}
