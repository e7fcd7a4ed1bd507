//! New-chat-message fan-out to conversation participants.

use steeple_core::categories::NotificationCategory;
use steeple_store::models::ChatMessage;

use crate::compose::{compose_chat_message, MessageTemplate};
use crate::context::EngineContext;
use crate::dispatch::{DeliveryFailure, DispatchResult};
use crate::prefs::allows_notification;
use crate::recipients::dedup_recipients;

/// Handle a newly created chat message.
///
/// Recipients are the conversation's participants minus the sender. Each
/// recipient gets an independent pipeline (user lookup, preference check,
/// send) so one failed branch never cancels the others; the pipelines run
/// concurrently. A failed participant lookup degrades to no recipients.
pub async fn handle_chat_message_created(
    ctx: &EngineContext,
    message_id: &str,
    message: &ChatMessage,
) -> DispatchResult {
    let participants = match ctx
        .stores
        .conversations
        .participants(&message.conversation_id)
        .await
    {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(
                message_id,
                conversation_id = %message.conversation_id,
                error = %e,
                "Participant lookup failed, skipping"
            );
            return DispatchResult::default();
        }
    };
    let recipient_ids = dedup_recipients([participants], &message.sender_id);

    let template = compose_chat_message(message_id, message);
    let hour = ctx.local_hour();
    let template_ref = &template;
    let deliveries = recipient_ids
        .iter()
        .map(|id| async move { notify_participant(ctx, message_id, id, template_ref, hour).await });
    let outcomes = futures::future::join_all(deliveries).await;

    let mut result = DispatchResult::default();
    for outcome in outcomes.into_iter().flatten() {
        match outcome {
            Ok(()) => result.success_count += 1,
            Err(failure) => {
                result.failure_count += 1;
                result.failures.push(failure);
            }
        }
    }
    tracing::info!(
        message_id,
        conversation_id = %message.conversation_id,
        sent = result.success_count,
        failed = result.failure_count,
        "Chat fan-out complete"
    );
    result
}

/// One recipient's pipeline: user lookup, preference check, send.
///
/// `None` means the recipient was skipped (no document, no token, or opted
/// out); `Some` carries the delivery outcome.
async fn notify_participant(
    ctx: &EngineContext,
    message_id: &str,
    user_id: &str,
    template: &MessageTemplate,
    hour: u8,
) -> Option<Result<(), DeliveryFailure>> {
    let user = match ctx.stores.users.get_user(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::debug!(message_id, user_id, "Participant has no user document");
            return None;
        }
        Err(e) => {
            tracing::warn!(message_id, user_id, error = %e, "Participant lookup failed");
            return None;
        }
    };
    let token = user.delivery_token()?;
    if !allows_notification(
        ctx.stores.users.as_ref(),
        user_id,
        NotificationCategory::ChatMessages,
        hour,
    )
    .await
    {
        return None;
    }

    match ctx.push.send(&template.for_token(token)).await {
        Ok(()) => Some(Ok(())),
        Err(e) => Some(Err(DeliveryFailure {
            token: token.to_string(),
            reason: e.to_string(),
        })),
    }
}
