//! Per-event orchestration.
//!
//! Each handler is a thin sequence over the building blocks: resolve
//! candidates, filter by preference, compose, dispatch, log. Handlers never
//! fail the surrounding event for delivery problems; only unexpected store
//! write errors propagate (from the moderation path, where a lost write
//! matters).

mod chat;
mod comment;
mod post;
mod report;

pub use chat::handle_chat_message_created;
pub use comment::handle_comment_created;
pub use post::handle_post_created;
pub use report::handle_report_created;

use steeple_core::categories::NotificationCategory;
use steeple_store::models::User;

use crate::compose::MessageTemplate;
use crate::context::EngineContext;
use crate::prefs::allows_notification;
use crate::push::OutboundMessage;

/// Filter `candidates` by preference and stamp the template per token.
///
/// Candidates without a registered delivery token are skipped silently; the
/// preference check runs once per remaining candidate at the current local
/// hour, with the lookups issued concurrently. Order is preserved.
pub(crate) async fn eligible_messages(
    ctx: &EngineContext,
    candidates: &[User],
    category: NotificationCategory,
    template: &MessageTemplate,
) -> Vec<OutboundMessage> {
    let hour = ctx.local_hour();
    let checks = candidates
        .iter()
        .filter_map(|user| user.delivery_token().map(|token| (user, token)))
        .map(|(user, token)| async move {
            allows_notification(ctx.stores.users.as_ref(), &user.id, category, hour)
                .await
                .then(|| template.for_token(token))
        });
    futures::future::join_all(checks)
        .await
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use steeple_store::models::NotificationSettings;
    use steeple_store::Stores;

    use super::*;
    use crate::compose::compose_test;
    use crate::push::LoggingPushClient;
    use crate::webhook::WebhookNotifier;

    fn user(id: &str, token: Option<&str>, settings: Option<NotificationSettings>) -> User {
        User {
            id: id.to_string(),
            display_name: id.to_string(),
            fcm_token: token.map(str::to_string),
            parish_id: None,
            favorite_parish_ids: vec![],
            settings,
        }
    }

    #[tokio::test]
    async fn tokenless_and_opted_out_candidates_are_skipped() {
        let (stores, store) = Stores::memory();
        let opted_out = user(
            "quiet",
            Some("tok-quiet"),
            Some(NotificationSettings {
                enabled: false,
                ..NotificationSettings::default()
            }),
        );
        let eligible = user("loud", Some("tok-loud"), None);
        let tokenless = user("bare", None, None);
        for u in [&opted_out, &eligible, &tokenless] {
            store.put_user(u.clone()).await;
        }

        let ctx = EngineContext::new(
            stores,
            Arc::new(LoggingPushClient),
            Arc::new(WebhookNotifier::new(None)),
        );
        let template = compose_test(NotificationCategory::Notices);
        let messages = eligible_messages(
            &ctx,
            &[opted_out, eligible, tokenless],
            NotificationCategory::Notices,
            &template,
        )
        .await;

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].token, "tok-loud");
    }
}
