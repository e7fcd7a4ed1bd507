//! New-post fan-out.

use steeple_core::categories::NotificationCategory;
use steeple_store::models::Post;

use crate::compose::compose_post_notice;
use crate::context::EngineContext;
use crate::dispatch::{dispatch, DispatchResult};
use crate::handlers::eligible_messages;
use crate::recipients::resolve_parish_members;

/// Handle a newly created post.
///
/// Only official notices fan out; regular community posts are acknowledged
/// and skipped. Recipients are the post's parish members (primary plus
/// favorite), minus the author, filtered by preference.
pub async fn handle_post_created(ctx: &EngineContext, post_id: &str, post: &Post) -> DispatchResult {
    if !post.is_official_notice() {
        tracing::debug!(post_id, kind = %post.kind, "Post is not an official notice, skipping");
        return DispatchResult::default();
    }
    let Some(parish_id) = post.parish_id.as_deref() else {
        tracing::warn!(post_id, "Official notice has no parish, skipping fan-out");
        return DispatchResult::default();
    };

    let members =
        resolve_parish_members(ctx.stores.users.as_ref(), parish_id, &post.author_id).await;
    let template = compose_post_notice(post_id, post);
    let messages =
        eligible_messages(ctx, &members, NotificationCategory::Notices, &template).await;
    if messages.is_empty() {
        tracing::info!(post_id, parish_id, "No eligible recipients for notice");
        return DispatchResult::default();
    }

    let result = dispatch(ctx.push.as_ref(), &messages).await;
    tracing::info!(
        post_id,
        parish_id,
        candidates = members.len(),
        sent = result.success_count,
        failed = result.failure_count,
        "Notice fan-out complete"
    );
    result
}
