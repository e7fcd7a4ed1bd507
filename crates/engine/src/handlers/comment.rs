//! New-comment notification to the post author.

use steeple_core::categories::NotificationCategory;
use steeple_store::models::Comment;

use crate::compose::compose_comment;
use crate::context::EngineContext;
use crate::dispatch::{dispatch, DispatchResult};
use crate::handlers::eligible_messages;

/// Handle a newly created comment.
///
/// The single recipient is the parent post's author. Commenting on your own
/// post notifies nobody. A missing parent post or author document is logged
/// and skipped; comment events are not retried for it.
pub async fn handle_comment_created(
    ctx: &EngineContext,
    comment_id: &str,
    comment: &Comment,
) -> DispatchResult {
    if comment.post_id.is_empty() {
        tracing::warn!(comment_id, "Comment carries no parent post id, skipping");
        return DispatchResult::default();
    }

    let post = match ctx.stores.posts.get_post(&comment.post_id).await {
        Ok(Some(post)) => post,
        Ok(None) => {
            tracing::warn!(comment_id, post_id = %comment.post_id, "Parent post not found, skipping");
            return DispatchResult::default();
        }
        Err(e) => {
            tracing::warn!(comment_id, error = %e, "Parent post lookup failed, skipping");
            return DispatchResult::default();
        }
    };

    if post.author_id == comment.author_id {
        tracing::debug!(comment_id, "Author commented on their own post, skipping");
        return DispatchResult::default();
    }

    let author = match ctx.stores.users.get_user(&post.author_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!(comment_id, author_id = %post.author_id, "Post author not found, skipping");
            return DispatchResult::default();
        }
        Err(e) => {
            tracing::warn!(comment_id, error = %e, "Post author lookup failed, skipping");
            return DispatchResult::default();
        }
    };

    let template =
        compose_comment(comment_id, comment, post.parish_id.as_deref().unwrap_or(""));
    let messages = eligible_messages(
        ctx,
        std::slice::from_ref(&author),
        NotificationCategory::Comments,
        &template,
    )
    .await;
    if messages.is_empty() {
        tracing::debug!(comment_id, "Post author is not reachable or opted out");
        return DispatchResult::default();
    }

    let result = dispatch(ctx.push.as_ref(), &messages).await;
    tracing::info!(
        comment_id,
        post_id = %comment.post_id,
        sent = result.success_count,
        failed = result.failure_count,
        "Comment notification complete"
    );
    result
}
