//! Report-count moderation trigger.
//!
//! When the accumulated report count for a post reaches the hide threshold,
//! the post transitions from published to hidden exactly once. The decision
//! re-reads the current count and the target's current status, so replayed or
//! concurrent report events converge on the same hidden state instead of
//! flapping it.

use chrono::Utc;
use steeple_store::models::{PostStatus, ReportTarget};
use steeple_store::{PostStore, ReportStore, StoreError};

/// Reports required before a post is hidden automatically.
pub const REPORT_HIDE_THRESHOLD: usize = 3;

/// Outcome of one threshold evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The reported target kind has no automatic transition.
    NotApplicable,
    /// Count is still under the threshold; nothing changed.
    BelowThreshold { count: usize },
    /// The post crossed the threshold and was transitioned to hidden.
    Hidden { count: usize },
    /// The post was already hidden; no write was issued.
    AlreadyHidden,
    /// The reported post no longer exists.
    TargetMissing,
}

/// Evaluate the hide threshold for a newly created report.
///
/// Only post reports participate. The count includes the report that
/// triggered this evaluation. Store errors propagate; the caller decides
/// whether the surrounding event is retried.
pub async fn evaluate_report_threshold(
    reports: &dyn ReportStore,
    posts: &dyn PostStore,
    target: ReportTarget,
    target_id: &str,
) -> Result<TransitionOutcome, StoreError> {
    if target != ReportTarget::Post {
        return Ok(TransitionOutcome::NotApplicable);
    }

    let count = reports.count_for_target(target, target_id).await?;
    if count < REPORT_HIDE_THRESHOLD {
        return Ok(TransitionOutcome::BelowThreshold { count });
    }

    let Some(post) = posts.get_post(target_id).await? else {
        tracing::warn!(post_id = target_id, "Reported post no longer exists");
        return Ok(TransitionOutcome::TargetMissing);
    };
    if post.status == PostStatus::Hidden {
        return Ok(TransitionOutcome::AlreadyHidden);
    }

    posts
        .update_status(target_id, PostStatus::Hidden, Utc::now())
        .await?;
    tracing::info!(post_id = target_id, count, "Post hidden by report threshold");
    Ok(TransitionOutcome::Hidden { count })
}
