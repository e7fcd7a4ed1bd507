//! New-report handling: moderator alert plus the hide-threshold check.

use steeple_store::models::Report;
use steeple_store::StoreError;

use crate::context::EngineContext;
use crate::moderation::{evaluate_report_threshold, TransitionOutcome};

/// Handle a newly created report.
///
/// Two independent branches: alert the moderators over the webhook, and
/// evaluate the automatic hide threshold. A webhook failure never blocks the
/// threshold evaluation, and neither branch notifies end users. Store errors
/// from the threshold evaluation propagate; a lost hide write is worth
/// surfacing.
pub async fn handle_report_created(
    ctx: &EngineContext,
    report_id: &str,
    report: &Report,
) -> Result<TransitionOutcome, StoreError> {
    let (alert, threshold) = tokio::join!(
        ctx.webhook.notify_report(report_id, report),
        evaluate_report_threshold(
            ctx.stores.reports.as_ref(),
            ctx.stores.posts.as_ref(),
            report.target,
            &report.target_id,
        ),
    );

    if let Err(e) = alert {
        tracing::error!(report_id, error = %e, "Moderation alert delivery failed");
    }
    let outcome = threshold?;
    tracing::info!(report_id, target_id = %report.target_id, ?outcome, "Report processed");
    Ok(outcome)
}
