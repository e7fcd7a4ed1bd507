//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use steeple_core::categories::NotificationCategory;
use steeple_core::error::CoreError;
use steeple_engine::compose::compose_test;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /notifications/test`.
#[derive(Debug, Default, Deserialize)]
pub struct TestNotificationRequest {
    /// Category to tag the test message with. Defaults to `"notices"`.
    pub category: Option<String>,
}

/// POST /api/v1/notifications/test
///
/// Send a test notification to the authenticated caller's own device so
/// users can verify their setup end to end. The category is parsed through
/// the closed category set; a caller without a registered device token is a
/// failed precondition, not an internal error.
pub async fn send_test_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Option<Json<TestNotificationRequest>>,
) -> AppResult<Json<serde_json::Value>> {
    let Json(request) = body.unwrap_or_default();
    let category: NotificationCategory = request
        .category
        .as_deref()
        .unwrap_or(NotificationCategory::Notices.as_str())
        .parse()
        .map_err(AppError::Core)?;

    let user = state
        .engine
        .stores
        .users
        .get_user(&auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id.clone(),
        })?;

    let token = user.delivery_token().ok_or_else(|| {
        CoreError::FailedPrecondition("No device token is registered for this user".into())
    })?;

    let message = compose_test(category).for_token(token);
    state
        .engine
        .push
        .send(&message)
        .await
        .map_err(|e| AppError::InternalError(format!("Test notification failed: {e}")))?;

    tracing::info!(user_id = %auth.user_id, category = %category, "Test notification sent");
    Ok(Json(serde_json::json!({ "success": true })))
}
