//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// POST   /test    -> send_test_notification
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/test", post(notification::send_test_notification))
}
