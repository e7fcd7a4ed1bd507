//! Per-user notification preference evaluation.
//!
//! [`should_notify`] is a pure decision function over a user's stored
//! settings; [`allows_notification`] adds the store lookup with fail-open
//! semantics: a transient read error must never silently suppress a
//! notification, so lookup failure defaults to "allow". That is an explicit
//! policy choice (favor over-notification over silent suppression), not an
//! oversight.

use steeple_core::categories::NotificationCategory;
use steeple_store::models::NotificationSettings;
use steeple_store::UserDirectory;

/// Whether `hour` falls inside the quiet window `[start, end)`.
///
/// When `start > end` the window wraps past midnight: quiet iff
/// `hour >= start || hour < end`. `start == end` is an empty window.
/// Well-defined for every pair of hours in `0..=23`.
pub fn in_quiet_hours(start: u8, end: u8, hour: u8) -> bool {
    if start <= end {
        start <= hour && hour < end
    } else {
        hour >= start || hour < end
    }
}

/// Decide whether a notification in `category` may be delivered at `hour`.
///
/// - Absent settings record: allow.
/// - Global kill switch off: deny.
/// - Category toggle off: deny.
/// - Inside an active quiet window: deny. The window is active when
///   `quiet_hours_enabled` is true, or — for legacy records that predate the
///   toggle — when both hour fields are present.
pub fn should_notify(
    settings: Option<&NotificationSettings>,
    category: NotificationCategory,
    hour: u8,
) -> bool {
    let Some(settings) = settings else {
        return true;
    };

    if !settings.enabled {
        return false;
    }

    let category_enabled = match category {
        NotificationCategory::Notices => settings.notices,
        NotificationCategory::Comments => settings.comments,
        NotificationCategory::ChatMessages => settings.chat_messages,
    };
    if !category_enabled {
        return false;
    }

    let quiet_active = match settings.quiet_hours_enabled {
        Some(enabled) => enabled,
        None => settings.quiet_hours_start.is_some() && settings.quiet_hours_end.is_some(),
    };
    if quiet_active {
        if let (Some(start), Some(end)) = (settings.quiet_hours_start, settings.quiet_hours_end) {
            if in_quiet_hours(start, end, hour) {
                return false;
            }
        }
    }

    true
}

/// Settings lookup plus [`should_notify`], failing open on store errors.
pub async fn allows_notification(
    directory: &dyn UserDirectory,
    user_id: &str,
    category: NotificationCategory,
    hour: u8,
) -> bool {
    match directory.get_settings(user_id).await {
        Ok(settings) => should_notify(settings.as_ref(), category, hour),
        Err(e) => {
            // Fail open: a transient read error must not suppress delivery.
            tracing::warn!(
                user_id,
                category = %category,
                error = %e,
                "Settings lookup failed, allowing notification"
            );
            true
        }
    }
}
