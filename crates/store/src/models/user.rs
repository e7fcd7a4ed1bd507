//! User documents and their notification settings.

use serde::{Deserialize, Serialize};
use steeple_core::types::UserId;

/// A document from the `users` collection.
///
/// Mutated externally by the client app; the engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub display_name: String,
    /// Push-delivery token registered by the client, if any.
    #[serde(default)]
    pub fcm_token: Option<String>,
    /// Primary parish membership.
    #[serde(default)]
    pub parish_id: Option<String>,
    /// Additional parishes the user follows.
    #[serde(default)]
    pub favorite_parish_ids: Vec<String>,
    /// Absent settings mean "all notifications allowed".
    #[serde(default)]
    pub settings: Option<NotificationSettings>,
}

impl User {
    /// The user's delivery token, treating an empty string as absent.
    pub fn delivery_token(&self) -> Option<&str> {
        self.fcm_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Per-user notification settings document.
///
/// Every field is optional on the wire with permissive defaults, so a
/// partially written record still reads as "allowed" wherever it is silent.
/// Legacy records predate `quiet_hours_enabled`; for those, the presence of
/// both hour fields activates the quiet window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Global kill switch. Default: enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Official-notice notifications. Default: enabled.
    #[serde(default = "default_true")]
    pub notices: bool,
    /// Comment notifications. Default: enabled.
    #[serde(default = "default_true")]
    pub comments: bool,
    /// Chat-message notifications. Default: enabled.
    #[serde(default = "default_true")]
    pub chat_messages: bool,
    /// Quiet-hours toggle. `None` on legacy records.
    #[serde(default)]
    pub quiet_hours_enabled: Option<bool>,
    /// Hour of day the quiet window opens, `0..=23`.
    #[serde(default)]
    pub quiet_hours_start: Option<u8>,
    /// Hour of day the quiet window closes, `0..=23`. May precede the start
    /// hour, in which case the window wraps past midnight.
    #[serde(default)]
    pub quiet_hours_end: Option<u8>,
}

impl Default for NotificationSettings {
    /// Everything allowed, no quiet window — the same reading as an absent
    /// settings record.
    fn default() -> Self {
        Self {
            enabled: true,
            notices: true,
            comments: true,
            chat_messages: true,
            quiet_hours_enabled: None,
            quiet_hours_start: None,
            quiet_hours_end: None,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_document_allows_everything() {
        let settings: NotificationSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.enabled);
        assert!(settings.notices);
        assert!(settings.comments);
        assert!(settings.chat_messages);
        assert!(settings.quiet_hours_enabled.is_none());
    }

    #[test]
    fn legacy_record_keeps_bare_hours() {
        let settings: NotificationSettings =
            serde_json::from_str(r#"{"quiet_hours_start": 22, "quiet_hours_end": 7}"#).unwrap();
        assert_eq!(settings.quiet_hours_start, Some(22));
        assert_eq!(settings.quiet_hours_end, Some(7));
        assert!(settings.quiet_hours_enabled.is_none());
    }

    #[test]
    fn empty_token_is_not_a_delivery_token() {
        let user: User = serde_json::from_str(r#"{"id": "u1", "fcm_token": ""}"#).unwrap();
        assert_eq!(user.delivery_token(), None);
    }
}
