//! The closed set of push-notification categories.
//!
//! Each category maps to one per-user preference toggle. Request surfaces
//! that accept a category argument parse it through [`NotificationCategory`]
//! so unsupported values are rejected up front instead of being matched on
//! as loose strings downstream.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A push-notification category with a per-user preference toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    /// Official parish notices (new posts with `kind=official, category=notice`).
    Notices,
    /// Comments on a post the user authored.
    Comments,
    /// Direct chat messages.
    ChatMessages,
}

impl NotificationCategory {
    /// Every supported category, in preference-panel order.
    pub const ALL: [NotificationCategory; 3] = [
        NotificationCategory::Notices,
        NotificationCategory::Comments,
        NotificationCategory::ChatMessages,
    ];

    /// Stable wire name for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Notices => "notices",
            NotificationCategory::Comments => "comments",
            NotificationCategory::ChatMessages => "chat_messages",
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notices" => Ok(NotificationCategory::Notices),
            "comments" => Ok(NotificationCategory::Comments),
            "chat_messages" => Ok(NotificationCategory::ChatMessages),
            other => Err(CoreError::InvalidArgument(format!(
                "unsupported notification category: {other}"
            ))),
        }
    }
}
