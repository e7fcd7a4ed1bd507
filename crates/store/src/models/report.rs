//! Report documents.

use std::fmt;

use serde::{Deserialize, Serialize};
use steeple_core::types::{DocId, Timestamp, UserId};

/// What kind of entity a report points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTarget {
    Post,
    Comment,
    User,
}

impl ReportTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportTarget::Post => "post",
            ReportTarget::Comment => "comment",
            ReportTarget::User => "user",
        }
    }
}

impl fmt::Display for ReportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document from the `reports` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub target: ReportTarget,
    pub target_id: DocId,
    pub reporter_id: UserId,
    #[serde(default = "default_reason")]
    pub reason: String,
    pub created_at: Timestamp,
}

fn default_reason() -> String {
    "unspecified".to_string()
}
