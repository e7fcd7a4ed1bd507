//! Narrow async traits over the collections the engine touches.
//!
//! Each trait covers exactly the reads and writes one component needs:
//! single-document reads, equality / array-membership queries, and a single
//! field update for moderation. No multi-document transaction is assumed;
//! report counts are eventually-consistent snapshots.

use async_trait::async_trait;
use steeple_core::types::{Timestamp, UserId};

use crate::error::StoreError;
use crate::models::{NotificationSettings, Post, PostStatus, ReportTarget, User};

/// Read access to the `users` collection.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a single user document.
    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Fetch just a user's notification settings.
    ///
    /// Kept separate from [`get_user`](Self::get_user) so preference checks
    /// are one independent read per candidate recipient.
    async fn get_settings(&self, id: &str) -> Result<Option<NotificationSettings>, StoreError>;

    /// Users whose primary parish equals `parish_id`.
    async fn find_by_parish(&self, parish_id: &str) -> Result<Vec<User>, StoreError>;

    /// Users whose favorite-parish list contains `parish_id`.
    async fn find_by_favorite_parish(&self, parish_id: &str) -> Result<Vec<User>, StoreError>;
}

/// Read/write access to the `posts` collection.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn get_post(&self, id: &str) -> Result<Option<Post>, StoreError>;

    /// Update a post's visibility status and stamp `updated_at`.
    async fn update_status(
        &self,
        id: &str,
        status: PostStatus,
        updated_at: Timestamp,
    ) -> Result<(), StoreError>;
}

/// Read access to the `reports` collection.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Point-in-time count of reports against a target. Recomputed on every
    /// evaluation rather than kept as a running counter field.
    async fn count_for_target(
        &self,
        target: ReportTarget,
        target_id: &str,
    ) -> Result<usize, StoreError>;
}

/// Read access to chat conversations.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// All participants of a conversation, including the sender.
    async fn participants(&self, conversation_id: &str) -> Result<Vec<UserId>, StoreError>;
}
