//! In-memory document store.
//!
//! Backs tests and local development. Every trait method goes through the
//! same `RwLock`-guarded maps, so reads observe writes immediately — a
//! stricter consistency model than the production store guarantees, which
//! is fine for what the engine relies on.

use std::collections::HashMap;

use async_trait::async_trait;
use steeple_core::types::{DocId, Timestamp, UserId};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{NotificationSettings, Post, PostStatus, Report, ReportTarget, User};
use crate::stores::{ConversationStore, PostStore, ReportStore, UserDirectory};

/// In-memory implementation of every store trait.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    posts: RwLock<HashMap<DocId, Post>>,
    reports: RwLock<Vec<Report>>,
    conversations: RwLock<HashMap<DocId, Vec<UserId>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user document.
    pub async fn put_user(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    /// Insert or replace a post document.
    pub async fn put_post(&self, id: impl Into<DocId>, post: Post) {
        self.posts.write().await.insert(id.into(), post);
    }

    /// Append a report document.
    pub async fn put_report(&self, report: Report) {
        self.reports.write().await.push(report);
    }

    /// Insert or replace a conversation's participant list.
    pub async fn put_conversation(&self, id: impl Into<DocId>, participants: Vec<UserId>) {
        self.conversations.write().await.insert(id.into(), participants);
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn get_settings(&self, id: &str) -> Result<Option<NotificationSettings>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .get(id)
            .and_then(|user| user.settings.clone()))
    }

    async fn find_by_parish(&self, parish_id: &str) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.parish_id.as_deref() == Some(parish_id))
            .cloned()
            .collect())
    }

    async fn find_by_favorite_parish(&self, parish_id: &str) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.favorite_parish_ids.iter().any(|p| p == parish_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn get_post(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().await.get(id).cloned())
    }

    async fn update_status(
        &self,
        id: &str,
        status: PostStatus,
        updated_at: Timestamp,
    ) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("posts/{id}")))?;
        post.status = status;
        post.updated_at = updated_at;
        Ok(())
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn count_for_target(
        &self,
        target: ReportTarget,
        target_id: &str,
    ) -> Result<usize, StoreError> {
        Ok(self
            .reports
            .read()
            .await
            .iter()
            .filter(|r| r.target == target && r.target_id == target_id)
            .count())
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn participants(&self, conversation_id: &str) -> Result<Vec<UserId>, StoreError> {
        Ok(self
            .conversations
            .read()
            .await
            .get(conversation_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str, parish: Option<&str>, favorites: &[&str]) -> User {
        User {
            id: id.to_string(),
            display_name: id.to_string(),
            fcm_token: None,
            parish_id: parish.map(str::to_string),
            favorite_parish_ids: favorites.iter().map(|s| s.to_string()).collect(),
            settings: None,
        }
    }

    #[tokio::test]
    async fn queries_by_primary_and_favorite_parish() {
        let store = MemoryStore::new();
        store.put_user(user("a", Some("p1"), &[])).await;
        store.put_user(user("b", Some("p2"), &["p1"])).await;
        store.put_user(user("c", None, &["p2"])).await;

        let primary = store.find_by_parish("p1").await.unwrap();
        assert_eq!(primary.len(), 1);
        assert_eq!(primary[0].id, "a");

        let favorite = store.find_by_favorite_parish("p1").await.unwrap();
        assert_eq!(favorite.len(), 1);
        assert_eq!(favorite[0].id, "b");
    }

    #[tokio::test]
    async fn report_count_matches_target_only() {
        let store = MemoryStore::new();
        for target_id in ["post-1", "post-1", "post-2"] {
            store
                .put_report(Report {
                    target: ReportTarget::Post,
                    target_id: target_id.to_string(),
                    reporter_id: "r".to_string(),
                    reason: "spam".to_string(),
                    created_at: Utc::now(),
                })
                .await;
        }
        store
            .put_report(Report {
                target: ReportTarget::Comment,
                target_id: "post-1".to_string(),
                reporter_id: "r".to_string(),
                reason: "spam".to_string(),
                created_at: Utc::now(),
            })
            .await;

        let count = store
            .count_for_target(ReportTarget::Post, "post-1")
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn update_status_on_missing_post_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_status("missing", PostStatus::Hidden, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_conversation_has_no_participants() {
        let store = MemoryStore::new();
        let participants = store.participants("nope").await.unwrap();
        assert!(participants.is_empty());
    }
}
