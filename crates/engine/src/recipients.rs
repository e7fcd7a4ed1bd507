//! Candidate recipient resolution.
//!
//! Recipients can come from several independent membership predicates (for a
//! parish notice: primary membership and favorite membership). The resolver
//! unions the candidate sets with first-seen dedup by user id and removes the
//! event's actor unconditionally. An empty result is a normal terminal case,
//! never an error.

use std::collections::HashSet;

use steeple_core::types::UserId;
use steeple_store::models::User;
use steeple_store::UserDirectory;

/// Union candidate id sets, dropping duplicates and the actor.
///
/// First-seen order is preserved; which predicate contributed a duplicate id
/// carries no significance beyond identity.
pub fn dedup_recipients(
    candidate_sets: impl IntoIterator<Item = Vec<UserId>>,
    actor_id: &str,
) -> Vec<UserId> {
    let mut seen = HashSet::new();
    let mut recipients = Vec::new();
    for set in candidate_sets {
        for id in set {
            if id == actor_id {
                continue;
            }
            if seen.insert(id.clone()) {
                recipients.push(id);
            }
        }
    }
    recipients
}

/// Like [`dedup_recipients`] but over full user documents, keyed by `id`.
pub fn dedup_users(
    candidate_sets: impl IntoIterator<Item = Vec<User>>,
    actor_id: &str,
) -> Vec<User> {
    let mut seen = HashSet::new();
    let mut recipients = Vec::new();
    for set in candidate_sets {
        for user in set {
            if user.id == actor_id {
                continue;
            }
            if seen.insert(user.id.clone()) {
                recipients.push(user);
            }
        }
    }
    recipients
}

/// Resolve the members of a parish: primary members plus users who favorited
/// it, minus the actor.
///
/// Each predicate query is independent; a failed query degrades to an empty
/// candidate set for that predicate so the other predicate still resolves.
pub async fn resolve_parish_members(
    directory: &dyn UserDirectory,
    parish_id: &str,
    actor_id: &str,
) -> Vec<User> {
    let primary = match directory.find_by_parish(parish_id).await {
        Ok(users) => users,
        Err(e) => {
            tracing::warn!(parish_id, error = %e, "Primary-membership query failed");
            Vec::new()
        }
    };
    let favorites = match directory.find_by_favorite_parish(parish_id).await {
        Ok(users) => users,
        Err(e) => {
            tracing::warn!(parish_id, error = %e, "Favorite-membership query failed");
            Vec::new()
        }
    };
    dedup_users([primary, favorites], actor_id)
}
