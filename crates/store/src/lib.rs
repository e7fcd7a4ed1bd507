//! Document-store interface for the Steeple backend.
//!
//! The production document store is an external collaborator; this crate
//! specifies only the interface the notification engine needs:
//!
//! - [`stores`] — narrow async traits for each collection the engine reads
//!   or writes (user directory, posts, reports, conversations).
//! - [`models`] — the document models those traits exchange.
//! - [`memory`] — an in-memory implementation backing tests and local
//!   development; production deployments plug their store adapter in behind
//!   the same traits.
//!
//! All shared state lives behind these traits. The engine holds no caches of
//! its own, so the store's consistency guarantees are the only ones in play.

pub mod error;
pub mod memory;
pub mod models;
pub mod stores;

use std::sync::{Arc, OnceLock};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use stores::{ConversationStore, PostStore, ReportStore, UserDirectory};

/// Bundle of store handles injected into every component that needs one.
///
/// Constructed once at startup and passed down explicitly; nothing in the
/// engine reaches for a process-global connection.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserDirectory>,
    pub posts: Arc<dyn PostStore>,
    pub reports: Arc<dyn ReportStore>,
    pub conversations: Arc<dyn ConversationStore>,
}

impl Stores {
    /// Build a fresh in-memory store bundle.
    ///
    /// Returns the bundle plus the concrete [`MemoryStore`] handle so tests
    /// and local wiring can seed documents.
    pub fn memory() -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let stores = Self {
            users: store.clone(),
            posts: store.clone(),
            reports: store.clone(),
            conversations: store.clone(),
        };
        (stores, store)
    }

    /// Process-wide in-memory store, initialized on first call.
    ///
    /// Subsequent calls return the same handles, so startup code may call
    /// this more than once without creating divergent stores.
    pub fn init_memory() -> (Self, Arc<MemoryStore>) {
        static SHARED: OnceLock<(Stores, Arc<MemoryStore>)> = OnceLock::new();
        SHARED.get_or_init(Self::memory).clone()
    }
}
