use std::sync::Arc;

use steeple_engine::event::EventBus;
use steeple_engine::EngineContext;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Engine context: stores, push client, webhook notifier.
    pub engine: EngineContext,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Event bus the document triggers publish into.
    pub event_bus: Arc<EventBus>,
}
