//! Steeple notification fan-out and preference-filtering engine.
//!
//! Reacts to document-creation events (posts, comments, chat messages,
//! reports) and decides, per potentially interested user, whether and what
//! push notification to deliver. Building blocks:
//!
//! - [`event`] — the closed set of community events and the in-process
//!   [`EventBus`] the trigger framework publishes into.
//! - [`prefs`] — pure per-user preference evaluation (global toggle,
//!   category toggles, wraparound quiet hours) with a fail-open lookup
//!   wrapper.
//! - [`recipients`] — candidate-set resolution and actor-excluding dedup.
//! - [`compose`] — provider-agnostic message templates per event type.
//! - [`dispatch`] — chunked bulk sends with partial-failure aggregation.
//! - [`moderation`] — the one-shot report-threshold visibility transition.
//! - [`webhook`] — moderator webhook notifier.
//! - [`handlers`] / [`listener`] — thin orchestration per event type.

pub mod compose;
pub mod context;
pub mod dispatch;
pub mod event;
pub mod handlers;
pub mod listener;
pub mod moderation;
pub mod prefs;
pub mod push;
pub mod recipients;
pub mod webhook;

pub use context::EngineContext;
pub use dispatch::{dispatch, DispatchResult, MAX_CHUNK_SIZE};
pub use event::{CommunityEvent, EventBus};
pub use listener::NotificationListener;
pub use moderation::{evaluate_report_threshold, TransitionOutcome, REPORT_HIDE_THRESHOLD};
pub use push::{BatchResponse, OutboundMessage, PushClient, PushError};
pub use webhook::WebhookNotifier;
