//! Shared engine context.
//!
//! Everything the event handlers need is injected through one
//! [`EngineContext`]: the store bundle, the push client, the moderation
//! webhook, and the timezone offset quiet hours are evaluated in. Handlers
//! never reach for process globals.

use std::sync::Arc;

use chrono::{Timelike, Utc};
use steeple_store::Stores;

use crate::push::PushClient;
use crate::webhook::WebhookNotifier;

/// UTC offset quiet hours are evaluated in when none is configured.
///
/// The user base stores quiet-hour preferences as local wall-clock hours;
/// the default deployment serves Japan (UTC+9).
pub const DEFAULT_QUIET_HOURS_UTC_OFFSET: i8 = 9;

/// Dependencies shared by all event handlers.
#[derive(Clone)]
pub struct EngineContext {
    pub stores: Stores,
    pub push: Arc<dyn PushClient>,
    pub webhook: Arc<WebhookNotifier>,
    /// Offset from UTC, in whole hours, of the wall clock quiet-hour
    /// preferences refer to.
    pub quiet_hours_utc_offset: i8,
}

impl EngineContext {
    pub fn new(stores: Stores, push: Arc<dyn PushClient>, webhook: Arc<WebhookNotifier>) -> Self {
        Self {
            stores,
            push,
            webhook,
            quiet_hours_utc_offset: DEFAULT_QUIET_HOURS_UTC_OFFSET,
        }
    }

    pub fn with_quiet_hours_utc_offset(mut self, offset: i8) -> Self {
        self.quiet_hours_utc_offset = offset;
        self
    }

    /// Current hour of day on the configured wall clock, in `0..=23`.
    pub fn local_hour(&self) -> u8 {
        let utc_hour = Utc::now().hour() as i32;
        let shifted = (utc_hour + self.quiet_hours_utc_offset as i32).rem_euclid(24);
        shifted as u8
    }
}
