//! Push-delivery provider seam.
//!
//! The actual provider is an external collaborator; the engine only needs a
//! single-message send and a bounded bulk send with per-message outcomes.
//! Provider-specific failure codes are collapsed into the narrow
//! [`PushError`] classification before they reach anything caller-facing.

use std::collections::BTreeMap;

use async_trait::async_trait;

/// Hard per-call limit of the provider's bulk-send endpoint.
pub const MAX_BATCH_SIZE: usize = 500;

/// Platform alert priority hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePriority {
    Normal,
    High,
}

/// A provider-agnostic outbound push message addressed to one device token.
///
/// Data attributes stay string-typed end to end; the provider accepts only
/// string values in the data section.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub token: String,
    pub title: String,
    pub body: String,
    pub data: BTreeMap<String, String>,
    pub sound: Option<String>,
    pub priority: MessagePriority,
}

/// Delivery failure, classified.
///
/// Unrecognized provider failures all land in [`PushError::Delivery`];
/// arbitrary provider internals are never re-exposed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PushError {
    #[error("invalid device token")]
    InvalidToken,

    #[error("device token is no longer registered")]
    Unregistered,

    #[error("provider rate limit exceeded")]
    RateLimited,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Map a provider failure code onto the [`PushError`] taxonomy.
pub fn classify_provider_code(code: &str, detail: &str) -> PushError {
    match code {
        "messaging/invalid-argument" | "messaging/invalid-registration-token" => {
            PushError::InvalidToken
        }
        "messaging/registration-token-not-registered" => PushError::Unregistered,
        "messaging/message-rate-exceeded" | "messaging/device-message-rate-exceeded" => {
            PushError::RateLimited
        }
        _ => PushError::Delivery(detail.to_string()),
    }
}

/// Per-message outcomes of one bulk-send call.
#[derive(Debug, Clone)]
pub struct BatchResponse {
    pub responses: Vec<Result<(), PushError>>,
}

impl BatchResponse {
    pub fn success_count(&self) -> usize {
        self.responses.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.responses.len() - self.success_count()
    }
}

/// Delivery-provider client.
#[async_trait]
pub trait PushClient: Send + Sync {
    /// Send a single message.
    async fn send(&self, message: &OutboundMessage) -> Result<(), PushError>;

    /// Send up to [`MAX_BATCH_SIZE`] messages in one provider call.
    ///
    /// `Err` means the whole call failed at the transport level; `Ok` carries
    /// one outcome per message, in input order.
    async fn send_each(&self, messages: &[OutboundMessage]) -> Result<BatchResponse, PushError>;
}

/// Log-only client used by local development wiring.
///
/// Accepts every message and reports it as delivered.
pub struct LoggingPushClient;

#[async_trait]
impl PushClient for LoggingPushClient {
    async fn send(&self, message: &OutboundMessage) -> Result<(), PushError> {
        tracing::info!(title = %message.title, "Push message accepted (logging client)");
        Ok(())
    }

    async fn send_each(&self, messages: &[OutboundMessage]) -> Result<BatchResponse, PushError> {
        tracing::info!(count = messages.len(), "Push batch accepted (logging client)");
        Ok(BatchResponse {
            responses: messages.iter().map(|_| Ok(())).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_provider_codes_map_to_their_kind() {
        assert_eq!(
            classify_provider_code("messaging/invalid-registration-token", "bad token"),
            PushError::InvalidToken
        );
        assert_eq!(
            classify_provider_code("messaging/registration-token-not-registered", "gone"),
            PushError::Unregistered
        );
        assert_eq!(
            classify_provider_code("messaging/message-rate-exceeded", "slow down"),
            PushError::RateLimited
        );
    }

    #[test]
    fn unknown_codes_collapse_into_the_generic_bucket() {
        assert_eq!(
            classify_provider_code("messaging/internal-quota-shard-exhausted", "detail"),
            PushError::Delivery("detail".to_string())
        );
    }

    #[test]
    fn batch_response_counts() {
        let response = BatchResponse {
            responses: vec![Ok(()), Err(PushError::InvalidToken), Ok(())],
        };
        assert_eq!(response.success_count(), 2);
        assert_eq!(response.failure_count(), 1);
    }
}
