//! Chunked bulk dispatch with partial-failure aggregation.
//!
//! Partitions an outbound message list into chunks of at most
//! [`MAX_CHUNK_SIZE`], sends them sequentially, and aggregates per-message
//! outcomes. A transport-failed chunk is recorded as a wholesale failure and
//! never aborts the remaining chunks. Single-pass: nothing is retried here.

pub use crate::push::MAX_BATCH_SIZE as MAX_CHUNK_SIZE;
use crate::push::{OutboundMessage, PushClient};

/// One failed delivery with its classified reason.
#[derive(Debug, Clone)]
pub struct DeliveryFailure {
    pub token: String,
    pub reason: String,
}

/// Aggregate outcome of a dispatch run.
#[derive(Debug, Clone, Default)]
pub struct DispatchResult {
    pub success_count: usize,
    pub failure_count: usize,
    pub failures: Vec<DeliveryFailure>,
}

impl DispatchResult {
    /// Total messages accounted for.
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }

    fn record_failure(&mut self, token: &str, reason: String) {
        self.failure_count += 1;
        self.failures.push(DeliveryFailure {
            token: token.to_string(),
            reason,
        });
    }
}

/// Send `messages` in order, chunked to the provider limit.
///
/// Chunk sends are sequential so the per-chunk log lines form a readable
/// diagnostic trace. Every message ends up counted exactly once, whether its
/// chunk was transmitted or failed wholesale.
pub async fn dispatch(client: &dyn PushClient, messages: &[OutboundMessage]) -> DispatchResult {
    let mut result = DispatchResult::default();
    if messages.is_empty() {
        return result;
    }

    for (index, chunk) in messages.chunks(MAX_CHUNK_SIZE).enumerate() {
        match client.send_each(chunk).await {
            Ok(response) => {
                for (i, message) in chunk.iter().enumerate() {
                    match response.responses.get(i) {
                        Some(Ok(())) => result.success_count += 1,
                        Some(Err(e)) => result.record_failure(&message.token, e.to_string()),
                        None => result
                            .record_failure(&message.token, "no per-message result".to_string()),
                    }
                }
                tracing::info!(
                    chunk = index,
                    sent = chunk.len(),
                    failed = response.failure_count(),
                    "Dispatched notification chunk"
                );
            }
            Err(e) => {
                tracing::warn!(
                    chunk = index,
                    size = chunk.len(),
                    error = %e,
                    "Chunk send failed, continuing with remaining chunks"
                );
                for message in chunk {
                    result.record_failure(&message.token, e.to_string());
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::push::{BatchResponse, MessagePriority, PushError};

    fn message(n: usize) -> OutboundMessage {
        OutboundMessage {
            token: format!("token-{n}"),
            title: "t".to_string(),
            body: "b".to_string(),
            data: BTreeMap::new(),
            sound: None,
            priority: MessagePriority::Normal,
        }
    }

    fn messages(n: usize) -> Vec<OutboundMessage> {
        (0..n).map(message).collect()
    }

    /// Client that records chunk sizes and fails chosen chunks or messages.
    #[derive(Default)]
    struct ScriptedClient {
        chunk_sizes: Mutex<Vec<usize>>,
        calls: AtomicUsize,
        /// Chunk indexes that fail at the transport level.
        failing_chunks: Vec<usize>,
        /// Tokens that fail per-message within a transmitted chunk.
        failing_tokens: Vec<String>,
    }

    impl ScriptedClient {
        fn chunk_sizes(&self) -> Vec<usize> {
            self.chunk_sizes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PushClient for ScriptedClient {
        async fn send(&self, _message: &OutboundMessage) -> Result<(), PushError> {
            Ok(())
        }

        async fn send_each(
            &self,
            messages: &[OutboundMessage],
        ) -> Result<BatchResponse, PushError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.chunk_sizes.lock().unwrap().push(messages.len());
            if self.failing_chunks.contains(&call) {
                return Err(PushError::Transport("connection reset".to_string()));
            }
            Ok(BatchResponse {
                responses: messages
                    .iter()
                    .map(|m| {
                        if self.failing_tokens.contains(&m.token) {
                            Err(PushError::Unregistered)
                        } else {
                            Ok(())
                        }
                    })
                    .collect(),
            })
        }
    }

    #[tokio::test]
    async fn chunk_count_is_ceil_of_n_over_limit() {
        for (n, expected_chunks) in [(0usize, 0usize), (1, 1), (500, 1), (501, 2), (1200, 3)] {
            let client = ScriptedClient::default();
            let result = dispatch(&client, &messages(n)).await;
            assert_eq!(client.chunk_sizes().len(), expected_chunks, "n={n}");
            assert_eq!(result.total(), n, "n={n}");
            assert_eq!(result.failure_count, 0, "n={n}");
        }
    }

    #[tokio::test]
    async fn twelve_hundred_messages_split_500_500_200() {
        let client = ScriptedClient::default();
        let result = dispatch(&client, &messages(1200)).await;
        assert_eq!(client.chunk_sizes(), vec![500, 500, 200]);
        assert_eq!(result.success_count, 1200);
    }

    #[tokio::test]
    async fn transport_failure_of_one_chunk_does_not_abort_the_rest() {
        let client = ScriptedClient {
            failing_chunks: vec![1],
            ..ScriptedClient::default()
        };
        let result = dispatch(&client, &messages(1200)).await;

        // All three chunks were attempted.
        assert_eq!(client.chunk_sizes(), vec![500, 500, 200]);
        assert_eq!(result.success_count, 700);
        assert_eq!(result.failure_count, 500);
        assert_eq!(result.total(), 1200);
        assert!(result.failures.iter().all(|f| f.reason.contains("transport")));
    }

    #[tokio::test]
    async fn per_message_failures_are_aggregated_with_reasons() {
        let client = ScriptedClient {
            failing_tokens: vec!["token-3".to_string(), "token-7".to_string()],
            ..ScriptedClient::default()
        };
        let result = dispatch(&client, &messages(10)).await;

        assert_eq!(result.success_count, 8);
        assert_eq!(result.failure_count, 2);
        let failed_tokens: Vec<&str> = result.failures.iter().map(|f| f.token.as_str()).collect();
        assert_eq!(failed_tokens, ["token-3", "token-7"]);
        assert!(result.failures[0].reason.contains("no longer registered"));
    }

    #[tokio::test]
    async fn empty_input_sends_nothing() {
        let client = ScriptedClient::default();
        let result = dispatch(&client, &[]).await;
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert_eq!(result.total(), 0);
    }
}
