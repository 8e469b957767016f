//! WebSocket MessagePusher implementation.
//!
//! ## Responsibility
//!
//! Queue payloads on the outbound channel carried by each
//! [`ConnectionHandle`]. The channel is drained by the connection's writer task
//! in `ui::handler::websocket`, which is the only code that writes to the
//! socket. Pushing never blocks: a peer whose queue is full misses payloads until
//! it catches up, and the dispatcher moves on.

use async_trait::async_trait;

use crate::domain::{ConnectionHandle, MessagePushError, MessagePusher, Payload};

/// MessagePusher backed by the per-connection outbound queues
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketMessagePusher;

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn push_to(
        &self,
        target: &ConnectionHandle,
        payload: &Payload,
    ) -> Result<(), MessagePushError> {
        target.push(payload.clone())?;
        tracing::debug!("Pushed message to connection {}", target.id());
        Ok(())
    }

    async fn broadcast(&self, targets: &[ConnectionHandle], payload: &Payload) -> usize {
        let mut delivered = 0;

        for target in targets {
            // a failed recipient is skipped, the rest still get the payload
            match target.push(payload.clone()) {
                Ok(()) => {
                    delivered += 1;
                    tracing::debug!("Broadcasted message to connection {}", target.id());
                }
                Err(e) => {
                    tracing::warn!("Failed to push message to connection {}: {}", target.id(), e);
                }
            }
        }

        delivered
    }
}
