//! UseCase: relaying messages to the other participants of a room
//!
//! ## Design notes
//!
//! Every connection's read loop submits [`InboundMessage`]s to one bounded
//! queue. A single worker task drains that queue and fans each message out to
//! every participant of the room except the sender, one message at a time.
//! Because the queue is FIFO and there is one consumer, messages from one
//! sender reach every recipient in the order they were sent.
//!
//! The worker only hands payloads to the [`MessagePusher`]; the socket writes
//! happen in each connection's writer task. A recipient that cannot be reached
//! is logged and skipped.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::domain::{ConnectionHandle, MessagePusher, Payload, RoomId, RoomRegistry};

use super::error::DispatchError;

/// A frame received from a participant, waiting to be relayed
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub sender: ConnectionHandle,
    pub room_id: RoomId,
    pub payload: Payload,
}

/// Producer side of the relay queue.
///
/// Cheap to clone; every read loop holds one. The worker stops once every
/// clone has been dropped and the queue is empty.
#[derive(Debug, Clone)]
pub struct RelayDispatcher {
    ingress: mpsc::Sender<InboundMessage>,
}

impl RelayDispatcher {
    /// Start the dispatch worker.
    ///
    /// # Arguments
    ///
    /// * `registry` - Room membership source
    /// * `message_pusher` - Delivery of payloads to recipients
    /// * `capacity` - Queue length before submitters have to wait (at least 1)
    pub fn spawn(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let (ingress, queue) = mpsc::channel(capacity.max(1));
        let worker = DispatchWorker {
            registry,
            message_pusher,
        };
        let handle = tokio::spawn(worker.run(queue));
        (Self { ingress }, handle)
    }

    /// Queue a message for relaying, waiting while the queue is full
    pub async fn submit(&self, message: InboundMessage) -> Result<(), DispatchError> {
        self.ingress
            .send(message)
            .await
            .map_err(|_| DispatchError::Closed)
    }
}

struct DispatchWorker {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DispatchWorker {
    async fn run(self, mut queue: mpsc::Receiver<InboundMessage>) {
        tracing::info!("Relay dispatcher started");
        while let Some(message) = queue.recv().await {
            self.relay(message).await;
        }
        tracing::info!("Relay dispatcher stopped");
    }

    /// Fan a message out to the room, returning how many recipients got it
    async fn relay(&self, message: InboundMessage) -> usize {
        let recipients: Vec<ConnectionHandle> = self
            .registry
            .lookup(&message.room_id)
            .await
            .into_iter()
            .filter(|p| !p.is(&message.sender))
            .map(|p| p.connection)
            .collect();

        if recipients.is_empty() {
            tracing::debug!(
                "No recipients in room '{}' for message from {}",
                message.room_id,
                message.sender.id()
            );
            return 0;
        }

        let delivered = self
            .message_pusher
            .broadcast(&recipients, &message.payload)
            .await;
        tracing::debug!(
            "Relayed message from {} in room '{}' to {}/{} participants",
            message.sender.id(),
            message.room_id,
            delivered,
            recipients.len()
        );
        delivered
    }
}
