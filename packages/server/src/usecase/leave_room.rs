//! UseCase: leaving a room
//!
//! Removes the participant from the registry and, when others remain, sends
//! them the presence notification `{"join": true}`. The registry hands back a
//! snapshot of the remaining participants, so the notification is sent after
//! the registry lock has been released.

use std::sync::Arc;

use crate::domain::{ConnectionHandle, Departure, MessagePusher, Payload, RoomId, RoomRegistry};

pub struct LeaveRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Remove `connection` from `room_id`.
    ///
    /// Removing a connection that is not in the room changes nothing and
    /// notifies nobody, so concurrent disconnect paths may both call this.
    pub async fn execute(&self, room_id: &RoomId, connection: &ConnectionHandle) -> Departure {
        let departure = self.registry.leave(room_id, connection).await;

        if let Departure::Remaining(remaining) = &departure {
            let targets: Vec<ConnectionHandle> =
                remaining.iter().map(|p| p.connection.clone()).collect();
            let delivered = self
                .message_pusher
                .broadcast(&targets, &Payload::presence())
                .await;
            tracing::debug!(
                "Presence notification for room '{}' delivered to {}/{} participants",
                room_id,
                delivered,
                targets.len()
            );
        }

        departure
    }
}
