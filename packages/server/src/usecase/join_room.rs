//! UseCase: joining a room
//!
//! Joining never creates a room: the room must have been created beforehand
//! through [`CreateRoomUseCase`](super::CreateRoomUseCase). A join for an
//! unknown room is reported back to the client instead of silently creating
//! one.

use std::sync::Arc;

use crate::domain::{ConnectionHandle, RoomId, RoomRegistry, Timestamp};

use super::error::JoinError;

pub struct JoinRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl JoinRoomUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Whether a join for `room_id` can currently succeed.
    ///
    /// Used to reject a connection upgrade early; the room may still vanish
    /// before [`JoinRoomUseCase::execute`] runs.
    pub async fn room_exists(&self, room_id: &RoomId) -> bool {
        self.registry.contains(room_id).await
    }

    /// Register `connection` in `room_id`
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - join time
    /// * `Err(JoinError)` - the room does not exist or the connection is already in a room
    pub async fn execute(
        &self,
        room_id: &RoomId,
        is_host: bool,
        connection: ConnectionHandle,
    ) -> Result<Timestamp, JoinError> {
        Ok(self.registry.join(room_id, is_host, connection).await?)
    }
}
