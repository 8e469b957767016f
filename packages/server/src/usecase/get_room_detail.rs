//! UseCase: room detail

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRegistry};

use super::error::GetRoomDetailError;

pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<Room, GetRoomDetailError> {
        self.registry
            .room(room_id)
            .await
            .ok_or_else(|| GetRoomDetailError::RoomNotFound(room_id.to_string()))
    }
}
