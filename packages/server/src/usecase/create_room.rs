//! UseCase: room creation

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry};

/// Creates empty rooms
pub struct CreateRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl CreateRoomUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Create an empty room and return its freshly generated id
    pub async fn execute(&self) -> RoomId {
        self.registry.create_room().await
    }
}
