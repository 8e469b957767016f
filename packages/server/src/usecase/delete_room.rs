//! UseCase: administrative room deletion

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry};

use super::error::DeleteRoomError;

/// Deletes rooms without notifying their participants
pub struct DeleteRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl DeleteRoomUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<(), DeleteRoomError> {
        if self.registry.delete(room_id).await {
            Ok(())
        } else {
            Err(DeleteRoomError::RoomNotFound(room_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OUTBOUND_QUEUE_CAPACITY;
    use crate::{domain::ConnectionHandle, infrastructure::registry::InMemoryRoomRegistry};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_delete_occupied_room() {
        // given:
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = DeleteRoomUseCase::new(registry.clone());
        let room_id = registry.create_room().await;
        let (tx, mut rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
        registry
            .join(&room_id, true, ConnectionHandle::new(tx))
            .await
            .unwrap();

        // when:
        let result = usecase.execute(&room_id).await;

        // then: the room is gone and its participant got nothing
        assert!(result.is_ok());
        assert!(!registry.contains(&room_id).await);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_delete_unknown_room() {
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = DeleteRoomUseCase::new(registry);
        let room_id = RoomId::new("missing".to_string()).unwrap();

        assert_eq!(
            usecase.execute(&room_id).await,
            Err(DeleteRoomError::RoomNotFound("missing".to_string()))
        );
    }
}
