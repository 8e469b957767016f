//! UseCase: room list

use std::sync::Arc;

use crate::domain::{Room, RoomRegistry};

pub struct GetRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Snapshot of every live room, ordered by id
    pub async fn execute(&self) -> Vec<Room> {
        self.registry.rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::registry::InMemoryRoomRegistry;

    #[tokio::test]
    async fn test_get_rooms_sorted_by_id() {
        // given:
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = GetRoomsUseCase::new(registry.clone());
        for _ in 0..3 {
            registry.create_room().await;
        }

        // when:
        let rooms = usecase.execute().await;

        // then:
        assert_eq!(rooms.len(), 3);
        assert!(rooms.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[tokio::test]
    async fn test_get_rooms_empty() {
        let usecase = GetRoomsUseCase::new(Arc::new(InMemoryRoomRegistry::new()));
        assert!(usecase.execute().await.is_empty());
    }
}
