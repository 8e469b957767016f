//! In-memory RoomRegistry implementation.
//!
//! A `HashMap` of rooms behind a single `tokio::sync::RwLock`. Reads share the
//! lock, mutations take it exclusively, and no method awaits anything other
//! than the lock itself while holding it.
//!
//! Room ids are drawn from a `StdRng` seeded once from OS entropy when the
//! registry is built. The generator lives inside the locked state so that
//! creating a room draws the id and inserts it atomically.
//!
//! `members` indexes which room each joined connection is in, so joins check
//! for duplicates without scanning every room.

use std::collections::HashMap;

use async_trait::async_trait;
use rand::{SeedableRng, rngs::StdRng};
use tokio::sync::RwLock;

use crate::domain::{
    ConnectionHandle, ConnectionId, Departure, Participant, RegistryError, Room, RoomId,
    RoomIdFactory, RoomRegistry, Timestamp,
};

struct Rooms {
    map: HashMap<RoomId, Room>,
    members: HashMap<ConnectionId, RoomId>,
    rng: StdRng,
}

/// In-memory room registry
pub struct InMemoryRoomRegistry {
    rooms: RwLock<Rooms>,
}

impl InMemoryRoomRegistry {
    /// Create an empty registry with an entropy-seeded id generator
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty registry drawing room ids from `rng`
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rooms: RwLock::new(Rooms {
                map: HashMap::new(),
                members: HashMap::new(),
                rng,
            }),
        }
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn create_room(&self) -> RoomId {
        let mut rooms = self.rooms.write().await;
        let Rooms { map, rng, .. } = &mut *rooms;

        let room_id = loop {
            let candidate = RoomIdFactory::generate(&mut *rng);
            if !map.contains_key(&candidate) {
                break candidate;
            }
            tracing::debug!("Room id '{}' already in use, drawing again", candidate);
        };
        map.insert(room_id.clone(), Room::new(room_id.clone()));

        tracing::info!("Room '{}' created ({} rooms live)", room_id, map.len());
        room_id
    }

    async fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.read().await.map.contains_key(room_id)
    }

    async fn lookup(&self, room_id: &RoomId) -> Vec<Participant> {
        let rooms = self.rooms.read().await;
        rooms
            .map
            .get(room_id)
            .map(|room| room.participants.clone())
            .unwrap_or_default()
    }

    async fn join(
        &self,
        room_id: &RoomId,
        is_host: bool,
        connection: ConnectionHandle,
    ) -> Result<Timestamp, RegistryError> {
        let mut rooms = self.rooms.write().await;
        let Rooms { map, members, .. } = &mut *rooms;
        let connection_id = connection.id();

        if let Some(current) = members.get(&connection_id) {
            return Err(RegistryError::AlreadyJoined {
                connection: connection_id.to_string(),
                room: current.to_string(),
            });
        }

        let room = map
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.to_string()))?;

        let joined_at = Timestamp::now();
        room.add_participant(Participant::new(connection, is_host, joined_at));
        members.insert(connection_id, room_id.clone());

        tracing::info!(
            "Connection {} joined room '{}' as {} ({} participants)",
            connection_id,
            room_id,
            if is_host { "host" } else { "guest" },
            room.participants.len()
        );
        Ok(joined_at)
    }

    async fn leave(&self, room_id: &RoomId, connection: &ConnectionHandle) -> Departure {
        let mut rooms = self.rooms.write().await;
        let Rooms { map, members, .. } = &mut *rooms;

        let Some(room) = map.get_mut(room_id) else {
            tracing::debug!("Leave for unknown room '{}' ignored", room_id);
            return Departure::NotInRoom;
        };
        if room.remove_participant(connection).is_none() {
            tracing::debug!(
                "Connection {} is not in room '{}', nothing to remove",
                connection.id(),
                room_id
            );
            return Departure::NotInRoom;
        }
        members.remove(&connection.id());

        if room.is_empty() {
            map.remove(room_id);
            tracing::info!(
                "Connection {} left room '{}'; room is empty and was deleted",
                connection.id(),
                room_id
            );
            Departure::RoomClosed
        } else {
            tracing::info!(
                "Connection {} left room '{}' ({} participants remain)",
                connection.id(),
                room_id,
                room.participants.len()
            );
            Departure::Remaining(room.participants.clone())
        }
    }

    async fn delete(&self, room_id: &RoomId) -> bool {
        let mut rooms = self.rooms.write().await;
        let Rooms { map, members, .. } = &mut *rooms;

        match map.remove(room_id) {
            Some(room) => {
                for participant in &room.participants {
                    members.remove(&participant.connection.id());
                }
                tracing::info!(
                    "Room '{}' deleted with {} participants",
                    room_id,
                    room.participants.len()
                );
                true
            }
            None => false,
        }
    }

    async fn room(&self, room_id: &RoomId) -> Option<Room> {
        self.rooms.read().await.map.get(room_id).cloned()
    }

    async fn rooms(&self) -> Vec<Room> {
        let mut snapshot: Vec<Room> = self.rooms.read().await.map.values().cloned().collect();
        snapshot.sort_by(|a, b| a.id.cmp(&b.id));
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use super::*;
    use crate::domain::OUTBOUND_QUEUE_CAPACITY;
    use crate::domain::Payload;
    use tokio::sync::mpsc;

    // Covered here:
    // - room creation, id uniqueness and lookup of unknown rooms
    // - join rejects unknown rooms and duplicate connections
    // - leave by identity, room deletion on last leave, idempotent leave
    // - participant count tracks joins minus leaves
    // - concurrent joins land exactly once

    fn create_handle() -> (ConnectionHandle, mpsc::Receiver<Payload>) {
        let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
        (ConnectionHandle::new(tx), rx)
    }

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_room_inserts_empty_room() {
        // given:
        let registry = InMemoryRoomRegistry::new();

        // when:
        let room_id = registry.create_room().await;

        // then:
        assert!(registry.contains(&room_id).await);
        assert!(registry.lookup(&room_id).await.is_empty());
        assert_eq!(room_id.as_str().len(), 8);
    }

    #[tokio::test]
    async fn test_create_room_ids_do_not_collide() {
        // given:
        let registry = InMemoryRoomRegistry::new();

        // when:
        let mut ids = HashSet::new();
        for _ in 0..10_000 {
            ids.insert(registry.create_room().await);
        }

        // then:
        assert_eq!(ids.len(), 10_000);
        assert_eq!(registry.rooms().await.len(), 10_000);
    }

    #[tokio::test]
    async fn test_ids_come_from_one_seeded_generator() {
        // given: a registry and a replay of the generator it was built with
        let registry = InMemoryRoomRegistry::with_rng(StdRng::seed_from_u64(42));
        let mut replay = StdRng::seed_from_u64(42);

        // when:
        let first = registry.create_room().await;
        let second = registry.create_room().await;

        // then: successive rooms continue the same sequence instead of reseeding
        assert_eq!(first, RoomIdFactory::generate(&mut replay));
        assert_eq!(second, RoomIdFactory::generate(&mut replay));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_lookup_unknown_room_is_empty() {
        let registry = InMemoryRoomRegistry::new();
        assert!(registry.lookup(&room_id("missing")).await.is_empty());
    }

    #[tokio::test]
    async fn test_join_appends_in_order() {
        // given:
        let registry = InMemoryRoomRegistry::new();
        let room_id = registry.create_room().await;
        let (host, _host_rx) = create_handle();
        let (guest, _guest_rx) = create_handle();

        // when:
        registry.join(&room_id, true, host.clone()).await.unwrap();
        registry.join(&room_id, false, guest.clone()).await.unwrap();

        // then:
        let participants = registry.lookup(&room_id).await;
        assert_eq!(participants.len(), 2);
        assert!(participants[0].is(&host) && participants[0].is_host);
        assert!(participants[1].is(&guest) && !participants[1].is_host);
    }

    #[tokio::test]
    async fn test_join_unknown_room_fails() {
        // given:
        let registry = InMemoryRoomRegistry::new();
        let (handle, _rx) = create_handle();

        // when:
        let result = registry.join(&room_id("nowhere"), false, handle).await;

        // then: the room is not created implicitly
        assert_eq!(result, Err(RegistryError::RoomNotFound("nowhere".to_string())));
        assert!(!registry.contains(&room_id("nowhere")).await);
    }

    #[tokio::test]
    async fn test_join_twice_fails() {
        // given:
        let registry = InMemoryRoomRegistry::new();
        let first_room = registry.create_room().await;
        let second_room = registry.create_room().await;
        let (handle, _rx) = create_handle();
        registry.join(&first_room, false, handle.clone()).await.unwrap();

        // when:
        let same_room = registry.join(&first_room, false, handle.clone()).await;
        let other_room = registry.join(&second_room, false, handle.clone()).await;

        // then:
        assert!(matches!(same_room, Err(RegistryError::AlreadyJoined { .. })));
        assert!(matches!(other_room, Err(RegistryError::AlreadyJoined { .. })));
        assert_eq!(registry.lookup(&first_room).await.len(), 1);
        assert!(registry.lookup(&second_room).await.is_empty());
    }

    #[tokio::test]
    async fn test_leave_returns_remaining_participants() {
        // given:
        let registry = InMemoryRoomRegistry::new();
        let room_id = registry.create_room().await;
        let (alice, _a) = create_handle();
        let (bob, _b) = create_handle();
        let (charlie, _c) = create_handle();
        for handle in [&alice, &bob, &charlie] {
            registry.join(&room_id, false, handle.clone()).await.unwrap();
        }

        // when:
        let departure = registry.leave(&room_id, &bob).await;

        // then:
        let remaining = match departure {
            Departure::Remaining(remaining) => remaining,
            other => panic!("expected remaining participants, got {:?}", other),
        };
        assert_eq!(remaining.len(), 2);
        assert!(remaining[0].is(&alice));
        assert!(remaining[1].is(&charlie));
        assert_eq!(registry.lookup(&room_id).await.len(), 2);
    }

    #[tokio::test]
    async fn test_last_leave_deletes_room() {
        // given:
        let registry = InMemoryRoomRegistry::new();
        let room_id = registry.create_room().await;
        let (alice, _rx) = create_handle();
        registry.join(&room_id, true, alice.clone()).await.unwrap();

        // when:
        let departure = registry.leave(&room_id, &alice).await;

        // then:
        assert!(matches!(departure, Departure::RoomClosed));
        assert!(!registry.contains(&room_id).await);
        assert!(registry.lookup(&room_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_leave_unknown_connection_is_noop() {
        // given:
        let registry = InMemoryRoomRegistry::new();
        let room_id = registry.create_room().await;
        let (alice, _a) = create_handle();
        let (stranger, _s) = create_handle();
        registry.join(&room_id, false, alice.clone()).await.unwrap();

        // when:
        let departure = registry.leave(&room_id, &stranger).await;

        // then:
        assert!(matches!(departure, Departure::NotInRoom));
        assert!(registry.contains(&room_id).await);
        assert_eq!(registry.lookup(&room_id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_double_leave_is_noop() {
        let registry = InMemoryRoomRegistry::new();
        let room_id = registry.create_room().await;
        let (alice, _a) = create_handle();
        let (bob, _b) = create_handle();
        registry.join(&room_id, false, alice.clone()).await.unwrap();
        registry.join(&room_id, false, bob.clone()).await.unwrap();

        assert!(matches!(registry.leave(&room_id, &alice).await, Departure::Remaining(_)));
        assert!(matches!(registry.leave(&room_id, &alice).await, Departure::NotInRoom));
        assert_eq!(registry.lookup(&room_id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_leave_unknown_room_is_noop() {
        let registry = InMemoryRoomRegistry::new();
        let (alice, _a) = create_handle();

        assert!(matches!(
            registry.leave(&room_id("missing"), &alice).await,
            Departure::NotInRoom
        ));
        assert!(registry.rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_count_tracks_joins_minus_leaves() {
        // given:
        let registry = InMemoryRoomRegistry::new();
        let room_id = registry.create_room().await;
        let handles: Vec<_> = (0..5).map(|_| create_handle()).collect();

        // when / then: interleave joins and leaves and check after each step
        let mut expected = 0usize;
        for (handle, _) in &handles {
            registry.join(&room_id, false, handle.clone()).await.unwrap();
            expected += 1;
            assert_eq!(registry.lookup(&room_id).await.len(), expected);
        }
        for (handle, _) in &handles {
            registry.leave(&room_id, handle).await;
            expected -= 1;
            assert_eq!(registry.lookup(&room_id).await.len(), expected);
            assert_eq!(registry.contains(&room_id).await, expected > 0);
        }
    }

    #[tokio::test]
    async fn test_delete_removes_room_and_participants() {
        // given:
        let registry = InMemoryRoomRegistry::new();
        let room_id = registry.create_room().await;
        let (alice, mut alice_rx) = create_handle();
        registry.join(&room_id, false, alice.clone()).await.unwrap();

        // when:
        let deleted = registry.delete(&room_id).await;

        // then: nobody is notified
        assert!(deleted);
        assert!(!registry.contains(&room_id).await);
        assert!(alice_rx.try_recv().is_err());
        assert!(!registry.delete(&room_id).await);
    }

    #[tokio::test]
    async fn test_connection_can_join_again_after_leaving() {
        // given:
        let registry = InMemoryRoomRegistry::new();
        let first = registry.create_room().await;
        let second = registry.create_room().await;
        let (alice, _a) = create_handle();
        let (bob, _b) = create_handle();
        registry.join(&first, false, alice.clone()).await.unwrap();
        registry.join(&first, false, bob.clone()).await.unwrap();

        // when:
        registry.leave(&first, &alice).await;
        let result = registry.join(&second, false, alice.clone()).await;

        // then:
        assert!(result.is_ok());
        assert!(registry.lookup(&second).await[0].is(&alice));
    }

    #[tokio::test]
    async fn test_connection_can_join_again_after_room_deleted() {
        // given:
        let registry = InMemoryRoomRegistry::new();
        let first = registry.create_room().await;
        let second = registry.create_room().await;
        let (alice, _a) = create_handle();
        registry.join(&first, false, alice.clone()).await.unwrap();

        // when:
        registry.delete(&first).await;
        let result = registry.join(&second, false, alice.clone()).await;

        // then: the deleted room no longer claims the connection
        assert!(result.is_ok());
        assert_eq!(registry.lookup(&second).await.len(), 1);
    }

    #[tokio::test]
    async fn test_room_snapshot() {
        let registry = InMemoryRoomRegistry::new();
        let id = registry.create_room().await;
        let (alice, _a) = create_handle();
        registry.join(&id, true, alice.clone()).await.unwrap();

        let room = registry.room(&id).await.unwrap();

        assert_eq!(room.id, id);
        assert_eq!(room.host_count(), 1);
        assert!(registry.room(&room_id("missing")).await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_joins_land_exactly_once() {
        // given:
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let room_id = registry.create_room().await;
        let handles: Vec<_> = (0..64).map(|_| create_handle()).collect();

        // when:
        let mut tasks = Vec::new();
        for (handle, _) in &handles {
            let registry = registry.clone();
            let room_id = room_id.clone();
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move {
                registry.join(&room_id, false, handle).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        // then:
        let participants = registry.lookup(&room_id).await;
        assert_eq!(participants.len(), handles.len());
        for (handle, _) in &handles {
            assert_eq!(participants.iter().filter(|p| p.is(handle)).count(), 1);
        }
    }
}
