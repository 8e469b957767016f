//! RoomRegistry trait.
//!
//! The registry is the only shared mutable state of the relay: a mapping from
//! room id to the participants currently in that room. The use cases depend on
//! this trait; the concrete storage is provided by the infrastructure layer.

use async_trait::async_trait;

use super::{ConnectionHandle, Participant, RegistryError, Room, RoomId, Timestamp};

/// Outcome of removing a connection from a room
#[derive(Debug, Clone)]
pub enum Departure {
    /// The connection was not in the room, or the room does not exist.
    /// Nothing changed.
    NotInRoom,
    /// The connection was the last participant; the room has been deleted.
    RoomClosed,
    /// The connection was removed. Holds a snapshot of the remaining
    /// participants taken before the registry lock was released.
    Remaining(Vec<Participant>),
}

/// Room registry
///
/// ## Invariants
///
/// - a participant is in at most one room, at most once
/// - a room is deleted as soon as its last participant leaves
/// - implementations never perform I/O while holding their lock
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Create an empty room with a fresh, registry-unique id
    async fn create_room(&self) -> RoomId;

    /// Whether the room currently exists
    async fn contains(&self, room_id: &RoomId) -> bool;

    /// Participants of the room in join order, empty if it does not exist
    async fn lookup(&self, room_id: &RoomId) -> Vec<Participant>;

    /// Add a connection to an existing room.
    ///
    /// Fails with [`RegistryError::RoomNotFound`] if the room does not exist
    /// and [`RegistryError::AlreadyJoined`] if the connection is already in a room.
    async fn join(
        &self,
        room_id: &RoomId,
        is_host: bool,
        connection: ConnectionHandle,
    ) -> Result<Timestamp, RegistryError>;

    /// Remove a connection from a room, deleting the room if it becomes empty
    async fn leave(&self, room_id: &RoomId, connection: &ConnectionHandle) -> Departure;

    /// Remove a room and all of its participants without notifying them.
    /// Returns `false` if there was no such room.
    async fn delete(&self, room_id: &RoomId) -> bool;

    /// Snapshot of one room
    async fn room(&self, room_id: &RoomId) -> Option<Room>;

    /// Snapshot of every room, ordered by id
    async fn rooms(&self) -> Vec<Room>;
}
