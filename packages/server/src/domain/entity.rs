//! Entities.

use super::{
    connection::ConnectionHandle,
    value_object::{RoomId, Timestamp},
};

/// A connection taking part in a room
#[derive(Debug, Clone)]
pub struct Participant {
    pub connection: ConnectionHandle,
    pub is_host: bool,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(connection: ConnectionHandle, is_host: bool, joined_at: Timestamp) -> Self {
        Self {
            connection,
            is_host,
            joined_at,
        }
    }

    /// Whether this participant is the given connection (identity comparison)
    pub fn is(&self, connection: &ConnectionHandle) -> bool {
        &self.connection == connection
    }
}

/// A room and its participants in join order
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub participants: Vec<Participant>,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            participants: Vec::new(),
        }
    }

    pub fn contains(&self, connection: &ConnectionHandle) -> bool {
        self.participants.iter().any(|p| p.is(connection))
    }

    /// Append a participant. Callers check [`Room::contains`] first.
    pub fn add_participant(&mut self, participant: Participant) {
        self.participants.push(participant);
    }

    /// Remove the participant for `connection`, keeping the order of the rest.
    pub fn remove_participant(&mut self, connection: &ConnectionHandle) -> Option<Participant> {
        let index = self.participants.iter().position(|p| p.is(connection))?;
        Some(self.participants.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn host_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_host).count()
    }
}
