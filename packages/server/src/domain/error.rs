//! Domain errors.

use thiserror::Error;

/// Validation errors of value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room id must not be empty")]
    RoomIdEmpty,
    #[error("room id must be at most {0} bytes")]
    RoomIdTooLong(usize),
}

/// Errors returned by a [`RoomRegistry`](super::RoomRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
    #[error("connection {connection} is already in room '{room}'")]
    AlreadyJoined { connection: String, room: String },
}

/// Errors returned when handing a payload to a connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection {0} is closed")]
    ConnectionClosed(String),
    #[error("outbound queue of connection {0} is full")]
    QueueFull(String),
}
