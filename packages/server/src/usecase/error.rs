//! UseCase errors.

use thiserror::Error;

use crate::domain::RegistryError;

/// Join failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
    #[error("connection is already in room '{0}'")]
    AlreadyJoined(String),
}

impl From<RegistryError> for JoinError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::RoomNotFound(room) => JoinError::RoomNotFound(room),
            RegistryError::AlreadyJoined { room, .. } => JoinError::AlreadyJoined(room),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteRoomError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}

/// Submitting to the relay dispatcher failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("relay dispatcher has stopped")]
    Closed,
}
