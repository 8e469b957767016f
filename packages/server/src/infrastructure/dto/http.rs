//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Response of the room creation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: String,
}

/// Room list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub participant_count: usize,
    pub host_count: usize,
}

/// Room detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub participants: Vec<ParticipantDetailDto>,
}

/// Participant as shown in a room detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDetailDto {
    pub connection_id: String,
    pub is_host: bool,
    /// RFC 3339, UTC
    pub joined_at: String,
}
