//! Conversion logic between DTOs and domain entities.

use serde_json::{Map, Value};

use crate::domain::{Participant, Payload, Room};
use crate::infrastructure::dto::{http, websocket};
use huddle_shared::time::timestamp_to_rfc3339;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&Room> for http::RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            participant_count: room.participants.len(),
            host_count: room.host_count(),
        }
    }
}

impl From<&Room> for http::RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            participants: room
                .participants
                .iter()
                .map(http::ParticipantDetailDto::from)
                .collect(),
        }
    }
}

impl From<&Participant> for http::ParticipantDetailDto {
    fn from(participant: &Participant) -> Self {
        let joined_at = participant.joined_at.value();
        Self {
            connection_id: participant.connection.id().to_string(),
            is_host: participant.is_host,
            joined_at: timestamp_to_rfc3339(joined_at).unwrap_or_else(|| joined_at.to_string()),
        }
    }
}

// ========================================
// DTO → Domain
// ========================================

impl From<websocket::ErrorFrame> for Payload {
    fn from(frame: websocket::ErrorFrame) -> Self {
        let mut fields = Map::new();
        fields.insert("error".to_string(), Value::String(frame.error));
        Payload::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OUTBOUND_QUEUE_CAPACITY;
    use crate::domain::{ConnectionHandle, RoomId, Timestamp};
    use tokio::sync::mpsc;

    fn create_room() -> Room {
        let mut room = Room::new(RoomId::new("r1".to_string()).unwrap());
        for (is_host, joined_at) in [(true, 1672531200000), (false, 1672531200500)] {
            let (tx, _rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
            room.add_participant(Participant::new(
                ConnectionHandle::new(tx),
                is_host,
                Timestamp::new(joined_at),
            ));
        }
        room
    }

    #[test]
    fn test_room_to_summary() {
        let summary = http::RoomSummaryDto::from(&create_room());

        assert_eq!(
            summary,
            http::RoomSummaryDto {
                id: "r1".to_string(),
                participant_count: 2,
                host_count: 1,
            }
        );
    }

    #[test]
    fn test_room_to_detail() {
        // given:
        let room = create_room();

        // when:
        let detail = http::RoomDetailDto::from(&room);

        // then:
        assert_eq!(detail.id, "r1");
        assert_eq!(detail.participants.len(), 2);
        assert!(detail.participants[0].is_host);
        assert_eq!(detail.participants[0].joined_at, "2023-01-01T00:00:00.000Z");
        assert_eq!(detail.participants[1].joined_at, "2023-01-01T00:00:00.500Z");
        assert_eq!(
            detail.participants[0].connection_id,
            room.participants[0].connection.id().to_string()
        );
    }

    #[test]
    fn test_error_frame_to_payload() {
        let payload = Payload::from(websocket::ErrorFrame::malformed("expected value"));
        assert_eq!(
            payload.to_string(),
            r#"{"error":"malformed frame: expected value"}"#
        );
    }
}
