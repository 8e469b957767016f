//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{CreateRoomResponse, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::{DeleteRoomError, GetRoomDetailError},
};

/// Create an empty room and return its id
pub async fn create_room(State(state): State<Arc<AppState>>) -> Json<CreateRoomResponse> {
    let room_id = state.create_room_usecase.execute().await;
    Json(CreateRoomResponse {
        room_id: room_id.into_string(),
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = parse_room_id(room_id)?;

    match state.get_room_detail_usecase.execute(&room_id).await {
        Ok(room) => Ok(Json(RoomDetailDto::from(&room))),
        Err(GetRoomDetailError::RoomNotFound(_)) => Err(StatusCode::NOT_FOUND),
    }
}

/// Delete a room without notifying its participants
pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> StatusCode {
    let room_id = match parse_room_id(room_id) {
        Ok(room_id) => room_id,
        Err(status) => return status,
    };

    match state.delete_room_usecase.execute(&room_id).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(DeleteRoomError::RoomNotFound(_)) => StatusCode::NOT_FOUND,
    }
}

fn parse_room_id(value: String) -> Result<RoomId, StatusCode> {
    RoomId::try_from(value).map_err(|e| {
        tracing::warn!("Invalid room id: {}", e);
        StatusCode::BAD_REQUEST
    })
}
