//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::{MessagePusher, RoomRegistry},
    usecase::{
        CreateRoomUseCase, DeleteRoomUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
        JoinRoomUseCase, LeaveRoomUseCase, RelayDispatcher,
    },
};

/// Shared application state
pub struct AppState {
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub delete_room_usecase: Arc<DeleteRoomUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// Replies addressed to a single connection, such as error frames
    pub message_pusher: Arc<dyn MessagePusher>,
    /// Producer side of the relay queue, cloned into every read loop
    pub dispatcher: RelayDispatcher,
}

impl AppState {
    /// Wire every use case to the given registry and pusher.
    ///
    /// `dispatcher` must have been spawned on the same registry.
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        dispatcher: RelayDispatcher,
    ) -> Self {
        Self {
            create_room_usecase: Arc::new(CreateRoomUseCase::new(registry.clone())),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(registry.clone())),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            delete_room_usecase: Arc::new(DeleteRoomUseCase::new(registry.clone())),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(registry.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(registry)),
            message_pusher,
            dispatcher,
        }
    }
}
