//! UseCase layer.
//!
//! Each use case depends only on the domain traits ([`RoomRegistry`] and
//! [`MessagePusher`]) and is shared behind an `Arc` by the UI layer.
//!
//! [`RoomRegistry`]: crate::domain::RoomRegistry
//! [`MessagePusher`]: crate::domain::MessagePusher

mod create_room;
mod delete_room;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod leave_room;
mod relay_dispatcher;

pub use create_room::CreateRoomUseCase;
pub use delete_room::DeleteRoomUseCase;
pub use error::{DeleteRoomError, DispatchError, GetRoomDetailError, JoinError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use relay_dispatcher::{InboundMessage, RelayDispatcher};
