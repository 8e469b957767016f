//! Domain layer: value objects, entities and the interfaces the use cases
//! depend on.
//!
//! Implementations of [`RoomRegistry`] and [`MessagePusher`] live in the
//! infrastructure layer.

pub mod connection;
pub mod entity;
pub mod error;
pub mod pusher;
pub mod registry;
pub mod value_object;

pub use connection::{
    ConnectionHandle, ConnectionId, ConnectionState, OUTBOUND_QUEUE_CAPACITY, PusherChannel,
};
pub use entity::{Participant, Room};
pub use error::{MessagePushError, RegistryError, ValueObjectError};
pub use pusher::MessagePusher;
pub use registry::{Departure, RoomRegistry};
pub use value_object::{Payload, RoomId, RoomIdFactory, Timestamp};
