//! Message delivery implementations.
//!
//! - `websocket`: hands payloads to a connection's outbound queue, which its
//!   WebSocket writer task drains

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
