//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: frames the relay synthesizes itself
//! - `http`: HTTP API request and response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
