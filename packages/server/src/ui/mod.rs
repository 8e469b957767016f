//! Relay server: HTTP routes and the WebSocket transport.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
