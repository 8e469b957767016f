//! WebRTC signaling relay server.
//!
//! Hands out room IDs over HTTP and relays every JSON frame a participant
//! sends to the other participants of its room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin huddle-server
//! cargo run --bin huddle-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use huddle_server::{
    config::{DEFAULT_QUEUE_CAPACITY, ServerConfig},
    domain::{MessagePusher, RoomRegistry},
    infrastructure::{message_pusher::WebSocketMessagePusher, registry::InMemoryRoomRegistry},
    ui::{AppState, Server},
    usecase::RelayDispatcher,
};
use huddle_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "huddle-server")]
#[command(about = "WebRTC signaling relay over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Messages the relay queue holds before senders wait
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig::new(args.host, args.port, args.queue_capacity);

    // Initialize dependencies in order:
    // 1. Registry
    // 2. MessagePusher
    // 3. RelayDispatcher
    // 4. AppState (use cases)
    // 5. Server

    // 1. Create Registry (in-memory)
    let registry: Arc<dyn RoomRegistry> = Arc::new(InMemoryRoomRegistry::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());

    // 3. Start the relay worker
    let (dispatcher, _worker) = RelayDispatcher::spawn(
        registry.clone(),
        message_pusher.clone(),
        config.queue_capacity,
    );

    // 4. Wire the use cases
    let state = AppState::new(registry, message_pusher, dispatcher);

    // 5. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(&config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
