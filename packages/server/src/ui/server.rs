//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{any, get},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;

use super::{
    handler::{create_room, delete_room, get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Signaling relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(AppState::new(registry, message_pusher, dispatcher));
/// server.run(&ServerConfig::default()).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router with every route and middleware
    pub fn router(&self) -> Router {
        // any origin may create rooms and open the upgrade
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            // WebSocket endpoint
            .route("/join", get(websocket_handler))
            // HTTP endpoints
            .route("/create", any(create_room))
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail).delete(delete_room))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Bind to the configured address and serve until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the address or if
    /// there's an error during server execution.
    pub async fn run(self, config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Signaling relay listening on {}", listener.local_addr()?);
        tracing::info!("Create rooms at http://{}/create", bind_addr);
        tracing::info!("Join rooms at ws://{}/join?roomID=<room id>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve_with_shutdown(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `signal` resolves
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(signal)
            .await
    }
}
