//! WebSocket connection handlers.
//!
//! Every upgraded connection runs two tasks:
//!
//! - a read loop that parses inbound frames and submits them to the relay
//!   dispatcher
//! - a writer (`pusher_loop`) that drains the connection's outbound queue into
//!   the socket; it is the only code that writes to the socket
//!
//! When either task ends the other is aborted and the connection leaves its
//! room.

use std::{fmt::Display, sync::Arc};

use axum::{
    extract::{
        Query, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::{Sink, SinkExt},
    stream::{Stream, StreamExt},
};
use serde::Deserialize;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{
        ConnectionHandle, ConnectionId, ConnectionState, Departure, MessagePusher,
        OUTBOUND_QUEUE_CAPACITY, Payload, RoomId,
    },
    infrastructure::dto::websocket::ErrorFrame,
    ui::state::AppState,
    usecase::{InboundMessage, RelayDispatcher},
};

/// Query parameters for the join upgrade
#[derive(Debug, Deserialize)]
pub struct JoinQuery {
    #[serde(rename = "roomID")]
    pub room_id: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<JoinQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let Some(room_id_str) = query.room_id else {
        tracing::warn!("roomID missing in join request");
        return Err(StatusCode::BAD_REQUEST);
    };

    // Convert String -> RoomId (Domain Model)
    let room_id = match RoomId::try_from(room_id_str) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Invalid roomID in join request: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    if !state.join_room_usecase.room_exists(&room_id).await {
        tracing::warn!("Join rejected: room '{}' does not exist", room_id);
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(ws
        .on_failed_upgrade(|e| tracing::warn!("WebSocket upgrade failed: {}", e))
        .on_upgrade(move |socket| handle_socket(socket, state, room_id)))
}

/// Tracks and logs the lifecycle of one connection
struct Lifecycle {
    connection_id: ConnectionId,
    state: ConnectionState,
}

impl Lifecycle {
    fn new(connection_id: ConnectionId) -> Self {
        Self {
            connection_id,
            state: ConnectionState::Connecting,
        }
    }

    fn advance(&mut self, next: ConnectionState) {
        if !self.state.can_transition_to(next) {
            tracing::warn!(
                "Connection {}: unexpected transition {} -> {}",
                self.connection_id,
                self.state,
                next
            );
        }
        tracing::debug!(
            "Connection {}: {} -> {}",
            self.connection_id,
            self.state,
            next
        );
        self.state = next;
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_id: RoomId) {
    let (sender, receiver) = socket.split();
    serve_connection(sender, receiver, state, room_id).await;
}

/// Run one connection from join to removal over the two socket halves.
///
/// Returns once the connection has left its room, whichever side ended it:
/// a close frame, a read error, or a failed write.
async fn serve_connection<S, R, E>(
    mut sender: S,
    receiver: R,
    state: Arc<AppState>,
    room_id: RoomId,
) where
    S: Sink<Message> + Unpin + Send + 'static,
    S::Error: Display + Send,
    R: Stream<Item = Result<Message, E>> + Unpin + Send + 'static,
    E: Display + Send + 'static,
{
    let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
    let connection = ConnectionHandle::new(tx);
    let mut lifecycle = Lifecycle::new(connection.id());

    // Upgrades are only accepted for rooms as non-host participants
    if let Err(e) = state
        .join_room_usecase
        .execute(&room_id, false, connection.clone())
        .await
    {
        tracing::warn!("Connection {} could not join: {}", connection.id(), e);
        let close = Message::Close(Some(CloseFrame {
            code: close_code::POLICY,
            reason: e.to_string().into(),
        }));
        if let Err(e) = sender.send(close).await {
            tracing::debug!("Failed to send close frame: {}", e);
        }
        lifecycle.advance(ConnectionState::Removed);
        return;
    }
    lifecycle.advance(ConnectionState::Joined);

    let mut send_task = pusher_loop(rx, sender, connection.id());
    let mut recv_task = tokio::spawn(read_loop(
        receiver,
        connection.clone(),
        room_id.clone(),
        state.dispatcher.clone(),
        state.message_pusher.clone(),
    ));
    lifecycle.advance(ConnectionState::Relaying);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };
    lifecycle.advance(ConnectionState::Disconnecting);

    match state.leave_room_usecase.execute(&room_id, &connection).await {
        Departure::NotInRoom => tracing::info!(
            "Connection {} closed; room '{}' no longer listed it",
            connection.id(),
            room_id
        ),
        Departure::RoomClosed | Departure::Remaining(_) => tracing::info!(
            "Connection {} closed and removed from room '{}'",
            connection.id(),
            room_id
        ),
    }
    lifecycle.advance(ConnectionState::Removed);
}

/// Spawns the writer task: drains the outbound queue into the WebSocket.
///
/// Ends when the socket write fails or every handle to the connection is gone.
fn pusher_loop<S>(
    mut rx: mpsc::Receiver<Payload>,
    mut sender: S,
    connection_id: ConnectionId,
) -> JoinHandle<()>
where
    S: Sink<Message> + Unpin + Send + 'static,
    S::Error: Display + Send,
{
    tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(payload.to_string().into())).await {
                tracing::warn!("Failed to write to connection {}: {}", connection_id, e);
                break;
            }
        }
        let _ = sender.close().await;
    })
}

/// Reads frames from the client and submits them to the dispatcher
async fn read_loop<R, E>(
    mut receiver: R,
    connection: ConnectionHandle,
    room_id: RoomId,
    dispatcher: RelayDispatcher,
    message_pusher: Arc<dyn MessagePusher>,
) where
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display + Send,
{
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("Read error on connection {}: {}", connection.id(), e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                let payload = match Payload::parse(text.as_str()) {
                    Ok(payload) => payload,
                    Err(e) => {
                        // only the sender hears about its bad frame
                        tracing::warn!(
                            "Malformed frame from connection {}: {}",
                            connection.id(),
                            e
                        );
                        let reply = Payload::from(ErrorFrame::malformed(&e));
                        if let Err(e) = message_pusher.push_to(&connection, &reply).await {
                            tracing::debug!("Could not report malformed frame: {}", e);
                        }
                        continue;
                    }
                };

                let message = InboundMessage {
                    sender: connection.clone(),
                    room_id: room_id.clone(),
                    payload,
                };
                if dispatcher.submit(message).await.is_err() {
                    tracing::warn!("Relay dispatcher stopped; closing connection {}", connection.id());
                    break;
                }
            }
            Message::Binary(_) => {
                tracing::debug!("Ignoring binary frame from connection {}", connection.id());
            }
            Message::Close(_) => {
                tracing::info!("Connection {} requested close", connection.id());
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            _ => {}
        }
    }
}
