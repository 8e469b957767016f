//! Connection handles and the per-connection lifecycle.

use std::{fmt, sync::Arc};

use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

use super::{error::MessagePushError, value_object::Payload};

/// Payloads a connection may have waiting for its writer task. Pushes beyond
/// this are dropped for that connection only.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// Outbound queue of a connection, drained by its socket writer task
pub type PusherChannel = mpsc::Sender<Payload>;

/// Identifier of a connection.
///
/// Drawn once per [`ConnectionHandle::new`] and shared by its clones. Used for
/// logs, inspection output and registry indexing; participant equality is
/// still decided by handle identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug)]
struct Connection {
    id: ConnectionId,
    outbound: PusherChannel,
}

/// Shared handle to one live connection.
///
/// Clones refer to the same connection. Two handles compare equal only when
/// they were cloned from the same [`ConnectionHandle::new`] call.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    inner: Arc<Connection>,
}

impl ConnectionHandle {
    pub fn new(outbound: PusherChannel) -> Self {
        Self {
            inner: Arc::new(Connection {
                id: ConnectionId::generate(),
                outbound,
            }),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.inner.id
    }

    /// Queue a payload for this connection's writer task without waiting.
    ///
    /// Fails once the writer has gone away (socket closed or write failed),
    /// or while the peer is not reading and its queue is full.
    pub fn push(&self, payload: Payload) -> Result<(), MessagePushError> {
        self.inner.outbound.try_send(payload).map_err(|e| match e {
            TrySendError::Full(_) => MessagePushError::QueueFull(self.id().to_string()),
            TrySendError::Closed(_) => MessagePushError::ConnectionClosed(self.id().to_string()),
        })
    }
}

impl PartialEq for ConnectionHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for ConnectionHandle {}

/// Lifecycle of one relayed connection
///
/// ```text
/// Connecting -> Joined -> Relaying -> Disconnecting -> Removed
///      \__________________________________________/^
///               (join rejected)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Joined,
    Relaying,
    Disconnecting,
    Removed,
}

impl ConnectionState {
    pub fn can_transition_to(self, next: ConnectionState) -> bool {
        use ConnectionState::*;

        matches!(
            (self, next),
            (Connecting, Joined)
                | (Connecting, Removed)
                | (Joined, Relaying)
                | (Joined, Disconnecting)
                | (Relaying, Disconnecting)
                | (Disconnecting, Removed)
        )
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Joined => "joined",
            ConnectionState::Relaying => "relaying",
            ConnectionState::Disconnecting => "disconnecting",
            ConnectionState::Removed => "removed",
        };
        f.write_str(name)
    }
}
