//! Connection handles.
//!
//! The transport layer owns the socket; everything else holds a
//! [`PlayerConnection`], a cheap clonable handle wrapping the connection's
//! outbound channel. Dropping the receiving half (when the socket task
//! exits) closes the channel, which is what `is_open` probes.

use tokio::sync::mpsc;

use gamerelay_protocol::ServerMessage;

/// Unique identifier for a connected client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(uuid::Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A frame queued for delivery to one client.
#[derive(Debug, Clone)]
pub enum OutboundFrame {
    /// A typed protocol message, serialized to JSON text at the socket.
    Message(ServerMessage),
    /// A relayed inbound frame, forwarded byte-for-byte in its original
    /// encoding.
    Raw { bytes: Vec<u8>, binary: bool },
}

/// Handle to one client's bidirectional channel.
#[derive(Debug, Clone)]
pub struct PlayerConnection {
    id: ClientId,
    sender: mpsc::UnboundedSender<OutboundFrame>,
}

impl PlayerConnection {
    pub fn new(id: ClientId, sender: mpsc::UnboundedSender<OutboundFrame>) -> Self {
        Self { id, sender }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Liveness probe: true while the socket task is still draining the
    /// channel.
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }

    /// Fire-and-forget send. Failures are logged and never retried; nothing
    /// is surfaced to the originating client.
    pub fn send(&self, frame: OutboundFrame) {
        if let Err(e) = self.sender.send(frame) {
            tracing::warn!(client_id = %self.id, error = %e, "Failed to send message to client");
        }
    }

    pub fn send_message(&self, message: ServerMessage) {
        self.send(OutboundFrame::Message(message));
    }
}
