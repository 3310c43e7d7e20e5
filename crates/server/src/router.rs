//! Inbound message routing.
//!
//! The router is stateless between messages; all state lives in the
//! [`SessionRegistry`] behind a single `RwLock`, which is the one critical
//! section in the process. Relayed payloads are never interpreted, only
//! refanned.

use std::sync::Arc;

use tokio::sync::RwLock;

use gamerelay_protocol::{ClientMessage, ServerMessage};

use crate::notify;
use crate::session::{ClientId, PlayerConnection, SessionRegistry};

/// Dispatches parsed client messages to the registry and the affected
/// connections.
#[derive(Clone)]
pub struct MessageRouter {
    registry: Arc<RwLock<SessionRegistry>>,
}

impl MessageRouter {
    pub fn new(registry: Arc<RwLock<SessionRegistry>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<RwLock<SessionRegistry>> {
        &self.registry
    }

    /// Handle one raw inbound frame from `sender`.
    ///
    /// Malformed frames (bad JSON, unknown type, wrong payload shape) are
    /// dropped without a reply; the connection stays open.
    pub async fn handle_frame(&self, sender: &PlayerConnection, data: &[u8], binary: bool) {
        let message: ClientMessage = match serde_json::from_slice(data) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(client_id = %sender.id(), error = %e, "Dropping malformed message");
                return;
            }
        };

        match message {
            ClientMessage::NewGame { payload } => {
                let code = self
                    .registry
                    .write()
                    .await
                    .create_session(sender.clone(), payload.player_ref);
                sender.send_message(ServerMessage::NewGameCreated { payload: code });
            }

            ClientMessage::ConnectToGame { payload } => {
                let outcome = self.registry.write().await.join_session(
                    &payload.game,
                    sender.clone(),
                    payload.player_ref.clone(),
                );
                sender.send_message(ServerMessage::ConnectedToGame {
                    payload: payload.game,
                });
                if let Some(host_before) = outcome.host_before {
                    notify::notify_join(&host_before, &payload.player_ref);
                }
            }

            ClientMessage::RemoteAction { game, .. } => {
                let registry = self.registry.read().await;
                match registry.get_session(&game) {
                    Some(session) => session.relay_raw_except(data, binary, sender.id()),
                    None => {
                        tracing::debug!(code = %game, "Remote action for unknown session dropped")
                    }
                }
            }

            ClientMessage::Resync { game, payload } => {
                let registry = self.registry.read().await;
                match registry.host_of(&game) {
                    Some(host) => {
                        // re-expressed as a relay message, host only
                        host.conn
                            .send_message(ServerMessage::RemoteAction { game, payload });
                    }
                    None => {
                        tracing::debug!(code = %game, "Resync for unknown or empty session dropped")
                    }
                }
            }
        }
    }

    /// Close/error path: remove the connection everywhere and notify the
    /// sessions it left.
    pub async fn handle_disconnect(&self, client_id: ClientId) {
        if let Err(e) = notify::notify_departure(&self.registry, client_id).await {
            tracing::error!(client_id = %client_id, error = %e, "Aborting leave notifications");
        }
    }
}
