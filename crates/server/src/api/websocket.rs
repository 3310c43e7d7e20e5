//! WebSocket handling for player connections.
//!
//! Owns the socket lifecycle: one receive loop per connection feeding the
//! router, one send task draining the connection's outbound channel. The
//! relay accepts both text and binary frames; both are parsed as JSON and,
//! when relayed, forwarded in their original encoding.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::router::MessageRouter;
use crate::session::{ClientId, OutboundFrame, PlayerConnection};

/// Combined state for WebSocket handlers.
pub struct WsState {
    pub router: MessageRouter,
}

/// WebSocket upgrade handler - entry point for new connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<WsState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Create a unique client ID for this connection
    let client_id = ClientId::new();

    // Create a channel for sending messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<OutboundFrame>();
    let conn = PlayerConnection::new(client_id, tx);

    tracing::info!(client_id = %client_id, "WebSocket connection established");

    // Spawn a task to forward frames from the channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let message = match frame {
                OutboundFrame::Message(msg) => match serde_json::to_string(&msg) {
                    Ok(json) => Message::Text(json.into()),
                    Err(e) => {
                        tracing::warn!(client_id = %client_id, error = %e, "Failed to serialize outbound message");
                        continue;
                    }
                },
                OutboundFrame::Raw { bytes, binary } => {
                    if binary {
                        Message::Binary(bytes.into())
                    } else {
                        match String::from_utf8(bytes) {
                            Ok(text) => Message::Text(text.into()),
                            Err(e) => {
                                // raw text frames arrive as valid UTF-8
                                tracing::warn!(client_id = %client_id, error = %e, "Dropping non-UTF-8 text relay frame");
                                continue;
                            }
                        }
                    }
                }
            };
            if ws_sender.send(message).await.is_err() {
                break;
            }
        }
    });

    // Handle incoming messages
    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                state.router.handle_frame(&conn, text.as_bytes(), false).await;
            }
            Ok(Message::Binary(data)) => {
                state.router.handle_frame(&conn, &data, true).await;
            }
            Ok(Message::Close(_)) => {
                tracing::info!(client_id = %client_id, "WebSocket closed by client");
                break;
            }
            Err(e) => {
                tracing::error!(client_id = %client_id, error = %e, "WebSocket error");
                break;
            }
            // Ping/Pong are answered by axum
            _ => {}
        }
    }

    // Clean up: leave sessions and notify remaining members
    state.router.handle_disconnect(client_id).await;
    send_task.abort();

    tracing::info!(client_id = %client_id, "WebSocket connection terminated");
}
