//! WebSocket message types for the relay protocol.
//!
//! Every frame on the wire is a JSON object tagged by a lowercase `type`
//! field: `{ "type": ..., "game"?: ..., "payload": ... }`. Inbound messages
//! that do not match the declared shape for their `type` fail to
//! deserialize; the server drops them without replying.
//!
//! Relayed game state (`remoteaction`) is opaque to the server and is kept
//! as untyped JSON here. Broadcast relays forward the original bytes
//! verbatim; only `resync` is re-serialized (re-tagged as `remoteaction`).

use serde::{Deserialize, Serialize};

// =============================================================================
// Client Messages (player -> relay)
// =============================================================================

/// Messages from a client to the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Create a new session; the sender becomes its host.
    #[serde(rename = "newgame")]
    NewGame { payload: NewGamePayload },
    /// Join an existing session by code (or claim a fresh one).
    #[serde(rename = "connecttogame")]
    ConnectToGame { payload: ConnectToGamePayload },
    /// Opaque game state to fan out to the other session members.
    #[serde(rename = "remoteaction")]
    RemoteAction {
        game: String,
        #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
        payload: serde_json::Value,
    },
    /// Ask the session host to re-broadcast canonical state.
    #[serde(rename = "resync")]
    Resync {
        game: String,
        #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
        payload: serde_json::Value,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGamePayload {
    pub player_ref: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectToGamePayload {
    pub game: String,
    pub player_ref: String,
}

// =============================================================================
// Server Messages (relay -> player)
// =============================================================================

/// Messages from the relay to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Reply to `newgame`: the generated session code.
    #[serde(rename = "newgamecreated")]
    NewGameCreated { payload: String },
    /// Reply to `connecttogame`: the session code that was joined.
    #[serde(rename = "connectedtogame")]
    ConnectedToGame { payload: String },
    /// Sent to the session host when another player joins.
    #[serde(rename = "newplayerconnected")]
    NewPlayerConnected { payload: PlayerRefPayload },
    /// Sent to remaining members when a player's connection goes away.
    #[serde(rename = "playerleft")]
    PlayerLeft { payload: PlayerRefPayload },
    /// A relayed action; also the re-tagged form of an inbound `resync`.
    #[serde(rename = "remoteaction")]
    RemoteAction {
        game: String,
        #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
        payload: serde_json::Value,
    },
}

/// Identifies a player by the opaque reference the client supplied, never
/// by connection identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRefPayload {
    pub player_ref: String,
}
