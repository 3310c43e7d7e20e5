//! Gamerelay Protocol - Shared types for server and client communication
//!
//! This crate contains the JSON wire-format messages exchanged over the
//! relay WebSocket connection.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and serde_json
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Opaque game payloads** - Relayed game state is carried as untyped
//!    JSON; the server never interprets it

pub mod messages;

pub use messages::{
    ClientMessage, ConnectToGamePayload, NewGamePayload, PlayerRefPayload, ServerMessage,
};
