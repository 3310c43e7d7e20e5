//! Gamerelay Server library.
//!
//! A relay for multiplayer game sessions: one client creates a session and
//! receives a human-readable code, others join with that code, and all game
//! state is relayed between members without the server interpreting it.
//!
//! ## Structure
//!
//! - `session/` - Session registry, membership, connection handles
//! - `router` - Inbound message dispatch, relay and resync
//! - `notify` - Join/leave notifications
//! - `codes/` - Session code generation
//! - `api/` - HTTP and WebSocket entry points

pub mod api;
pub mod codes;
pub mod notify;
pub mod router;
pub mod session;

pub use router::MessageRouter;
pub use session::SessionRegistry;
