//! GameSession and related types

use chrono::{DateTime, Utc};

use gamerelay_protocol::ServerMessage;

use super::{ClientId, OutboundFrame, PlayerConnection};

/// A member of a game session
#[derive(Debug, Clone)]
pub struct SessionMember {
    pub conn: PlayerConnection,
    /// Caller-supplied opaque label; this is what peers see in join/leave
    /// notifications, never the connection identity.
    pub player_ref: String,
    #[allow(dead_code)] // Kept for future session analytics
    pub joined_at: DateTime<Utc>,
}

/// An active game session.
///
/// Member order is semantic: the member at index 0 is the host. Joiners are
/// always appended, so removing the host promotes the next-oldest member
/// without any stored flag.
#[derive(Debug)]
pub struct GameSession {
    code: String,
    members: Vec<SessionMember>,
    #[allow(dead_code)] // Kept for future session analytics
    created_at: DateTime<Utc>,
}

impl GameSession {
    pub fn new(code: String) -> Self {
        Self {
            code,
            members: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn members(&self) -> &[SessionMember] {
        &self.members
    }

    /// The authoritative member for resync purposes: the earliest-joined
    /// surviving member.
    pub fn host(&self) -> Option<&SessionMember> {
        self.members.first()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, client_id: ClientId) -> bool {
        self.members.iter().any(|m| m.conn.id() == client_id)
    }

    pub fn player_ref_of(&self, client_id: ClientId) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.conn.id() == client_id)
            .map(|m| m.player_ref.as_str())
    }

    pub(crate) fn add_member(&mut self, conn: PlayerConnection, player_ref: String) {
        self.members.push(SessionMember {
            conn,
            player_ref,
            joined_at: Utc::now(),
        });
    }

    pub(crate) fn remove_member(&mut self, client_id: ClientId) -> Option<SessionMember> {
        let index = self.members.iter().position(|m| m.conn.id() == client_id)?;
        Some(self.members.remove(index))
    }

    /// Broadcast a typed message to every member.
    pub fn broadcast(&self, message: &ServerMessage) {
        for member in &self.members {
            member.conn.send_message(message.clone());
        }
    }

    /// Fan a raw inbound frame out to every other open member, preserving
    /// its original encoding. Closed members are skipped, not removed;
    /// removal happens only on the close/error path.
    pub fn relay_raw_except(&self, bytes: &[u8], binary: bool, exclude: ClientId) {
        for member in &self.members {
            if member.conn.id() == exclude {
                continue;
            }
            if !member.conn.is_open() {
                tracing::debug!(
                    code = %self.code,
                    client_id = %member.conn.id(),
                    "Skipping closed connection during relay"
                );
                continue;
            }
            member.conn.send(OutboundFrame::Raw {
                bytes: bytes.to_vec(),
                binary,
            });
        }
    }
}
