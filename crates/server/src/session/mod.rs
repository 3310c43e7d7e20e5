//! Session management for active relay sessions
//!
//! This module owns the mapping from session code to session and the
//! membership rules: a connection belongs to at most one session at a time,
//! and the earliest-joined surviving member of a session is its host.

mod connection;
mod game_session;

// Re-export all public types
pub use connection::{ClientId, OutboundFrame, PlayerConnection};
pub use game_session::{GameSession, SessionMember};

use std::collections::HashMap;

use crate::codes::CodeGenerator;

/// Result of a join: who was host before the new member was appended (the
/// notification target), and whether the session had to be created fresh.
#[derive(Debug)]
pub struct JoinOutcome {
    pub host_before: Option<PlayerConnection>,
    pub created: bool,
}

/// One session a departing connection was removed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub code: String,
    pub was_host_lost: bool,
}

/// Owns all active sessions.
///
/// Plain synchronous state; callers guard it with a single lock so that
/// create/join/remove never interleave (see the app state in `main`).
pub struct SessionRegistry {
    /// Active sessions by code. Sessions are never evicted, even when
    /// empty: whether a code may be rejoined after everyone left is an
    /// open product question, so the observed behavior is preserved.
    sessions: HashMap<String, GameSession>,
    codes: Box<dyn CodeGenerator>,
}

impl SessionRegistry {
    pub fn new(codes: Box<dyn CodeGenerator>) -> Self {
        Self {
            sessions: HashMap::new(),
            codes,
        }
    }

    /// Create a new session with `creator` as its sole (and thus host)
    /// member, returning the generated code.
    ///
    /// Codes are trusted to be unique; if the generator ever repeats one,
    /// the prior session under that code becomes unreachable.
    pub fn create_session(&mut self, creator: PlayerConnection, player_ref: String) -> String {
        let code = self.codes.generate();
        let client_id = creator.id();

        let mut session = GameSession::new(code.clone());
        session.add_member(creator, player_ref);
        if self.sessions.insert(code.clone(), session).is_some() {
            tracing::warn!(code = %code, "Generated code collided with a live session; prior session is unreachable");
        }

        tracing::info!(code = %code, client_id = %client_id, "Created new session");
        code
    }

    /// Add `conn` to the session under `code`, creating the session if the
    /// code is unknown.
    ///
    /// The connection is first removed from every session it belongs to,
    /// which is what keeps membership exclusive. The pre-join host is
    /// captured before appending so the caller can notify it; joiners are
    /// always appended, so an existing host is never displaced.
    pub fn join_session(
        &mut self,
        code: &str,
        conn: PlayerConnection,
        player_ref: String,
    ) -> JoinOutcome {
        let client_id = conn.id();
        self.remove_connection(client_id);

        let created = !self.sessions.contains_key(code);
        let session = self
            .sessions
            .entry(code.to_string())
            .or_insert_with(|| GameSession::new(code.to_string()));

        let host_before = session.host().map(|m| m.conn.clone());
        session.add_member(conn, player_ref);

        tracing::info!(
            code = %code,
            client_id = %client_id,
            created = created,
            "Client joined session"
        );

        JoinOutcome {
            host_before,
            created,
        }
    }

    /// Remove `conn` from every session it appears in.
    ///
    /// Membership is exclusive, so at most one removal is expected; the scan
    /// still covers all sessions in case a caller ever violated that.
    /// Sessions that become empty are retained.
    pub fn remove_connection(&mut self, client_id: ClientId) -> Vec<Removal> {
        let mut removals = Vec::new();
        for (code, session) in self.sessions.iter_mut() {
            let was_host = session
                .host()
                .map(|m| m.conn.id() == client_id)
                .unwrap_or(false);
            if session.remove_member(client_id).is_some() {
                if session.is_empty() {
                    tracing::debug!(code = %code, "Session is now empty; retained until process exit");
                }
                removals.push(Removal {
                    code: code.clone(),
                    was_host_lost: was_host,
                });
            }
        }
        removals
    }

    /// Members of a session in join order (empty for unknown codes).
    pub fn members_of(&self, code: &str) -> &[SessionMember] {
        self.sessions.get(code).map(|s| s.members()).unwrap_or(&[])
    }

    pub fn get_session(&self, code: &str) -> Option<&GameSession> {
        self.sessions.get(code)
    }

    /// The host of a session, derived from member order.
    pub fn host_of(&self, code: &str) -> Option<&SessionMember> {
        self.sessions.get(code).and_then(|s| s.host())
    }

    /// Session code -> this connection's player ref there, for every session
    /// containing the connection. Used to report departures by role rather
    /// than by connection identity.
    pub fn player_refs_for(&self, client_id: ClientId) -> HashMap<String, String> {
        self.sessions
            .iter()
            .filter_map(|(code, session)| {
                session
                    .player_ref_of(client_id)
                    .map(|player_ref| (code.clone(), player_ref.to_string()))
            })
            .collect()
    }

    /// Get the number of active sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
