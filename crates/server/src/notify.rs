//! Membership-change notifications.
//!
//! Peers are identified to each other by their player refs; connection
//! identities never leave the server.

use tokio::sync::RwLock;

use gamerelay_protocol::{PlayerRefPayload, ServerMessage};

use crate::session::{ClientId, PlayerConnection, SessionRegistry};

/// Notification failures. None of these are fatal; the caller logs and the
/// triggering event is dropped.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The captured player refs and the removal scan disagree. Under the
    /// single registry lock both derive from one state, so this indicates a
    /// broken membership invariant; rather than pair refs with the wrong
    /// sessions, no one is notified.
    #[error("captured {refs} player refs but removed from {removals} sessions")]
    PairingMismatch { refs: usize, removals: usize },
}

/// Tell the pre-join host that a new player arrived. Skipped if the host's
/// connection already went away.
pub fn notify_join(host_before: &PlayerConnection, joiner_ref: &str) {
    if !host_before.is_open() {
        tracing::debug!(client_id = %host_before.id(), "Pre-join host already closed; skipping join notification");
        return;
    }
    host_before.send_message(ServerMessage::NewPlayerConnected {
        payload: PlayerRefPayload {
            player_ref: joiner_ref.to_string(),
        },
    });
}

/// Remove a departed connection from every session and tell each affected
/// session's remaining members who left.
///
/// Runs under one registry write lock so the capture, the removal, and the
/// fan-out see a single consistent state. Calling this again for an
/// already-removed connection is a no-op.
pub async fn notify_departure(
    registry: &RwLock<SessionRegistry>,
    client_id: ClientId,
) -> Result<(), NotifyError> {
    let mut registry = registry.write().await;

    let refs = registry.player_refs_for(client_id);
    let removals = registry.remove_connection(client_id);

    if removals.is_empty() {
        return Ok(());
    }

    if refs.len() != removals.len() || removals.iter().any(|r| !refs.contains_key(&r.code)) {
        return Err(NotifyError::PairingMismatch {
            refs: refs.len(),
            removals: removals.len(),
        });
    }

    for removal in removals {
        let Some(player_ref) = refs.get(&removal.code) else {
            continue; // unreachable after the check above
        };

        if removal.was_host_lost {
            tracing::info!(
                code = %removal.code,
                client_id = %client_id,
                "Host left; next-oldest member is now host"
            );
        }

        let message = ServerMessage::PlayerLeft {
            payload: PlayerRefPayload {
                player_ref: player_ref.clone(),
            },
        };
        if let Some(session) = registry.get_session(&removal.code) {
            session.broadcast(&message);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::CodeGenerator;
    use crate::session::OutboundFrame;
    use std::sync::Arc;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    struct FixedCode;

    impl CodeGenerator for FixedCode {
        fn generate(&self) -> String {
            "brave-red-fox".to_string()
        }
    }

    fn test_conn() -> (PlayerConnection, UnboundedReceiver<OutboundFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (PlayerConnection::new(ClientId::new(), tx), rx)
    }

    fn player_left_refs(rx: &mut UnboundedReceiver<OutboundFrame>) -> Vec<String> {
        let mut refs = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            if let OutboundFrame::Message(ServerMessage::PlayerLeft { payload }) = frame {
                refs.push(payload.player_ref);
            }
        }
        refs
    }

    #[tokio::test]
    async fn departure_notifies_remaining_members_by_player_ref() {
        let registry = Arc::new(RwLock::new(SessionRegistry::new(Box::new(FixedCode))));
        let (a, _rx_a) = test_conn();
        let (b, mut rx_b) = test_conn();
        let (c, mut rx_c) = test_conn();
        let (outsider, mut rx_outsider) = test_conn();

        {
            let mut reg = registry.write().await;
            let code = reg.create_session(a.clone(), "p1".to_string());
            reg.join_session(&code, b, "p2".to_string());
            reg.join_session(&code, c, "p3".to_string());
            reg.join_session("calm-teal-owl", outsider, "p4".to_string());
        }

        notify_departure(&registry, a.id()).await.unwrap();

        assert_eq!(player_left_refs(&mut rx_b), vec!["p1".to_string()]);
        assert_eq!(player_left_refs(&mut rx_c), vec!["p1".to_string()]);
        assert!(
            player_left_refs(&mut rx_outsider).is_empty(),
            "other sessions must not be notified"
        );
    }

    #[tokio::test]
    async fn departure_is_idempotent() {
        let registry = Arc::new(RwLock::new(SessionRegistry::new(Box::new(FixedCode))));
        let (a, _rx_a) = test_conn();
        let (b, mut rx_b) = test_conn();

        {
            let mut reg = registry.write().await;
            let code = reg.create_session(a.clone(), "p1".to_string());
            reg.join_session(&code, b, "p2".to_string());
        }

        notify_departure(&registry, a.id()).await.unwrap();
        notify_departure(&registry, a.id()).await.unwrap();

        assert_eq!(
            player_left_refs(&mut rx_b),
            vec!["p1".to_string()],
            "no duplicate notifications on repeated cleanup"
        );
    }

    #[tokio::test]
    async fn departure_of_unknown_connection_is_a_noop() {
        let registry = Arc::new(RwLock::new(SessionRegistry::new(Box::new(FixedCode))));
        notify_departure(&registry, ClientId::new()).await.unwrap();
    }

    #[tokio::test]
    async fn join_notification_carries_joiner_ref() {
        let (host, mut rx_host) = test_conn();
        notify_join(&host, "guest");

        match rx_host.try_recv() {
            Ok(OutboundFrame::Message(ServerMessage::NewPlayerConnected { payload })) => {
                assert_eq!(payload.player_ref, "guest");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[tokio::test]
    async fn join_notification_skips_closed_host() {
        let (host, rx_host) = test_conn();
        drop(rx_host);
        // must not panic or error
        notify_join(&host, "guest");
    }
}
