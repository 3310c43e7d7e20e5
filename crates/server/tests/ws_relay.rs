//! End-to-end relay flow over real WebSockets.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use gamerelay_server::api::{self, WsState};
use gamerelay_server::codes::WordListGenerator;
use gamerelay_server::{MessageRouter, SessionRegistry};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_server() -> SocketAddr {
    let registry = Arc::new(RwLock::new(SessionRegistry::new(Box::new(
        WordListGenerator,
    ))));
    let ws_state = Arc::new(WsState {
        router: MessageRouter::new(registry),
    });
    let app = api::http::routes().route("/ws", get(api::websocket::ws_handler).with_state(ws_state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn connect(addr: SocketAddr) -> WsClient {
    let (client, _response) = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("connect to relay");
    client
}

async fn send_json(client: &mut WsClient, value: Value) {
    client
        .send(Message::Text(value.to_string()))
        .await
        .expect("send frame");
}

async fn recv_frame(client: &mut WsClient) -> Message {
    loop {
        let msg = timeout(Duration::from_secs(5), client.next())
            .await
            .expect("timed out waiting for frame")
            .expect("stream ended")
            .expect("websocket error");
        match msg {
            Message::Ping(_) | Message::Pong(_) => continue,
            other => return other,
        }
    }
}

async fn recv_json(client: &mut WsClient) -> Value {
    match recv_frame(client).await {
        Message::Text(text) => serde_json::from_str(&text).expect("valid json frame"),
        other => panic!("expected text frame, got {other:?}"),
    }
}

#[tokio::test]
async fn create_join_relay_and_leave() {
    let addr = start_server().await;

    // Host creates a session
    let mut host = connect(addr).await;
    send_json(
        &mut host,
        json!({"type": "newgame", "payload": {"playerRef": "host"}}),
    )
    .await;
    let created = recv_json(&mut host).await;
    assert_eq!(created["type"], "newgamecreated");
    let code = created["payload"].as_str().expect("session code").to_string();
    assert_eq!(code.split('-').count(), 3);

    // Guest joins with the code
    let mut guest = connect(addr).await;
    send_json(
        &mut guest,
        json!({"type": "connecttogame", "payload": {"game": code, "playerRef": "guest"}}),
    )
    .await;
    let joined = recv_json(&mut guest).await;
    assert_eq!(joined["type"], "connectedtogame");
    assert_eq!(joined["payload"], json!(code));

    let announced = recv_json(&mut host).await;
    assert_eq!(announced["type"], "newplayerconnected");
    assert_eq!(announced["payload"]["playerRef"], "guest");

    // Guest relays an action; the host receives the frame verbatim
    let action = json!({"type": "remoteaction", "game": code, "payload": {"move": [1, 2]}});
    let raw = action.to_string();
    guest
        .send(Message::Text(raw.clone()))
        .await
        .expect("send action");
    match recv_frame(&mut host).await {
        Message::Text(text) => assert_eq!(text, raw),
        other => panic!("expected verbatim text relay, got {other:?}"),
    }

    // Guest resyncs; only the host hears it, re-tagged as remoteaction
    send_json(&mut guest, json!({"type": "resync", "game": code})).await;
    let resync = recv_json(&mut host).await;
    assert_eq!(resync["type"], "remoteaction");
    assert_eq!(resync["game"], json!(code));

    // Guest disconnects; the host is told who left, by player ref
    guest.close(None).await.expect("close guest");
    let left = recv_json(&mut host).await;
    assert_eq!(left["type"], "playerleft");
    assert_eq!(left["payload"]["playerRef"], "guest");
}

#[tokio::test]
async fn binary_actions_are_relayed_as_binary() {
    let addr = start_server().await;

    let mut host = connect(addr).await;
    send_json(
        &mut host,
        json!({"type": "newgame", "payload": {"playerRef": "host"}}),
    )
    .await;
    let code = recv_json(&mut host).await["payload"]
        .as_str()
        .expect("session code")
        .to_string();

    let mut guest = connect(addr).await;
    send_json(
        &mut guest,
        json!({"type": "connecttogame", "payload": {"game": code, "playerRef": "guest"}}),
    )
    .await;
    recv_json(&mut guest).await;
    recv_json(&mut host).await; // newplayerconnected

    let action = json!({"type": "remoteaction", "game": code, "payload": {"blob": 7}});
    let raw = action.to_string().into_bytes();
    guest
        .send(Message::Binary(raw.clone()))
        .await
        .expect("send binary action");

    match recv_frame(&mut host).await {
        Message::Binary(bytes) => assert_eq!(bytes, raw),
        other => panic!("expected binary relay, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_frames_leave_the_connection_usable() {
    let addr = start_server().await;

    let mut client = connect(addr).await;
    client
        .send(Message::Text("not json".to_string()))
        .await
        .expect("send garbage");

    // The relay swallows the bad frame; the connection still works
    send_json(
        &mut client,
        json!({"type": "newgame", "payload": {"playerRef": "p1"}}),
    )
    .await;
    let created = recv_json(&mut client).await;
    assert_eq!(created["type"], "newgamecreated");
}
