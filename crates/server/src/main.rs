//! Gamerelay Server - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gamerelay_server::api::{self, WsState};
use gamerelay_server::codes::WordListGenerator;
use gamerelay_server::{MessageRouter, SessionRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from the repo root.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gamerelay_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gamerelay Server");

    // Load configuration
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "8080".into())
        .parse()
        .unwrap_or(8080);

    // Create the session registry - the single piece of shared mutable state
    let registry = Arc::new(RwLock::new(SessionRegistry::new(Box::new(
        WordListGenerator,
    ))));

    // Create WebSocket state
    let ws_state = Arc::new(WsState {
        router: MessageRouter::new(registry),
    });

    // Build router
    let router = api::http::routes()
        .route("/ws", get(api::websocket::ws_handler).with_state(ws_state))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
