//! Axum WebSocket upgrade handler.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{ConnectInfo, State};
use axum::http::Uri;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::domain::ConnectionId;

/// `GET /*` — Upgrade HTTP connection to WebSocket.
///
/// Every path is accepted; it is only logged.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    uri: Uri,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let connection = ConnectionId::new();
    tracing::info!(%peer, path = uri.path(), %connection, "new connection");

    let ingest = Arc::clone(&state.ingest);
    ws.on_upgrade(move |socket| run_connection(socket, connection, ingest))
}
