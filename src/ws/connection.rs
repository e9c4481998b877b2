//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection: every
//! data frame is passed to the [`IngestService`] and its acknowledgment is
//! sent back before the next frame is read.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use crate::domain::ConnectionId;
use crate::service::IngestService;

/// Runs the request/response loop for a single WebSocket connection.
///
/// - Text frames are handled as JSON messages.
/// - Binary frames are handled the same way; non-UTF-8 payloads are
///   rejected as malformed JSON.
/// - Ping/pong frames are answered by the transport.
/// - The loop ends on a close frame, end of stream, a receive error or a
///   failed send. Handler errors never end the loop.
pub async fn run_connection(
    socket: WebSocket,
    connection: ConnectionId,
    ingest: Arc<IngestService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    ingest.stats().connection_opened();

    while let Some(msg) = ws_rx.next().await {
        let ack = match msg {
            Ok(Message::Text(text)) => ingest.handle(connection, text.as_str().as_bytes()).await,
            Ok(Message::Binary(bytes)) => ingest.handle(connection, &bytes).await,
            Ok(Message::Close(_)) => break,
            // Ping/pong
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(%connection, error = %e, "ws receive failed");
                break;
            }
        };

        if let Err(e) = ws_tx.send(Message::text(ack.to_json())).await {
            tracing::debug!(%connection, error = %e, "ws send failed");
            break;
        }
    }

    ingest.stats().connection_closed();
    tracing::info!(%connection, "connection closed");
}
