//! WebSocket layer: upgrade handling, connection loop, wire messages.
//!
//! Any path other than the system endpoints may be upgraded to a
//! WebSocket that accepts JSON audio messages.

pub mod connection;
pub mod handler;
pub mod messages;

use axum::Router;

use crate::app_state::AppState;

/// WebSocket routes: every path not claimed by another router.
pub fn routes() -> Router<AppState> {
    Router::new().fallback(handler::ws_handler)
}
