//! Router composition and server loop.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::ws;

/// Builds the complete application: HTTP system endpoints, then the
/// WebSocket catch-all routes.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router())
        .merge(ws::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the application on `listener` until the process exits.
///
/// Peer addresses are made available to handlers through
/// [`axum::extract::ConnectInfo`].
///
/// # Errors
///
/// Returns an I/O error if the accept loop fails.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let app = build_app(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}
