//! audio-sink-gateway server entry point.
//!
//! Starts the Axum server with WebSocket ingest and system endpoints.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use audio_sink_gateway::app_state::AppState;
use audio_sink_gateway::config::SinkConfig;
use audio_sink_gateway::domain::{AudioSink, IngestStats};
use audio_sink_gateway::server;
use audio_sink_gateway::service::IngestService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = SinkConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        output = %config.output_path.display(),
        mode = %config.output_mode,
        "starting audio-sink-gateway"
    );

    // Build domain layer
    let sink = AudioSink::spawn(config.sink_capacity);
    let stats = Arc::new(IngestStats::new());

    // Build service layer
    let ingest = IngestService::new(sink, config.output_layout(), stats);
    let app_state = AppState::new(ingest);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    server::serve(listener, app_state).await?;

    Ok(())
}
