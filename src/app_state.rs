//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::IngestService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Message handler shared by all connections.
    pub ingest: Arc<IngestService>,
}

impl AppState {
    /// Wraps an [`IngestService`] for sharing across handlers.
    #[must_use]
    pub fn new(ingest: IngestService) -> Self {
        Self {
            ingest: Arc::new(ingest),
        }
    }
}
