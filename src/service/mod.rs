//! Service layer: message handling on top of the domain layer.

pub mod ingest_service;

pub use ingest_service::IngestService;
