//! # audio-sink-gateway
//!
//! WebSocket gateway that ingests base64-encoded PCM audio chunks.
//!
//! Clients send JSON text frames such as
//! `{"type": "input_audio_buffer.append", "audio": "<base64>"}`. The
//! decoded bytes are appended to an output file and every frame is
//! answered with `{"status": "ok"}` or an error acknowledgment carrying a
//! `kind` and `message`.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket, HTTP)
//!     │
//!     ├── WS Handler (ws/)          ├── System endpoints (api/)
//!     │
//!     ├── IngestService (service/)
//!     │
//!     ├── OutputLayout, IngestStats (domain/)
//!     │
//!     └── AudioSink writer task (domain/) ──► *.pcm files
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod service;
pub mod ws;
