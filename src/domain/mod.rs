//! Domain layer: connection identity, output layout, writer task, counters.
//!
//! This module contains the server-side model behind message handling:
//! who is connected, which file their audio goes to, the single task
//! that owns every file append, and the counters exposed on `/stats`.

pub mod audio_sink;
pub mod connection_id;
pub mod ingest_stats;
pub mod output_layout;

pub use audio_sink::AudioSink;
pub use connection_id::ConnectionId;
pub use ingest_stats::{IngestStats, StatsSnapshot};
pub use output_layout::{OutputLayout, OutputMode};
