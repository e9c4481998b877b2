//! Process-wide ingest counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use utoipa::ToSchema;

/// Lock-free counters updated by connection tasks and the message handler.
#[derive(Debug, Default)]
pub struct IngestStats {
    connections_accepted: AtomicU64,
    connections_active: AtomicU64,
    messages_handled: AtomicU64,
    messages_rejected: AtomicU64,
    audio_chunks_written: AtomicU64,
    audio_bytes_written: AtomicU64,
}

/// Point-in-time copy of [`IngestStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatsSnapshot {
    /// Connections upgraded since startup.
    pub connections_accepted: u64,
    /// Connections currently open.
    pub connections_active: u64,
    /// Messages acknowledged with `ok`.
    pub messages_handled: u64,
    /// Messages answered with an error.
    pub messages_rejected: u64,
    /// Non-empty audio chunks appended.
    pub audio_chunks_written: u64,
    /// Total decoded audio bytes appended.
    pub audio_bytes_written: u64,
}

impl IngestStats {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly upgraded connection.
    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.connections_active.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a closed connection.
    pub fn connection_closed(&self) {
        let _ = self
            .connections_active
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }

    /// Records a successfully handled message and the audio bytes it wrote.
    pub fn message_handled(&self, audio_bytes: usize) {
        self.messages_handled.fetch_add(1, Ordering::Relaxed);
        if audio_bytes > 0 {
            self.audio_chunks_written.fetch_add(1, Ordering::Relaxed);
            self.audio_bytes_written
                .fetch_add(u64::try_from(audio_bytes).unwrap_or(u64::MAX), Ordering::Relaxed);
        }
    }

    /// Records a rejected message.
    pub fn message_rejected(&self) {
        self.messages_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a snapshot of all counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            connections_accepted: self.connections_accepted.load(Ordering::Relaxed),
            connections_active: self.connections_active.load(Ordering::Relaxed),
            messages_handled: self.messages_handled.load(Ordering::Relaxed),
            messages_rejected: self.messages_rejected.load(Ordering::Relaxed),
            audio_chunks_written: self.audio_chunks_written.load(Ordering::Relaxed),
            audio_bytes_written: self.audio_bytes_written.load(Ordering::Relaxed),
        }
    }
}
