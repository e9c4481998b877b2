//! Ingest service: parses inbound frames, decodes audio and appends it.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::domain::{AudioSink, ConnectionId, IngestStats, OutputLayout};
use crate::error::IngestError;
use crate::ws::messages::{Ack, InboundMessage};

/// Stateless per-message handler.
///
/// Owns the [`AudioSink`] handle, the [`OutputLayout`] that picks the
/// target file per connection, and the shared [`IngestStats`]. Each frame
/// follows the pattern: parse → decode → append → acknowledge. Frames are
/// independent of each other; the output file is the only shared state.
#[derive(Debug, Clone)]
pub struct IngestService {
    sink: AudioSink,
    layout: OutputLayout,
    stats: Arc<IngestStats>,
}

impl IngestService {
    /// Creates a new `IngestService`.
    #[must_use]
    pub fn new(sink: AudioSink, layout: OutputLayout, stats: Arc<IngestStats>) -> Self {
        Self {
            sink,
            layout,
            stats,
        }
    }

    /// Returns the output layout.
    #[must_use]
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Returns the shared counters.
    #[must_use]
    pub fn stats(&self) -> &Arc<IngestStats> {
        &self.stats
    }

    /// Returns `true` if the audio writer task has stopped.
    #[must_use]
    pub fn is_sink_closed(&self) -> bool {
        self.sink.is_closed()
    }

    /// Handles one frame from `connection` and builds its acknowledgment.
    ///
    /// Never fails: every error becomes an [`Ack::Error`].
    pub async fn handle(&self, connection: ConnectionId, frame: &[u8]) -> Ack {
        match self.ingest(connection, frame).await {
            Ok(written) => {
                self.stats.message_handled(written);
                Ack::Ok
            }
            Err(e) => {
                self.stats.message_rejected();
                tracing::warn!(%connection, kind = %e.kind(), error = %e, "message rejected");
                Ack::from(&e)
            }
        }
    }

    /// Parses `frame` and appends its audio, if any, to the connection's
    /// output file. Returns the number of audio bytes written.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] if the frame is not JSON, `audio` is not
    /// a valid base64 string, or the append fails.
    pub async fn ingest(
        &self,
        connection: ConnectionId,
        frame: &[u8],
    ) -> Result<usize, IngestError> {
        let message = InboundMessage::parse_slice(frame)?;
        let event_type = message.event_type.as_deref().unwrap_or("-");

        let Some(audio) = message.audio.as_deref() else {
            tracing::info!(%connection, event_type, "received message");
            return Ok(0);
        };

        let bytes = decode_audio(audio)?;
        tracing::info!(%connection, event_type, audio_bytes = bytes.len(), "received audio");

        let path = self.layout.path_for(connection);
        self.sink.append(path, bytes).await
    }
}

/// Decodes a standard-alphabet, padded base64 audio payload.
///
/// # Errors
///
/// Returns [`IngestError::InvalidAudio`] on any decode failure.
pub fn decode_audio(audio: &str) -> Result<Vec<u8>, IngestError> {
    Ok(STANDARD.decode(audio)?)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::OutputMode;
    use crate::error::ErrorKind;

    struct Fixture {
        _dir: tempfile::TempDir,
        path: std::path::PathBuf,
        service: IngestService,
    }

    fn fixture(mode: OutputMode) -> Fixture {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("failed to create temp dir");
        };
        let path = dir.path().join("audio_output.pcm");
        let service = IngestService::new(
            AudioSink::spawn(16),
            OutputLayout::new(&path, mode),
            Arc::new(IngestStats::new()),
        );
        Fixture {
            _dir: dir,
            path,
            service,
        }
    }

    #[tokio::test]
    async fn message_without_audio_is_ok_and_writes_nothing() {
        let fx = fixture(OutputMode::Shared);
        let ack = fx.service.handle(ConnectionId::new(), br#"{"foo":"bar"}"#).await;
        assert_eq!(ack, Ack::Ok);
        assert!(!fx.path.exists());
    }

    #[tokio::test]
    async fn any_json_without_audio_is_ok() {
        let fx = fixture(OutputMode::Shared);
        let conn = ConnectionId::new();
        for frame in [
            br#"{"type":5}"#.as_slice(),
            br#"{"type":{"a":1}}"#.as_slice(),
            br#"{"type":null,"rate":16000,"tags":["mic",{"ch":1}]}"#.as_slice(),
            b"[1,2]".as_slice(),
            br#""x""#.as_slice(),
            b"42".as_slice(),
            b"null".as_slice(),
        ] {
            let ack = fx.service.handle(conn, frame).await;
            assert_eq!(ack, Ack::Ok, "{}", String::from_utf8_lossy(frame));
        }
        assert!(!fx.path.exists());
        assert_eq!(fx.service.stats().snapshot().messages_rejected, 0);
    }

    #[tokio::test]
    async fn null_audio_is_rejected() {
        let fx = fixture(OutputMode::Shared);
        let ack = fx.service.handle(ConnectionId::new(), br#"{"audio":null}"#).await;
        let Ack::Error { kind, .. } = ack else {
            panic!("expected error ack");
        };
        assert_eq!(kind, ErrorKind::InvalidMessage);
        assert!(!fx.path.exists());
    }

    #[tokio::test]
    async fn repeated_message_is_idempotent() {
        let fx = fixture(OutputMode::Shared);
        let conn = ConnectionId::new();
        let first = fx.service.handle(conn, br#"{"type":"session.update"}"#).await;
        let second = fx.service.handle(conn, br#"{"type":"session.update"}"#).await;
        assert_eq!(first, Ack::Ok);
        assert_eq!(first, second);
        assert!(!fx.path.exists());
        assert_eq!(fx.service.stats().snapshot().audio_bytes_written, 0);
    }

    #[tokio::test]
    async fn audio_is_decoded_and_appended_in_order() {
        let fx = fixture(OutputMode::Shared);
        let conn = ConnectionId::new();
        // "hello" then " world"
        let a = fx.service.handle(conn, br#"{"audio":"aGVsbG8="}"#).await;
        let b = fx.service.handle(conn, br#"{"audio":"IHdvcmxk"}"#).await;
        assert!(a.is_ok() && b.is_ok());

        let contents = std::fs::read(&fx.path).unwrap_or_default();
        assert_eq!(contents, b"hello world");

        let snap = fx.service.stats().snapshot();
        assert_eq!(snap.audio_chunks_written, 2);
        assert_eq!(snap.audio_bytes_written, 11);
    }

    #[tokio::test]
    async fn invalid_base64_is_rejected_without_write() {
        let fx = fixture(OutputMode::Shared);
        let ack = fx.service.handle(ConnectionId::new(), br#"{"audio":"!!!"}"#).await;
        let Ack::Error { kind, message } = ack else {
            panic!("expected error ack");
        };
        assert_eq!(kind, ErrorKind::InvalidAudio);
        assert!(!message.is_empty());
        assert!(!fx.path.exists());
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let fx = fixture(OutputMode::Shared);
        for frame in [b"not json".as_slice(), b"{".as_slice()] {
            let Ack::Error { kind, message } = fx.service.handle(ConnectionId::new(), frame).await
            else {
                panic!("expected error ack");
            };
            assert_eq!(kind, ErrorKind::MalformedJson);
            assert!(!message.is_empty());
        }
        assert_eq!(fx.service.stats().snapshot().messages_rejected, 2);
    }

    #[tokio::test]
    async fn per_connection_layout_separates_files() {
        let fx = fixture(OutputMode::PerConnection);
        let a = ConnectionId::new();
        let b = ConnectionId::new();
        assert!(fx.service.handle(a, br#"{"audio":"AQI="}"#).await.is_ok());
        assert!(fx.service.handle(b, br#"{"audio":"AwQ="}"#).await.is_ok());

        let layout = fx.service.layout();
        assert_eq!(std::fs::read(layout.path_for(a)).unwrap_or_default(), [1, 2]);
        assert_eq!(std::fs::read(layout.path_for(b)).unwrap_or_default(), [3, 4]);
        assert!(!fx.path.exists());
    }

    #[test]
    fn decode_audio_accepts_empty() {
        assert!(matches!(decode_audio(""), Ok(v) if v.is_empty()));
    }

    #[test]
    fn decode_audio_rejects_bad_padding() {
        let Err(err) = decode_audio("aGVsbG8") else {
            panic!("expected padding error");
        };
        assert_eq!(err.kind(), ErrorKind::InvalidAudio);
    }
}
