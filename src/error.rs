//! Ingest error types with stable wire kinds.
//!
//! [`IngestError`] is the central error type for message handling. Each
//! variant maps to an [`ErrorKind`] that is surfaced in the `kind` field of
//! an error acknowledgment, next to the free-text `message`.

use std::fmt;

use serde::Serialize;

/// Failure class reported to clients.
///
/// ```json
/// { "status": "error", "kind": "invalid_audio", "message": "invalid audio payload: ..." }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The frame was not valid JSON.
    MalformedJson,
    /// The JSON was valid but not a recognized message shape.
    InvalidMessage,
    /// The `audio` field was not valid base64.
    InvalidAudio,
    /// Writing to the output file failed.
    Io,
    /// The writer task is no longer running.
    SinkUnavailable,
}

impl ErrorKind {
    /// Returns the snake_case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedJson => "malformed_json",
            Self::InvalidMessage => "invalid_message",
            Self::InvalidAudio => "invalid_audio",
            Self::Io => "io",
            Self::SinkUnavailable => "sink_unavailable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised while handling one inbound message.
///
/// None of these are fatal to the connection: the handler converts them
/// into an error acknowledgment and keeps reading.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Frame could not be parsed as JSON.
    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// Frame parsed but has the wrong shape.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// `audio` field is not valid base64.
    #[error("invalid audio payload: {0}")]
    InvalidAudio(#[from] base64::DecodeError),

    /// Output file could not be opened or written.
    #[error("failed to write audio: {0}")]
    Io(#[from] std::io::Error),

    /// Writer task has shut down.
    #[error("audio sink unavailable")]
    SinkUnavailable,
}

impl IngestError {
    /// Returns the wire kind for this variant.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedJson(_) => ErrorKind::MalformedJson,
            Self::InvalidMessage(_) => ErrorKind::InvalidMessage,
            Self::InvalidAudio(_) => ErrorKind::InvalidAudio,
            Self::Io(_) => ErrorKind::Io,
            Self::SinkUnavailable => ErrorKind::SinkUnavailable,
        }
    }
}
