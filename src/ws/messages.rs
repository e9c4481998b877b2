//! WebSocket message types: inbound audio messages and acknowledgments.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ErrorKind, IngestError};

/// Inbound client message.
///
/// No schema is enforced. Only `audio` is validated; `type` is read as a
/// log label when it is a string, and every other key is ignored. Valid
/// JSON that is not an object carries no audio.
///
/// ```json
/// { "type": "input_audio_buffer.append", "audio": "aGVsbG8=" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    /// Event-type label sent by capture clients, if it is a string.
    pub event_type: Option<String>,
    /// Base64-encoded audio chunk, if the `audio` key is present.
    pub audio: Option<String>,
}

impl InboundMessage {
    /// Parses raw frame bytes. Bytes that are not UTF-8 JSON are
    /// reported as malformed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::MalformedJson`] if `frame` is not JSON, and
    /// [`IngestError::InvalidMessage`] if `audio` is present but not a
    /// string.
    pub fn parse_slice(frame: &[u8]) -> Result<Self, IngestError> {
        let value: Value = serde_json::from_slice(frame)?;
        Self::from_value(value)
    }

    /// Converts an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::InvalidMessage`] if `audio` is present but
    /// not a string (`null` included).
    pub fn from_value(value: Value) -> Result<Self, IngestError> {
        let Value::Object(mut map) = value else {
            return Ok(Self::default());
        };

        let event_type = map
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let audio = match map.remove("audio") {
            None => None,
            Some(Value::String(audio)) => Some(audio),
            Some(other) => {
                return Err(IngestError::InvalidMessage(format!(
                    "audio must be a base64 string, got {}",
                    json_type_name(&other)
                )));
            }
        };

        Ok(Self { event_type, audio })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Server → client acknowledgment, one per inbound frame.
///
/// Success is exactly `{"status":"ok"}`; failures carry the error kind and
/// the human-readable error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Ack {
    /// The message was handled.
    Ok,
    /// The message was rejected.
    Error {
        /// Failure class.
        kind: ErrorKind,
        /// Error description.
        message: String,
    },
}

impl Ack {
    /// Returns `true` for [`Ack::Ok`].
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Serializes the acknowledgment to JSON text.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"status":"error","kind":"io","message":"failed to encode response"}"#.to_string()
        })
    }
}

impl From<&IngestError> for Ack {
    fn from(err: &IngestError) -> Self {
        Self::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
