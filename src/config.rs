//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every setting has a default, so an
//! empty environment reproduces the classic behavior: listen on
//! `0.0.0.0:8765` and append to `audio_output.pcm`.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::audio_sink::DEFAULT_SINK_CAPACITY;
use crate::domain::output_layout::DEFAULT_OUTPUT_PATH;
use crate::domain::{OutputLayout, OutputMode};

/// Default bind address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8765";

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`SinkConfig::from_env`].
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Socket address to bind the server to (e.g. `0.0.0.0:8765`).
    pub listen_addr: SocketAddr,

    /// Shared output file, or the template for per-connection files.
    pub output_path: PathBuf,

    /// How connections map onto output files.
    pub output_mode: OutputMode,

    /// Capacity of the audio writer queue.
    pub sink_capacity: usize,
}

impl SinkConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()?;

        let output_path = std::env::var("AUDIO_OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let output_mode = match std::env::var("AUDIO_OUTPUT_MODE") {
            Ok(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!(error = %e, "falling back to shared output mode");
                OutputMode::Shared
            }),
            Err(_) => OutputMode::Shared,
        };

        let sink_capacity = parse_env("AUDIO_SINK_CAPACITY", DEFAULT_SINK_CAPACITY);

        Ok(Self {
            listen_addr,
            output_path,
            output_mode,
            sink_capacity,
        })
    }

    /// Resolves the configured path and mode into an [`OutputLayout`].
    #[must_use]
    pub fn output_layout(&self) -> OutputLayout {
        OutputLayout::new(&self.output_path, self.output_mode)
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8765)),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            output_mode: OutputMode::Shared,
            sink_capacity: DEFAULT_SINK_CAPACITY,
        }
    }
}

/// Parses an environment variable as `T`, returning `default` when it is
/// missing. A present but unparsable value also yields `default`, with a
/// warning.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    parse_or_default(key, std::env::var(key).ok().as_deref(), default)
}

fn parse_or_default<T: std::str::FromStr>(key: &str, raw: Option<&str>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(key, value = raw, "invalid value, using default");
        default
    })
}
