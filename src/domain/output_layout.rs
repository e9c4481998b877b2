//! Mapping from connections to output files.
//!
//! [`OutputLayout::Shared`] funnels every connection into one file;
//! [`OutputLayout::PerConnection`] derives a distinct file per
//! [`ConnectionId`] from the same configured path.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use super::ConnectionId;

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "audio_output.pcm";

/// Selects how connections map onto output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// All connections append to a single file.
    #[default]
    Shared,
    /// Each connection appends to its own file.
    PerConnection,
}

impl OutputMode {
    /// Returns the snake_case name used in configuration and `/stats`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::PerConnection => "per_connection",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shared" => Ok(Self::Shared),
            "per_connection" | "per-connection" => Ok(Self::PerConnection),
            other => Err(format!("unknown output mode: {other}")),
        }
    }
}

/// Resolved output layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLayout {
    /// Every connection writes to `path`.
    Shared(PathBuf),
    /// Each connection writes to `<dir>/<stem>-<connection_id>.<extension>`.
    PerConnection {
        /// Directory holding the per-connection files.
        dir: PathBuf,
        /// File name prefix.
        stem: String,
        /// File extension without the leading dot; empty for none.
        extension: String,
    },
}

impl OutputLayout {
    /// Builds a layout from a configured path and mode.
    ///
    /// In per-connection mode the path acts as a template: its parent
    /// directory, file stem and extension are reused for every connection.
    #[must_use]
    pub fn new(path: impl AsRef<Path>, mode: OutputMode) -> Self {
        let path = path.as_ref();
        match mode {
            OutputMode::Shared => Self::Shared(path.to_path_buf()),
            OutputMode::PerConnection => {
                let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "audio_output".to_string());
                let extension = path
                    .extension()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Self::PerConnection {
                    dir,
                    stem,
                    extension,
                }
            }
        }
    }

    /// Returns the mode this layout was built with.
    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        match self {
            Self::Shared(_) => OutputMode::Shared,
            Self::PerConnection { .. } => OutputMode::PerConnection,
        }
    }

    /// Returns the file that audio from `connection` is appended to.
    #[must_use]
    pub fn path_for(&self, connection: ConnectionId) -> PathBuf {
        match self {
            Self::Shared(path) => path.clone(),
            Self::PerConnection {
                dir,
                stem,
                extension,
            } => {
                let name = if extension.is_empty() {
                    format!("{stem}-{connection}")
                } else {
                    format!("{stem}-{connection}.{extension}")
                };
                dir.join(name)
            }
        }
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::Shared(PathBuf::from(DEFAULT_OUTPUT_PATH))
    }
}
