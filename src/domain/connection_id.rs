//! Identity of one accepted WebSocket connection.

use std::fmt;

/// Random (UUID v4) identifier assigned when an upgrade completes.
///
/// Shows up as the `connection` field in logs and, in per-connection
/// output mode, as the suffix of the connection's output file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Creates a new random `ConnectionId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
