//! Single-owner writer task for audio output files.
//!
//! [`AudioSink`] is a cloneable handle around a [`tokio::sync::mpsc`]
//! queue. One background task drains the queue and performs every append,
//! so chunks from concurrent connections land whole and in queue order.
//! Each write opens the target in append mode, writes, flushes and closes
//! it again; no file handle outlives a single request.

use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};

use crate::error::IngestError;

/// Default capacity of the writer queue.
pub const DEFAULT_SINK_CAPACITY: usize = 1024;

/// One queued append.
#[derive(Debug)]
struct WriteRequest {
    path: PathBuf,
    bytes: Vec<u8>,
    reply: oneshot::Sender<std::io::Result<usize>>,
}

/// Handle to the audio writer task.
///
/// Cloning the handle is cheap. The writer task stops once every handle has
/// been dropped and the queue is drained.
#[derive(Debug, Clone)]
pub struct AudioSink {
    sender: mpsc::Sender<WriteRequest>,
}

impl AudioSink {
    /// Spawns the writer task on the current Tokio runtime.
    ///
    /// A `capacity` of zero is raised to one.
    #[must_use]
    pub fn spawn(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        tokio::spawn(run_writer(receiver));
        Self { sender }
    }

    /// Appends `bytes` to the file at `path` and waits for the write to
    /// complete. Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Io`] if the file cannot be opened or written,
    /// and [`IngestError::SinkUnavailable`] if the writer task has stopped.
    pub async fn append(&self, path: PathBuf, bytes: Vec<u8>) -> Result<usize, IngestError> {
        let (reply, done) = oneshot::channel();
        self.sender
            .send(WriteRequest { path, bytes, reply })
            .await
            .map_err(|_| IngestError::SinkUnavailable)?;
        let written = done.await.map_err(|_| IngestError::SinkUnavailable)??;
        Ok(written)
    }

    /// Returns `true` if the writer task is no longer accepting requests.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

async fn run_writer(mut receiver: mpsc::Receiver<WriteRequest>) {
    while let Some(request) = receiver.recv().await {
        let result = append_to_file(&request.path, &request.bytes).await;
        if let Err(e) = &result {
            tracing::warn!(path = %request.path.display(), error = %e, "audio append failed");
        }
        // The requester may have gone away; the write already happened.
        let _ = request.reply.send(result);
    }
    tracing::debug!("audio sink writer stopped");
}

async fn append_to_file(path: &Path, bytes: &[u8]) -> std::io::Result<usize> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(bytes.len())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn temp_dir() -> tempfile::TempDir {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("failed to create temp dir");
        };
        dir
    }

    #[tokio::test]
    async fn append_creates_and_extends_file() {
        let dir = temp_dir();
        let path = dir.path().join("out.pcm");
        let sink = AudioSink::spawn(8);

        let Ok(n) = sink.append(path.clone(), b"hel".to_vec()).await else {
            panic!("first append failed");
        };
        assert_eq!(n, 3);
        let Ok(n) = sink.append(path.clone(), b"lo".to_vec()).await else {
            panic!("second append failed");
        };
        assert_eq!(n, 2);

        let contents = std::fs::read(&path).unwrap_or_default();
        assert_eq!(contents, b"hello");
    }

    #[tokio::test]
    async fn empty_append_creates_empty_file() {
        let dir = temp_dir();
        let path = dir.path().join("empty.pcm");
        let sink = AudioSink::spawn(1);

        assert!(matches!(sink.append(path.clone(), Vec::new()).await, Ok(0)));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn missing_directory_is_io_error() {
        let dir = temp_dir();
        let path = dir.path().join("no-such-dir").join("out.pcm");
        let sink = AudioSink::spawn(1);

        let Err(err) = sink.append(path, b"x".to_vec()).await else {
            panic!("expected io error");
        };
        assert_eq!(err.kind(), ErrorKind::Io);
        // The writer keeps running after a failed request.
        assert!(!sink.is_closed());
    }

    #[tokio::test]
    async fn closed_queue_is_sink_unavailable() {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);
        let sink = AudioSink { sender };

        assert!(sink.is_closed());
        let Err(err) = sink.append(PathBuf::from("unused.pcm"), vec![1]).await else {
            panic!("expected sink unavailable");
        };
        assert_eq!(err.kind(), ErrorKind::SinkUnavailable);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_land_as_whole_chunks() {
        const CHUNK: usize = 256;
        const WRITERS: u8 = 16;

        let dir = temp_dir();
        let path = dir.path().join("shared.pcm");
        let sink = AudioSink::spawn(4);

        let mut handles = Vec::new();
        for tag in 0..WRITERS {
            let sink = sink.clone();
            let path = path.clone();
            handles.push(tokio::spawn(async move {
                sink.append(path, vec![tag; CHUNK]).await
            }));
        }
        for handle in handles {
            assert!(matches!(handle.await, Ok(Ok(CHUNK))));
        }

        let contents = std::fs::read(&path).unwrap_or_default();
        assert_eq!(contents.len(), CHUNK * usize::from(WRITERS));
        let mut seen = std::collections::HashSet::new();
        for chunk in contents.chunks(CHUNK) {
            let Some(&first) = chunk.first() else {
                panic!("empty chunk");
            };
            assert!(chunk.iter().all(|&b| b == first), "interleaved chunk");
            assert!(seen.insert(first), "duplicate chunk");
        }
    }
}
