// src/exec/drain.rs

//! Background draining of a child's output pipe.
//!
//! A child that writes more than the OS pipe buffer (typically 64 KiB)
//! blocks until someone reads. Each drainer is a Tokio task that keeps
//! reading into its own in-memory sink while the controller waits on the
//! process, so the child never stalls on a full pipe.
//!
//! Draining is best-effort: read errors are logged and end the drain, but
//! never fail the execution.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::JoinHandle;
use tokio::time::{Instant, timeout};
use tracing::{debug, warn};

const READ_CHUNK: usize = 8192;

/// How long the final flush waits for more bytes before giving up.
const FLUSH_IDLE: Duration = Duration::from_millis(100);

/// Upper bound on the final flush, and so on how long
/// [`StreamDrainer::finish`] takes. Covers pipes inherited by
/// grandchildren that keep writing after the direct child exited.
const FLUSH_LIMIT: Duration = Duration::from_secs(2);

/// Handle to a running drainer task.
///
/// The sink is owned by the task until [`StreamDrainer::finish`] returns it.
pub struct StreamDrainer {
    stream: &'static str,
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Vec<u8>>,
}

impl StreamDrainer {
    /// Start draining `source`. `stream` labels log lines (e.g. `"stdout"`).
    pub fn spawn<R>(stream: &'static str, source: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(drain(stream, source, stop_rx));
        Self {
            stream,
            stop: Some(stop_tx),
            handle,
        }
    }

    /// Stop draining, perform the final flush and hand back everything
    /// captured.
    pub async fn finish(mut self) -> Vec<u8> {
        if let Some(stop) = self.stop.take() {
            // The task may already have hit EOF and exited.
            let _ = stop.send(());
        }

        match self.handle.await {
            Ok(sink) => sink,
            Err(err) => {
                warn!(stream = self.stream, error = %err, "stream drainer task failed");
                Vec::new()
            }
        }
    }
}

async fn drain<R>(stream: &'static str, mut source: R, mut stop: oneshot::Receiver<()>) -> Vec<u8>
where
    R: AsyncRead + Unpin,
{
    let mut sink = Vec::new();
    let mut buf = [0u8; READ_CHUNK];

    loop {
        // Polling the receiver is subject to the task's coop budget, which
        // a source that never returns `Pending` never replenishes.
        if !matches!(stop.try_recv(), Err(TryRecvError::Empty)) {
            break;
        }

        tokio::select! {
            // Stop wins even when data is always ready; anything still in
            // the pipe is picked up by the bounded final flush.
            biased;

            _ = &mut stop => break,

            read = source.read(&mut buf) => match read {
                Ok(0) => {
                    debug!(stream, bytes = sink.len(), "stream reached EOF");
                    return sink;
                }
                Ok(n) => sink.extend_from_slice(&buf[..n]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    warn!(stream, error = %err, "failed to drain process stream");
                    return sink;
                }
            },
        }
    }

    final_flush(stream, &mut source, &mut sink, &mut buf).await;
    sink
}

/// Copy whatever is still readable after the stop signal.
async fn final_flush<R>(stream: &'static str, source: &mut R, sink: &mut Vec<u8>, buf: &mut [u8])
where
    R: AsyncRead + Unpin,
{
    let deadline = Instant::now() + FLUSH_LIMIT;
    let before = sink.len();

    while Instant::now() < deadline {
        match timeout(FLUSH_IDLE, source.read(buf)).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => sink.extend_from_slice(&buf[..n]),
            Ok(Err(err)) if err.kind() == io::ErrorKind::Interrupted => continue,
            Ok(Err(err)) => {
                warn!(stream, error = %err, "failed to flush process stream");
                break;
            }
            Err(_idle) => {
                debug!(stream, "no more output within flush window");
                break;
            }
        }
    }

    debug!(
        stream,
        flushed = sink.len() - before,
        total = sink.len(),
        "stream drainer finished"
    );
}
