//! Audio relay pipe
//!
//! Moves chunks from an upstream audio stream to a downstream consumer
//! through a bounded channel. The producer side runs in its own task and
//! only pulls the next upstream chunk once the previous one has been
//! handed over, so memory stays bounded by the channel capacity.
//!
//! Failure handling:
//! - upstream error: everything received so far is delivered, followed by
//!   a single `Err` item, then the stream ends
//! - downstream gone: the producer stops and drops the upstream stream,
//!   which releases its connection

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

use crate::error::Result;

/// Chunks buffered between producer and consumer
pub const DEFAULT_RELAY_CAPACITY: usize = 1;

/// Consumer side of the pipe
pub type RelayStream = ReceiverStream<Result<Bytes>>;

/// How a relay ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Upstream finished and every chunk was delivered
    Completed { chunks: usize, bytes: usize },
    /// Upstream failed; the error was forwarded downstream
    Failed {
        chunks: usize,
        bytes: usize,
        error: String,
    },
    /// Downstream went away before upstream finished
    Cancelled { chunks: usize, bytes: usize },
}

impl RelayOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Chunks delivered downstream
    pub fn chunks(&self) -> usize {
        match self {
            Self::Completed { chunks, .. }
            | Self::Failed { chunks, .. }
            | Self::Cancelled { chunks, .. } => *chunks,
        }
    }
}

/// Start relaying `upstream`.
///
/// Returns the consumer stream and a handle resolving to the outcome once
/// the producer task stops.
pub fn relay<S>(upstream: S, capacity: usize) -> (RelayStream, JoinHandle<RelayOutcome>)
where
    S: Stream<Item = Result<Bytes>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let handle = tokio::spawn(pump(upstream, tx));
    (ReceiverStream::new(rx), handle)
}

async fn pump<S>(upstream: S, tx: mpsc::Sender<Result<Bytes>>) -> RelayOutcome
where
    S: Stream<Item = Result<Bytes>> + Send,
{
    tokio::pin!(upstream);

    let mut chunks = 0usize;
    let mut bytes = 0usize;

    let outcome = loop {
        // Claim a slot before pulling, so upstream is never read ahead of the consumer
        let permit = tokio::select! {
            biased;
            _ = tx.closed() => break RelayOutcome::Cancelled { chunks, bytes },
            permit = tx.reserve() => match permit {
                Ok(permit) => permit,
                Err(_) => break RelayOutcome::Cancelled { chunks, bytes },
            },
        };

        let next = tokio::select! {
            biased;
            _ = tx.closed() => break RelayOutcome::Cancelled { chunks, bytes },
            next = upstream.next() => next,
        };

        match next {
            Some(Ok(chunk)) => {
                let len = chunk.len();
                permit.send(Ok(chunk));
                chunks += 1;
                bytes += len;
                debug!("Relayed chunk {} ({} bytes)", chunks, len);
            }
            Some(Err(e)) => {
                let error = e.to_string();
                permit.send(Err(e));
                break RelayOutcome::Failed {
                    chunks,
                    bytes,
                    error,
                };
            }
            None => break RelayOutcome::Completed { chunks, bytes },
        }
    };

    match &outcome {
        RelayOutcome::Completed { chunks, bytes } => {
            info!("Audio relay complete: {} chunks, {} bytes", chunks, bytes)
        }
        RelayOutcome::Failed { chunks, error, .. } => {
            warn!("Audio relay failed after {} chunks: {}", chunks, error)
        }
        RelayOutcome::Cancelled { chunks, .. } => {
            info!("Audio relay cancelled by client after {} chunks", chunks)
        }
    }

    outcome
}
