//! Stream relay
//!
//! Bridges a blocking, pull-based local source (a file or standard input)
//! into the async upload path through a bounded channel. One producer task
//! forwards the sniffed prefix first, then copies the rest of the source in
//! order until end-of-stream. The bounded channel blocks the producer when
//! the uploader lags, so memory stays bounded regardless of source size.
//!
//! Closing the channel signals end-of-stream; a read failure travels through
//! the channel as an item and surfaces on the consumer as an ordinary error.
//! There is no partial success: either the full stream crosses the relay or
//! the transfer fails.

use std::io::Read;

use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{Error, Result};

/// Size of each chunk forwarded over the relay
pub const RELAY_CHUNK: usize = 64 * 1024;

/// Chunks buffered in flight before the producer blocks
pub const RELAY_DEPTH: usize = 16;

/// Spawn the relay producer and return the consuming half.
///
/// `prefix` is replayed verbatim before the first byte of `source`, so a
/// stream that was sniffed is transmitted whole without rewinding.
pub fn spawn<R>(prefix: Vec<u8>, mut source: R) -> RelayReader
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<std::io::Result<Vec<u8>>>(RELAY_DEPTH);

    tokio::task::spawn_blocking(move || {
        if !prefix.is_empty() && tx.blocking_send(Ok(prefix)).is_err() {
            // Receiver gone: the transfer already failed downstream.
            return;
        }
        let mut buf = vec![0u8; RELAY_CHUNK];
        loop {
            match source.read(&mut buf) {
                Ok(0) => {
                    debug!("relay source reached end-of-stream");
                    break;
                }
                Ok(n) => {
                    if tx.blocking_send(Ok(buf[..n].to_vec())).is_err() {
                        return;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    // Close the relay in an error state; the consumer sees
                    // this as a failed read.
                    let _ = tx.blocking_send(Err(e));
                    return;
                }
            }
        }
        // Dropping the sender closes the relay in a success state.
    });

    RelayReader {
        rx,
        pending: Vec::new(),
        pos: 0,
    }
}

/// Consuming half of the relay
///
/// Reassembles relay chunks into exact part-sized buffers, preserving
/// source byte order.
pub struct RelayReader {
    rx: mpsc::Receiver<std::io::Result<Vec<u8>>>,
    pending: Vec<u8>,
    pos: usize,
}

impl RelayReader {
    /// Collect up to `part_size` bytes in source order.
    ///
    /// Returns fewer bytes only when the stream ends; an empty buffer means
    /// the relay is drained. A relay closed in an error state yields
    /// [`Error::Transfer`].
    pub async fn fill_part(&mut self, part_size: usize) -> Result<Vec<u8>> {
        let mut part = Vec::new();
        while part.len() < part_size {
            if self.pos < self.pending.len() {
                let take = (part_size - part.len()).min(self.pending.len() - self.pos);
                part.extend_from_slice(&self.pending[self.pos..self.pos + take]);
                self.pos += take;
                continue;
            }
            match self.rx.recv().await {
                Some(Ok(chunk)) => {
                    self.pending = chunk;
                    self.pos = 0;
                }
                Some(Err(e)) => {
                    return Err(Error::Transfer(format!("reading source: {e}")));
                }
                None => break,
            }
        }
        Ok(part)
    }
}
