//! Local-to-remote streaming upload
//!
//! Orchestrates the upload path: sniff the content type from the leading
//! bytes when none was given, fix it on the upload before any body byte
//! moves, then relay the source into the parallel part transmitter and
//! commit. The source is read exactly once; the sniffed prefix is replayed
//! by the relay rather than re-read.

use std::io::Read;

use tracing::debug;

use crate::error::Result;
use crate::relay;
use crate::sniff;
use crate::store::ObjectStore;

/// Default part size handed to the parallel uploader: 5 MiB
pub const DEFAULT_PART_SIZE: usize = 5 * (1 << 20);

/// Default number of upload workers
pub const DEFAULT_CONCURRENCY: usize = 2;

/// One upload invocation: destination, typing, and transfer shape
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Destination key within the bucket
    pub key: String,

    /// Explicit content type; when None the type is sniffed from the source
    pub content_type: Option<String>,

    /// Size of each transmitted part, in bytes
    pub part_size: usize,

    /// Number of parallel upload workers
    pub concurrency: usize,
}

impl TransferRequest {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            content_type: None,
            part_size: DEFAULT_PART_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn concurrency(mut self, workers: usize) -> Self {
        self.concurrency = workers.max(1);
        self
    }
}

/// Upload a local source to the store.
///
/// Returns the number of bytes transmitted. Any failure in sniffing,
/// relaying, or transmitting aborts the whole transfer; there is no
/// partial success and no retry.
pub async fn upload<R>(store: &dyn ObjectStore, request: &TransferRequest, mut source: R) -> Result<u64>
where
    R: Read + Send + 'static,
{
    let (content_type, prefix) = match &request.content_type {
        Some(explicit) => (explicit.clone(), Vec::new()),
        None => {
            let sniffed = sniff::sniff(&mut source)?;
            debug!(
                media_type = %sniffed.media_type,
                bytes = sniffed.prefix.len(),
                "detected content type"
            );
            (sniffed.media_type, sniffed.prefix)
        }
    };

    // The content type is fixed here; no body byte has been transmitted yet.
    let mut upload = store.new_upload(&request.key, &content_type).await?;

    let body = relay::spawn(prefix, source);
    let sent = upload
        .parallel_stream(body, request.part_size, request.concurrency)
        .await?;
    upload.commit().await?;

    debug!(key = %request.key, bytes = sent, "upload committed");
    Ok(sent)
}
