//! Parallel multipart transmission
//!
//! Reads the relayed byte stream strictly in order, cuts it into
//! sequential fixed-size parts, and transmits them on a bounded worker
//! pool. Workers may finish out of order; the completion set is serialized
//! behind a mutex and parts are registered with the store in ascending
//! index order at commit time.
//!
//! Failure semantics: the first part failure fails the whole upload. No
//! parts are retried and nothing is cleaned up; the store's own garbage
//! collection is assumed to reclaim orphaned parts.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::debug;

use bkt_core::{Error, RelayReader, Result, UploadHandle};

/// Transmission of a single part; implemented by the SDK sender and by
/// test fakes
#[async_trait]
pub trait PartSink: Send + Sync + 'static {
    /// Transmit one part and return its etag
    async fn send_part(&self, part_number: i32, body: Vec<u8>) -> Result<String>;
}

/// Drain `body` into parts of `part_size` bytes and transmit each on a
/// pool of `concurrency` workers.
///
/// Part N's bytes are fully consumed from the relay before part N+1's are
/// read, so a single stream feeds the pool without interleaving payloads.
/// An empty stream still produces one empty part. Returns the total byte
/// count and the completed (part number, etag) set in ascending order.
pub(crate) async fn pump<S: PartSink>(
    body: &mut RelayReader,
    sink: Arc<S>,
    part_size: usize,
    concurrency: usize,
) -> Result<(u64, Vec<(i32, String)>)> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let completed: Arc<Mutex<Vec<(i32, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let mut workers: Vec<JoinHandle<Result<()>>> = Vec::new();
    let mut part_number: i32 = 1;
    let mut total: u64 = 0;

    loop {
        let part = body.fill_part(part_size).await?;
        let len = part.len();
        // The first part goes out even when empty; after that, an empty
        // read means the stream is drained.
        if len == 0 && part_number > 1 {
            break;
        }
        total += len as u64;

        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| Error::Transfer("upload worker pool closed".into()))?;
        let sink = Arc::clone(&sink);
        let completed = Arc::clone(&completed);
        let number = part_number;
        workers.push(tokio::spawn(async move {
            let _permit = permit;
            let etag = sink.send_part(number, part).await?;
            completed.lock().unwrap().push((number, etag));
            Ok(())
        }));

        part_number += 1;
        if len < part_size {
            break;
        }
    }

    for worker in workers {
        worker
            .await
            .map_err(|e| Error::Transfer(format!("upload worker panicked: {e}")))??;
    }

    let mut parts = completed.lock().unwrap().clone();
    parts.sort_by_key(|(number, _)| *number);
    debug!(parts = parts.len(), bytes = total, "all parts acknowledged");
    Ok((total, parts))
}

/// SDK-backed part transmitter for one multipart upload
struct SdkPartSink {
    client: aws_sdk_s3::Client,
    bucket: String,
    key: String,
    upload_id: String,
}

#[async_trait]
impl PartSink for SdkPartSink {
    async fn send_part(&self, part_number: i32, body: Vec<u8>) -> Result<String> {
        let response = self
            .client
            .upload_part()
            .bucket(&self.bucket)
            .key(&self.key)
            .upload_id(&self.upload_id)
            .part_number(part_number)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| Error::Store(e.to_string()))?;
        Ok(response.e_tag().unwrap_or_default().to_string())
    }
}

/// Handle to one in-progress multipart upload
pub struct S3Upload {
    client: aws_sdk_s3::Client,
    bucket: String,
    key: String,
    upload_id: String,
    completed: Vec<(i32, String)>,
}

impl S3Upload {
    pub(crate) fn new(
        client: aws_sdk_s3::Client,
        bucket: String,
        key: String,
        upload_id: String,
    ) -> Self {
        Self {
            client,
            bucket,
            key,
            upload_id,
            completed: Vec::new(),
        }
    }
}

#[async_trait]
impl UploadHandle for S3Upload {
    async fn parallel_stream(
        &mut self,
        mut body: RelayReader,
        part_size: usize,
        concurrency: usize,
    ) -> Result<u64> {
        debug!(
            key = %self.key,
            upload_id = %self.upload_id,
            part_size,
            concurrency,
            "streaming parts"
        );
        let sink = Arc::new(SdkPartSink {
            client: self.client.clone(),
            bucket: self.bucket.clone(),
            key: self.key.clone(),
            upload_id: self.upload_id.clone(),
        });
        let (total, parts) = pump(&mut body, sink, part_size, concurrency).await?;
        self.completed = parts;
        Ok(total)
    }

    async fn commit(&mut self) -> Result<()> {
        let parts: Vec<CompletedPart> = self
            .completed
            .iter()
            .map(|(number, etag)| {
                CompletedPart::builder()
                    .part_number(*number)
                    .e_tag(etag)
                    .build()
            })
            .collect();

        self.client
            .complete_multipart_upload()
            .bucket(&self.bucket)
            .key(&self.key)
            .upload_id(&self.upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(parts))
                    .build(),
            )
            .send()
            .await
            .map_err(|e| Error::Store(e.to_string()))?;

        debug!(key = %self.key, upload_id = %self.upload_id, "upload committed");
        Ok(())
    }
}
