//! ObjectStore trait definition
//!
//! This trait defines the interface for S3-compatible storage operations.
//! It allows the engine to be decoupled from the specific S3 SDK
//! implementation, and mocked for testing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;

use crate::acl::{AclGrant, AclPolicy};
use crate::error::Result;
use crate::relay::RelayReader;

/// One row of an object listing snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// Object key
    pub key: String,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,

    /// Owner display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Size in bytes
    pub size: i64,
}

impl ObjectSummary {
    /// Create a summary with just a key, for tests and synthetic listings
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            last_modified: None,
            owner: None,
            etag: None,
            size: 0,
        }
    }
}

/// One row of a bucket listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketSummary {
    /// Bucket name
    pub name: String,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<jiff::Timestamp>,

    /// Owner display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Streamed object content
pub type ObjectBody = Box<dyn AsyncRead + Send + Unpin>;

/// Trait for S3-compatible storage operations
///
/// Implemented by the SDK adapter; the engine only ever sees this seam.
/// Errors come back opaque (`Error::Store`) and are never retried here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List buckets owned by the caller
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>>;

    /// Create a bucket with the given canned ACL policy
    async fn create_bucket(&self, name: &str, region: &str, policy: AclPolicy) -> Result<()>;

    /// Delete an empty bucket
    async fn delete_bucket(&self, name: &str) -> Result<()>;

    /// Full listing of the configured bucket; pagination is the adapter's
    /// concern and no cursor is surfaced
    async fn list_objects(&self) -> Result<Vec<ObjectSummary>>;

    /// Stream an object's content
    async fn get_object(&self, key: &str) -> Result<ObjectBody>;

    /// Delete a single object
    async fn delete_object(&self, key: &str) -> Result<()>;

    /// Apply a canned ACL policy; an empty key addresses the bucket itself
    async fn change_acl(&self, key: &str, policy: AclPolicy) -> Result<()>;

    /// Fetch the grants on a bucket (empty key) or object
    async fn get_acl(&self, key: &str) -> Result<Vec<AclGrant>>;

    /// Start a multipart upload; the content type is fixed here, before
    /// any body byte is transmitted
    async fn new_upload(&self, key: &str, content_type: &str) -> Result<Box<dyn UploadHandle>>;
}

/// Handle to an in-progress multipart upload
#[async_trait]
pub trait UploadHandle: Send {
    /// Read the relayed stream strictly in order, cut it into parts of
    /// `part_size` bytes, and transmit them on `concurrency` workers.
    /// Returns the number of bytes transmitted.
    async fn parallel_stream(
        &mut self,
        body: RelayReader,
        part_size: usize,
        concurrency: usize,
    ) -> Result<u64>;

    /// Finalize the upload, registering parts in ascending index order.
    /// Must only be called after `parallel_stream` returned successfully.
    async fn commit(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_summary_key() {
        let summary = ObjectSummary::key("logs/app.log");
        assert_eq!(summary.key, "logs/app.log");
        assert_eq!(summary.size, 0);
        assert!(summary.etag.is_none());
    }
}
