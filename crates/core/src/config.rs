//! Connection configuration
//!
//! The connection settings for one invocation, collected once and passed
//! explicitly into every operation. There is no process-wide option state.

use url::Url;

use crate::error::{Error, Result};

/// Default region when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Immutable connection settings for an S3-compatible endpoint
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Access key ID
    pub access_key_id: String,

    /// Secret access key
    pub secret_access_key: String,

    /// Endpoint URL for S3 work-alikes; None targets AWS itself
    pub endpoint: Option<String>,

    /// Region to operate in
    pub region: String,

    /// Bucket to operate on, for commands that address one
    pub bucket: Option<String>,

    /// Use path-based bucket addressing instead of DNS-style
    pub path_buckets: bool,
}

impl StoreConfig {
    /// Create a configuration with required credentials and defaults
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            endpoint: None,
            region: DEFAULT_REGION.to_string(),
            bucket: None,
            path_buckets: false,
        }
    }

    /// Replace the configured bucket
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Check the configuration before any network call is made
    pub fn validate(&self) -> Result<()> {
        if self.access_key_id.is_empty() {
            return Err(Error::Config(
                "missing required --aki (or $S3_AKI) value".into(),
            ));
        }
        if self.secret_access_key.is_empty() {
            return Err(Error::Config(
                "missing required --key (or $S3_KEY) value".into(),
            ));
        }
        if let Some(endpoint) = &self.endpoint {
            Url::parse(endpoint)
                .map_err(|e| Error::Config(format!("invalid --s3-url '{endpoint}': {e}")))?;
        }
        Ok(())
    }

    /// The configured bucket, or a configuration error
    pub fn require_bucket(&self) -> Result<&str> {
        self.bucket
            .as_deref()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| Error::Config("missing required --bucket option".into()))
    }
}
