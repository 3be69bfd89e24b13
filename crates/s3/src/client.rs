//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from bkt-core.
//! Store errors pass through opaque; nothing here retries.

use async_trait::async_trait;
use aws_sdk_s3::types::{
    BucketCannedAcl, BucketLocationConstraint, CreateBucketConfiguration, ObjectCannedAcl,
};
use tracing::debug;

use bkt_core::{
    AclGrant, AclPolicy, BucketSummary, Error, ObjectBody, ObjectStore, ObjectSummary, Result,
    StoreConfig, UploadHandle,
};

use crate::multipart::S3Upload;

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    bucket: Option<String>,
}

impl S3Client {
    /// Create a client from a validated configuration
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        let credentials = aws_credential_types::Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None, // session token
            None, // expiry
            "bkt-static-credentials",
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            debug!(%endpoint, "using custom endpoint");
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.path_buckets)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    fn bucket(&self) -> Result<&str> {
        self.bucket
            .as_deref()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| Error::Config("missing required --bucket option".into()))
    }
}

/// Map an SDK failure to the error taxonomy: not-found is recognized, the
/// rest passes through opaque
fn store_error(err: impl std::fmt::Display, subject: &str) -> Error {
    let message = err.to_string();
    if message.contains("NotFound")
        || message.contains("NoSuchKey")
        || message.contains("NoSuchBucket")
    {
        Error::NotFound(subject.to_string())
    } else {
        Error::Store(message)
    }
}

fn timestamp(seconds: i64) -> Option<jiff::Timestamp> {
    jiff::Timestamp::from_second(seconds).ok()
}

fn convert_grants(grants: &[aws_sdk_s3::types::Grant]) -> Vec<AclGrant> {
    grants
        .iter()
        .filter_map(|grant| {
            let grantee = grant.grantee()?;
            let permission = grant
                .permission()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default();
            if let Some(uri) = grantee.uri() {
                Some(AclGrant::group(uri, permission))
            } else {
                let name = grantee
                    .display_name()
                    .or(grantee.id())
                    .unwrap_or_default();
                Some(AclGrant::user(name, permission))
            }
        })
        .collect()
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>> {
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| Error::Store(e.to_string()))?;

        let owner = response
            .owner()
            .and_then(|o| o.display_name())
            .map(str::to_string);

        Ok(response
            .buckets()
            .iter()
            .map(|bucket| BucketSummary {
                name: bucket.name().unwrap_or_default().to_string(),
                created_at: bucket.creation_date().and_then(|t| timestamp(t.secs())),
                owner: owner.clone(),
            })
            .collect())
    }

    async fn create_bucket(&self, name: &str, region: &str, policy: AclPolicy) -> Result<()> {
        debug!(bucket = name, %region, %policy, "creating bucket");
        let mut request = self
            .inner
            .create_bucket()
            .bucket(name)
            .acl(BucketCannedAcl::from(policy.as_str()));

        // us-east-1 is the implied location and must not be sent explicitly.
        if region != "us-east-1" {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region))
                    .build(),
            );
        }

        request
            .send()
            .await
            .map_err(|e| Error::Store(e.to_string()))?;
        Ok(())
    }

    async fn delete_bucket(&self, name: &str) -> Result<()> {
        debug!(bucket = name, "deleting bucket");
        self.inner
            .delete_bucket()
            .bucket(name)
            .send()
            .await
            .map_err(|e| store_error(e, name))?;
        Ok(())
    }

    async fn list_objects(&self) -> Result<Vec<ObjectSummary>> {
        let bucket = self.bucket()?;
        let mut summaries = Vec::new();
        let mut continuation: Option<String> = None;

        // The engine works on a complete snapshot; pagination stays here.
        loop {
            let mut request = self
                .inner
                .list_objects_v2()
                .bucket(bucket)
                .fetch_owner(true);
            if let Some(token) = &continuation {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| store_error(e, bucket))?;

            for object in response.contents() {
                summaries.push(ObjectSummary {
                    key: object.key().unwrap_or_default().to_string(),
                    last_modified: object.last_modified().and_then(|t| timestamp(t.secs())),
                    owner: object
                        .owner()
                        .and_then(|o| o.display_name())
                        .map(str::to_string),
                    etag: object.e_tag().map(|e| e.trim_matches('"').to_string()),
                    size: object.size().unwrap_or(0),
                });
            }

            continuation = response.next_continuation_token().map(str::to_string);
            if !response.is_truncated().unwrap_or(false) || continuation.is_none() {
                break;
            }
        }

        debug!(bucket, objects = summaries.len(), "listed objects");
        Ok(summaries)
    }

    async fn get_object(&self, key: &str) -> Result<ObjectBody> {
        let bucket = self.bucket()?;
        let response = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| store_error(e, key))?;

        Ok(Box::new(response.body.into_async_read()))
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        let bucket = self.bucket()?;
        self.inner
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| store_error(e, key))?;
        Ok(())
    }

    async fn change_acl(&self, key: &str, policy: AclPolicy) -> Result<()> {
        let bucket = self.bucket()?;
        if key.is_empty() {
            self.inner
                .put_bucket_acl()
                .bucket(bucket)
                .acl(BucketCannedAcl::from(policy.as_str()))
                .send()
                .await
                .map_err(|e| store_error(e, bucket))?;
        } else {
            self.inner
                .put_object_acl()
                .bucket(bucket)
                .key(key)
                .acl(ObjectCannedAcl::from(policy.as_str()))
                .send()
                .await
                .map_err(|e| store_error(e, key))?;
        }
        Ok(())
    }

    async fn get_acl(&self, key: &str) -> Result<Vec<AclGrant>> {
        let bucket = self.bucket()?;
        if key.is_empty() {
            let response = self
                .inner
                .get_bucket_acl()
                .bucket(bucket)
                .send()
                .await
                .map_err(|e| store_error(e, bucket))?;
            Ok(convert_grants(response.grants()))
        } else {
            let response = self
                .inner
                .get_object_acl()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| store_error(e, key))?;
            Ok(convert_grants(response.grants()))
        }
    }

    async fn new_upload(&self, key: &str, content_type: &str) -> Result<Box<dyn UploadHandle>> {
        let bucket = self.bucket()?;
        let response = self
            .inner
            .create_multipart_upload()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| store_error(e, key))?;

        let upload_id = response.upload_id().unwrap_or_default().to_string();
        if upload_id.is_empty() {
            return Err(Error::Store(
                "multipart upload id missing from response".into(),
            ));
        }

        debug!(key, %upload_id, content_type, "multipart upload started");
        Ok(Box::new(S3Upload::new(
            self.inner.clone(),
            bucket.to_string(),
            key.to_string(),
            upload_id,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::types::{Grantee, Permission, Type};

    #[test]
    fn test_convert_grants_user_and_group() {
        let grants = vec![
            aws_sdk_s3::types::Grant::builder()
                .grantee(
                    Grantee::builder()
                        .r#type(Type::CanonicalUser)
                        .id("abc123")
                        .display_name("jhunt")
                        .build()
                        .unwrap(),
                )
                .permission(Permission::FullControl)
                .build(),
            aws_sdk_s3::types::Grant::builder()
                .grantee(
                    Grantee::builder()
                        .r#type(Type::Group)
                        .uri("http://acs.amazonaws.com/groups/global/AllUsers")
                        .build()
                        .unwrap(),
                )
                .permission(Permission::Read)
                .build(),
        ];

        let converted = convert_grants(&grants);
        assert_eq!(converted.len(), 2);
        assert_eq!(converted[0], AclGrant::user("jhunt", "FULL_CONTROL"));
        assert_eq!(
            converted[1],
            AclGrant::group("http://acs.amazonaws.com/groups/global/AllUsers", "READ")
        );
    }

    #[test]
    fn test_store_error_classification() {
        let err = store_error("NoSuchKey: The specified key does not exist", "a/b");
        assert!(matches!(err, Error::NotFound(_)));

        let err = store_error("SlowDown: please retry", "a/b");
        assert!(matches!(err, Error::Store(_)));
    }
}
