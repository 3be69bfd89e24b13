//! bkt-s3: S3 SDK adapter for the bkt CLI client
//!
//! This crate implements the ObjectStore trait from bkt-core using
//! aws-sdk-s3, including the parallel multipart upload path. It is the
//! only crate that directly depends on the AWS SDK.

pub mod client;
pub mod multipart;

pub use client::S3Client;
