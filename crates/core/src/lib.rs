//! bkt-core: transfer and bulk-operation engine for the bkt CLI
//!
//! This crate provides the storage-independent parts of the client:
//! - Connection configuration
//! - Content-type sniffing from a leading byte sample
//! - The stream relay feeding the parallel upload path
//! - Recursive key selection and sequential bulk actions
//! - The ObjectStore trait for S3 operations
//!
//! It is designed to be independent of any specific S3 SDK, allowing the
//! engine to be tested against mocks and the SDK adapter to be swapped.

pub mod acl;
pub mod bulk;
pub mod config;
pub mod error;
pub mod relay;
pub mod select;
pub mod sniff;
pub mod store;
pub mod transfer;

pub use acl::{AclGrant, AclPolicy, Grantee};
pub use bulk::BulkAction;
pub use config::StoreConfig;
pub use error::{Error, Result};
pub use relay::RelayReader;
pub use select::BulkSelection;
pub use store::{BucketSummary, ObjectBody, ObjectStore, ObjectSummary, UploadHandle};
pub use transfer::{TransferRequest, DEFAULT_CONCURRENCY, DEFAULT_PART_SIZE};
