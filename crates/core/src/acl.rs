//! Access control policies and grants
//!
//! Policy names are the canned ACL strings understood by S3 and its
//! work-alikes; this client does not interpret them beyond round-tripping
//! the names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Predefined (canned) ACL policies for buckets and objects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AclPolicy {
    /// Owner gets full control; no one else has any access (default)
    #[default]
    Private,
    /// Owner gets full control; everyone gets read access
    PublicRead,
    /// Owner gets full control; everyone gets read and write access
    PublicReadWrite,
    /// Like private, but Amazon EC2 may read AMI bundles from the bucket
    AwsExecRead,
    /// Owner gets full control; any authenticated AWS account gets read access
    AuthenticatedRead,
    /// Object uploader gets full control; the bucket owner may read it
    BucketOwnerRead,
    /// Both the object uploader and the bucket owner get full control
    BucketOwnerFullControl,
    /// The log delivery service may create and append to log objects
    LogDeliveryWrite,
}

impl AclPolicy {
    /// Every policy this client knows about
    pub const ALL: [AclPolicy; 8] = [
        AclPolicy::Private,
        AclPolicy::PublicRead,
        AclPolicy::PublicReadWrite,
        AclPolicy::AwsExecRead,
        AclPolicy::AuthenticatedRead,
        AclPolicy::BucketOwnerRead,
        AclPolicy::BucketOwnerFullControl,
        AclPolicy::LogDeliveryWrite,
    ];

    /// The wire name of the policy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AwsExecRead => "aws-exec-read",
            Self::AuthenticatedRead => "authenticated-read",
            Self::BucketOwnerRead => "bucket-owner-read",
            Self::BucketOwnerFullControl => "bucket-owner-full-control",
            Self::LogDeliveryWrite => "log-delivery-write",
        }
    }
}

impl fmt::Display for AclPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AclPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Self::Private),
            "public-read" => Ok(Self::PublicRead),
            "public-read-write" => Ok(Self::PublicReadWrite),
            "aws-exec-read" => Ok(Self::AwsExecRead),
            "authenticated-read" => Ok(Self::AuthenticatedRead),
            "bucket-owner-read" => Ok(Self::BucketOwnerRead),
            "bucket-owner-full-control" => Ok(Self::BucketOwnerFullControl),
            "log-delivery-write" => Ok(Self::LogDeliveryWrite),
            _ => Err(Error::InvalidAcl(s.to_string())),
        }
    }
}

/// The entity receiving a grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grantee {
    /// A named user account
    User { name: String },
    /// A predefined group, identified by URI
    Group { uri: String },
}

/// One grant in a bucket or object ACL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclGrant {
    /// Who the grant applies to
    pub grantee: Grantee,

    /// Permission level, passed through from the store as-is
    pub permission: String,
}

impl AclGrant {
    /// Grant to a named user
    pub fn user(name: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            grantee: Grantee::User { name: name.into() },
            permission: permission.into(),
        }
    }

    /// Grant to a group URI
    pub fn group(uri: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            grantee: Grantee::Group { uri: uri.into() },
            permission: permission.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_round_trip() {
        for policy in AclPolicy::ALL {
            assert_eq!(policy.as_str().parse::<AclPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_policy_unknown() {
        let err = "world-writable".parse::<AclPolicy>().unwrap_err();
        assert!(matches!(err, Error::InvalidAcl(_)));
        assert_eq!(err.to_string(), "Unknown ACL policy: world-writable");
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(AclPolicy::BucketOwnerRead.to_string(), "bucket-owner-read");
        assert_eq!(AclPolicy::default(), AclPolicy::Private);
    }

    #[test]
    fn test_grant_constructors() {
        let grant = AclGrant::user("jhunt", "FULL_CONTROL");
        assert_eq!(
            grant.grantee,
            Grantee::User {
                name: "jhunt".into()
            }
        );
        assert_eq!(grant.permission, "FULL_CONTROL");

        let grant = AclGrant::group("http://acs.amazonaws.com/groups/global/AllUsers", "READ");
        assert!(matches!(grant.grantee, Grantee::Group { .. }));
    }
}
