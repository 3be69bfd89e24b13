//! acls command - Describe the known access policies
//!
//! Purely informational; never contacts the store.

use bkt_core::AclPolicy;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

fn describe(policy: AclPolicy) -> &'static str {
    match policy {
        AclPolicy::Private => {
            "The bucket owner has full read/write control over the bucket and\n\
             its constituent files. No one else has any access, whatsoever.\n\
             This is the default policy."
        }
        AclPolicy::PublicRead => {
            "The bucket owner has full read/write control over everything.\n\
             Anonymous users (aka Everyone) have read access to files within\n\
             the bucket."
        }
        AclPolicy::PublicReadWrite => {
            "Like public-read, except that the Everyone group is also given\n\
             write access to upload new files, overwrite existing files,\n\
             delete files, etc. Not recommended."
        }
        AclPolicy::AwsExecRead => {
            "Like private, except that the Amazon EC2 system is able to read\n\
             files to download Amazon Machine Images (AMIs) stored in the\n\
             bucket. Not useful to S3 work-alike systems, generally."
        }
        AclPolicy::AuthenticatedRead => {
            "The bucket owner has full read/write control over everything.\n\
             Authenticated users (anyone with an AWS account) have read\n\
             access."
        }
        AclPolicy::BucketOwnerRead => {
            "(This policy only applies to files uploaded to buckets)\n\
             The account who uploaded the file has full control over it, but\n\
             the bucket owner is allowed to read it."
        }
        AclPolicy::BucketOwnerFullControl => {
            "(This policy only applies to files uploaded to buckets)\n\
             Both the account who uploaded the file and the bucket owner\n\
             have full control of the file."
        }
        AclPolicy::LogDeliveryWrite => {
            "The log delivery service is able to create destination log files\n\
             in this bucket and append to them. Not generally useful to S3\n\
             work-alike systems."
        }
    }
}

/// Execute the acls command
pub fn execute(formatter: &Formatter) -> ExitCode {
    formatter.println("This client knows about the following ACL policies:\n");
    for policy in AclPolicy::ALL {
        formatter.println(&format!("  {policy}"));
        for line in describe(policy).lines() {
            formatter.println(&format!("    {}", line.trim()));
        }
        formatter.println("");
    }
    ExitCode::Success
}
