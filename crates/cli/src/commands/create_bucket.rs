//! create-bucket command - Create a new bucket

use clap::Args;
use tracing::debug;

use bkt_core::{AclPolicy, ObjectStore as _, StoreConfig};
use bkt_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Create a new bucket
#[derive(Args, Debug)]
pub struct CreateBucketArgs {
    /// Name of the bucket to create
    pub name: String,

    /// ACL policy to apply to the bucket; run `bkt acls` for the full list
    #[arg(long, alias = "policy", env = "S3_ACL", default_value = "private")]
    pub acl: AclPolicy,
}

/// Execute the create-bucket command
pub async fn execute(
    args: CreateBucketArgs,
    config: &StoreConfig,
    formatter: &Formatter,
) -> ExitCode {
    let client = match S3Client::connect(config).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::from(&e);
        }
    };

    debug!(bucket = %args.name, region = %config.region, acl = %args.acl, "creating bucket");
    match client
        .create_bucket(&args.name, &config.region, args.acl)
        .await
    {
        Ok(()) => {
            formatter.success(&format!(
                "bucket {} created with acl {}.",
                args.name, args.acl
            ));
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to create bucket {}: {e}", args.name));
            ExitCode::from(&e)
        }
    }
}
