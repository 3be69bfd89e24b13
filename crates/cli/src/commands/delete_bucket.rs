//! delete-bucket command - Delete a bucket
//!
//! With -R, every object in the bucket is deleted first, sequentially and
//! fail-fast, before the bucket itself is removed.

use clap::Args;
use tracing::debug;

use bkt_core::{bulk, BulkAction, BulkSelection, ObjectStore as _, StoreConfig};
use bkt_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Delete a bucket
#[derive(Args, Debug)]
pub struct DeleteBucketArgs {
    /// Name of the bucket to delete
    pub name: String,

    /// Recursively delete every object in the bucket first
    #[arg(short = 'R', long)]
    pub recursive: bool,
}

/// Execute the delete-bucket command
pub async fn execute(
    args: DeleteBucketArgs,
    config: &StoreConfig,
    formatter: &Formatter,
) -> ExitCode {
    // Recursive deletion addresses the named bucket, whatever --bucket says.
    let config = config.clone().with_bucket(&args.name);

    let client = match S3Client::connect(&config).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::from(&e);
        }
    };

    if args.recursive {
        debug!(bucket = %args.name, "recursively deleting all objects");
        let listing = match client.list_objects().await {
            Ok(listing) => listing,
            Err(e) => {
                formatter.error(&format!("Failed to list {}: {e}", args.name));
                return ExitCode::from(&e);
            }
        };

        // An empty root selects the entire snapshot.
        let selection = BulkSelection::select("", &listing);
        if let Err(e) = bulk::apply(&client, BulkAction::Delete, &selection).await {
            formatter.error(&format!("Failed to empty bucket {}: {e}", args.name));
            return ExitCode::from(&e);
        }
    }

    match client.delete_bucket(&args.name).await {
        Ok(()) => {
            formatter.success(&format!("bucket {} deleted.", args.name));
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to delete bucket {}: {e}", args.name));
            ExitCode::from(&e)
        }
    }
}
