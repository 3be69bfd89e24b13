//! rm command - Delete objects
//!
//! With -R, selects every key under the given path from a listing
//! snapshot and deletes them sequentially, stopping at the first failure.
//! There is no rollback: keys deleted before a failure stay deleted.

use clap::Args;
use tracing::debug;

use bkt_core::{bulk, BulkAction, BulkSelection, ObjectStore as _, StoreConfig};
use bkt_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Delete objects from a bucket
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Object key (or, with -R, path root) to delete
    pub key: String,

    /// Recursively delete every object under the given path
    #[arg(short = 'R', long)]
    pub recursive: bool,
}

/// Execute the rm command
pub async fn execute(args: RmArgs, config: &StoreConfig, formatter: &Formatter) -> ExitCode {
    let bucket = match config.require_bucket() {
        Ok(b) => b.to_string(),
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    let client = match S3Client::connect(config).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::from(&e);
        }
    };

    if args.recursive {
        debug!(%bucket, root = %args.key, "recursively deleting");
        let listing = match client.list_objects().await {
            Ok(listing) => listing,
            Err(e) => {
                formatter.error(&format!("Failed to list {bucket}: {e}"));
                return ExitCode::from(&e);
            }
        };

        let selection = BulkSelection::select(&args.key, &listing);
        if selection.is_empty() {
            formatter.warning(&format!("no objects under {bucket}:{}", args.key));
            return ExitCode::Success;
        }

        if let Err(e) = bulk::apply(&client, BulkAction::Delete, &selection).await {
            formatter.error(&format!("Failed to delete: {e}"));
            return ExitCode::from(&e);
        }

        formatter.success(&format!("removed {} object(s).", selection.len()));
        return ExitCode::Success;
    }

    debug!(%bucket, key = %args.key, "deleting");
    match client.delete_object(&args.key).await {
        Ok(()) => {
            formatter.success(&format!("removed {bucket}:{}.", args.key));
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to delete {bucket}:{}: {e}", args.key));
            ExitCode::from(&e)
        }
    }
}
