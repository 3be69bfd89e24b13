//! list-buckets command - List all buckets you own

use clap::Args;
use comfy_table::{presets, Table};

use bkt_core::{ObjectStore as _, StoreConfig};
use bkt_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// List all buckets you own
#[derive(Args, Debug)]
pub struct ListBucketsArgs {}

/// Execute the list-buckets command
pub async fn execute(
    _args: ListBucketsArgs,
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

    let buckets = match client.list_buckets().await {
        Ok(buckets) => buckets,
        Err(e) => {
            formatter.error(&format!("Failed to list buckets: {e}"));
            return ExitCode::from(&e);
        }
    };

    if buckets.is_empty() {
        formatter.warning("no buckets found.");
        return ExitCode::Success;
    }

    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(["bucket", "created at", "owner"]);
    for bucket in &buckets {
        table.add_row([
            bucket.name.clone(),
            bucket
                .created_at
                .map(|t| t.to_string())
                .unwrap_or_default(),
            bucket.owner.clone().unwrap_or_default(),
        ]);
    }
    formatter.println(&table.to_string());

    ExitCode::Success
}
