//! ls command - List the objects in a bucket

use clap::Args;
use comfy_table::{presets, Table};

use bkt_core::{ObjectStore as _, StoreConfig};
use bkt_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// List the objects in a bucket
#[derive(Args, Debug)]
pub struct LsArgs {}

/// Execute the ls command
pub async fn execute(_args: LsArgs, config: &StoreConfig, formatter: &Formatter) -> ExitCode {
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

    let listing = match client.list_objects().await {
        Ok(listing) => listing,
        Err(e) => {
            formatter.error(&format!("Failed to list {bucket}: {e}"));
            return ExitCode::from(&e);
        }
    };

    if listing.is_empty() {
        formatter.warning("no files found.");
        return ExitCode::Success;
    }

    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(["file", "last modified", "owner", "etag", "size"]);
    for object in &listing {
        table.add_row([
            object.key.clone(),
            object
                .last_modified
                .map(|t| t.to_string())
                .unwrap_or_default(),
            object.owner.clone().unwrap_or_default(),
            object.etag.clone().unwrap_or_default(),
            humansize::format_size(object.size.max(0) as u64, humansize::BINARY),
        ]);
    }
    formatter.println(&table.to_string());

    ExitCode::Success
}
