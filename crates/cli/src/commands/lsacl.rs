//! lsacl command - List the access grants on a bucket or object
//!
//! With -R, walks every key under the path and prints each key's grants.

use clap::Args;
use tracing::debug;

use bkt_core::{AclGrant, BulkSelection, Grantee, ObjectStore as _, StoreConfig};
use bkt_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// List the access grants on a bucket or object
#[derive(Args, Debug)]
pub struct LsaclArgs {
    /// Object key (or, with -R, path root); omit to inspect the bucket
    pub key: Option<String>,

    /// Recursively list grants of every object under the path
    #[arg(short = 'R', long)]
    pub recursive: bool,
}

/// Execute the lsacl command
pub async fn execute(args: LsaclArgs, config: &StoreConfig, formatter: &Formatter) -> ExitCode {
    let path = args.key.clone().unwrap_or_default();

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
        debug!(%bucket, root = %path, "recursively listing acls");
        let listing = match client.list_objects().await {
            Ok(listing) => listing,
            Err(e) => {
                formatter.error(&format!("Failed to list {bucket}: {e}"));
                return ExitCode::from(&e);
            }
        };

        let selection = BulkSelection::select(&path, &listing);
        for key in selection.keys() {
            match client.get_acl(key).await {
                Ok(grants) => {
                    for line in render_acl(key, &grants) {
                        formatter.println(&line);
                    }
                }
                Err(e) => {
                    formatter.error(&format!("Failed to read acl of {bucket}:{key}: {e}"));
                    return ExitCode::from(&e);
                }
            }
        }
        return ExitCode::Success;
    }

    match client.get_acl(&path).await {
        Ok(grants) => {
            let label = if path.is_empty() { &bucket } else { &path };
            for line in render_acl(label, &grants) {
                formatter.println(&line);
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to read acl: {e}"));
            ExitCode::from(&e)
        }
    }
}

/// Render one key's grants, with the key only on the first line
fn render_acl(key: &str, grants: &[AclGrant]) -> Vec<String> {
    if grants.is_empty() {
        return vec![format!("{key}  (no grants in acl)")];
    }

    grants
        .iter()
        .enumerate()
        .map(|(i, grant)| {
            let label = if i == 0 { key } else { "" };
            match &grant.grantee {
                Grantee::User { name } => {
                    format!("{label:>width$}  user  {name} has {}", grant.permission, width = key.len())
                }
                Grantee::Group { uri } => {
                    format!("{label:>width$}  group {uri} has {}", grant.permission, width = key.len())
                }
            }
        })
        .collect()
}
