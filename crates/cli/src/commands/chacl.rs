//! chacl command - Change the access policy of a bucket or object
//!
//! With one argument the policy applies to the bucket itself; with two,
//! to the given key. With -R, the policy is first applied to every key
//! under the path, sequentially and fail-fast; keys changed before a
//! failure keep the new policy.

use std::str::FromStr;

use clap::Args;
use tracing::debug;

use bkt_core::{bulk, AclPolicy, BulkAction, BulkSelection, ObjectStore as _, StoreConfig};
use bkt_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Change the access policy of a bucket or object
#[derive(Args, Debug)]
pub struct ChaclArgs {
    /// [KEY] POLICY; with no key, the policy applies to the bucket
    #[arg(required = true, num_args = 1..=2, value_names = ["KEY", "POLICY"])]
    pub args: Vec<String>,

    /// Recursively change the policy of every object under the path
    #[arg(short = 'R', long)]
    pub recursive: bool,
}

/// Execute the chacl command
pub async fn execute(args: ChaclArgs, config: &StoreConfig, formatter: &Formatter) -> ExitCode {
    let (path, policy_name) = match args.args.as_slice() {
        [policy] => (String::new(), policy.clone()),
        [path, policy] => (path.clone(), policy.clone()),
        _ => unreachable!("clap bounds num_args"),
    };

    let policy = match AclPolicy::from_str(&policy_name) {
        Ok(policy) => policy,
        Err(e) => {
            formatter.error(&format!("{e}; run `bkt acls` for the full list."));
            return ExitCode::from(&e);
        }
    };

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
        debug!(%bucket, root = %path, %policy, "recursively changing acl");
        let listing = match client.list_objects().await {
            Ok(listing) => listing,
            Err(e) => {
                formatter.error(&format!("Failed to list {bucket}: {e}"));
                return ExitCode::from(&e);
            }
        };

        let selection = BulkSelection::select(&path, &listing);
        if let Err(e) = bulk::apply(&client, BulkAction::ChangeAcl(policy), &selection).await {
            formatter.error(&format!("Failed to change acl: {e}"));
            return ExitCode::from(&e);
        }
    }

    debug!(%bucket, key = %path, %policy, "changing acl");
    match client.change_acl(&path, policy).await {
        Ok(()) => {
            let target = if path.is_empty() {
                bucket
            } else {
                format!("{bucket}:{path}")
            };
            formatter.success(&format!("changed acl on {target} to {policy}."));
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to change acl: {e}"));
            ExitCode::from(&e)
        }
    }
}
