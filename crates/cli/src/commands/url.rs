//! url command - Print the HTTPS URL for an object
//!
//! Purely local; never contacts the store.

use clap::Args;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Print the HTTPS URL for an object
#[derive(Args, Debug)]
pub struct UrlArgs {
    /// Object key to address
    pub key: String,
}

/// Execute the url command
pub fn execute(args: &UrlArgs, bucket: Option<&str>, formatter: &Formatter) -> ExitCode {
    let Some(bucket) = bucket.filter(|b| !b.is_empty()) else {
        formatter.error("Configuration error: missing required --bucket option");
        return ExitCode::UsageError;
    };

    println!("https://{bucket}.s3.amazonaws.com/{}", args.key);
    ExitCode::Success
}
