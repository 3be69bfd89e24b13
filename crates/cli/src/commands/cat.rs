//! cat command - Print an object on standard output

use clap::Args;
use tracing::debug;

use bkt_core::{ObjectStore as _, StoreConfig};
use bkt_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Print an object's contents on standard output
#[derive(Args, Debug)]
pub struct CatArgs {
    /// Object key to print
    pub key: String,
}

/// Execute the cat command
pub async fn execute(args: CatArgs, config: &StoreConfig, formatter: &Formatter) -> ExitCode {
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

    let mut body = match client.get_object(&args.key).await {
        Ok(body) => body,
        Err(e) => {
            formatter.error(&format!("Failed to read {bucket}:{}: {e}", args.key));
            return ExitCode::from(&e);
        }
    };

    debug!(%bucket, key = %args.key, "streaming to standard output");
    let mut stdout = tokio::io::stdout();
    match tokio::io::copy(&mut body, &mut stdout).await {
        Ok(_) => ExitCode::Success,
        Err(e) => {
            formatter.error(&format!("Failed to stream {bucket}:{}: {e}", args.key));
            ExitCode::GeneralError
        }
    }
}
