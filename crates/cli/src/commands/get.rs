//! get command - Download an object
//!
//! Streams an object to a local file, or to standard output when the
//! destination is '-'.

use clap::Args;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

use bkt_core::{ObjectStore as _, StoreConfig};
use bkt_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Progress};

/// Download an object to a local file
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Object key to download
    pub key: String,

    /// Local path to download to; defaults to the final component of the
    /// key, and '-' streams to standard output
    #[arg(long)]
    pub to: Option<String>,
}

/// Execute the get command
pub async fn execute(
    args: GetArgs,
    config: &StoreConfig,
    output_config: OutputConfig,
    formatter: &Formatter,
) -> ExitCode {
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
            formatter.error(&format!("Failed to download {bucket}:{}: {e}", args.key));
            return ExitCode::from(&e);
        }
    };

    if args.to.as_deref() == Some("-") {
        debug!(%bucket, key = %args.key, "streaming to standard output");
        let mut stdout = tokio::io::stdout();
        return match tokio::io::copy(&mut body, &mut stdout).await {
            Ok(_) => {
                let _ = stdout.flush().await;
                ExitCode::Success
            }
            Err(e) => {
                formatter.error(&format!("Failed to stream {bucket}:{}: {e}", args.key));
                ExitCode::GeneralError
            }
        };
    }

    let destination = match args.to.clone() {
        Some(to) => to,
        None => match derive_destination(&args.key) {
            Some(name) => {
                debug!(destination = %name, "determined destination file path");
                name
            }
            None => {
                formatter.error(&format!(
                    "cannot derive a local file name from '{}'; use --to.",
                    args.key
                ));
                return ExitCode::UsageError;
            }
        },
    };

    debug!(%bucket, key = %args.key, %destination, "downloading");
    let mut file = match tokio::fs::File::create(&destination).await {
        Ok(f) => f,
        Err(e) => {
            formatter.error(&format!("{destination}: {e}"));
            return ExitCode::GeneralError;
        }
    };

    let progress = Progress::bytes(output_config, &format!("downloading {}", args.key));
    let mut received: u64 = 0;
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        match body.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if let Err(e) = file.write_all(&buf[..n]).await {
                    progress.finish_and_clear();
                    formatter.error(&format!("{destination}: {e}"));
                    return ExitCode::GeneralError;
                }
                received += n as u64;
                progress.inc(n as u64);
            }
            Err(e) => {
                progress.finish_and_clear();
                formatter.error(&format!("Failed to download {bucket}:{}: {e}", args.key));
                return ExitCode::NetworkError;
            }
        }
    }
    progress.finish_and_clear();

    if let Err(e) = file.flush().await {
        formatter.error(&format!("{destination}: {e}"));
        return ExitCode::GeneralError;
    }

    formatter.success(&format!(
        "{bucket}:{} -> {destination} ({})",
        args.key,
        humansize::format_size(received, humansize::BINARY)
    ));
    ExitCode::Success
}

/// The final path component of a key, if it names a file
fn derive_destination(key: &str) -> Option<String> {
    let name = key.rsplit('/').next().unwrap_or(key);
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}
