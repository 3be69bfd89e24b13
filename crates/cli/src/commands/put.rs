//! put command - Upload files to a bucket
//!
//! Streams each local file (or standard input) through the parallel
//! multipart path. The content type is detected from the first 512 bytes
//! of the source unless given explicitly, and the sniffed bytes are
//! replayed so nothing is read twice.

use std::io::Read;

use clap::Args;
use tracing::debug;

use bkt_core::{transfer, StoreConfig, TransferRequest};
use bkt_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Progress};

/// Upload files (or standard input) to a bucket
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file path(s); '-' streams standard input
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Key to upload to; defaults to the file path with leading '.' and
    /// '/' characters removed
    #[arg(long)]
    pub to: Option<String>,

    /// MIME content type; detected from the first 512 bytes when omitted
    #[arg(short = 't', long = "content-type")]
    pub content_type: Option<String>,

    /// Parallel upload workers to spin up
    #[arg(
        short = 'n',
        long = "parallel",
        env = "S3_THREADS",
        default_value_t = transfer::DEFAULT_CONCURRENCY
    )]
    pub parallel: usize,
}

/// Execute the put command
pub async fn execute(
    args: PutArgs,
    config: &StoreConfig,
    output_config: OutputConfig,
    formatter: &Formatter,
) -> ExitCode {
    if args.files.iter().any(|f| f == "-") && args.to.is_none() {
        formatter.error("uploading from standard input requires the --to option.");
        return ExitCode::UsageError;
    }
    if args.to.is_some() && args.files.len() > 1 {
        formatter.error("the --to option cannot be combined with multiple uploads.");
        return ExitCode::UsageError;
    }

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

    debug!(workers = args.parallel, "spinning up upload workers");

    for file in &args.files {
        let key = args
            .to
            .clone()
            .unwrap_or_else(|| file.trim_start_matches(['.', '/']).to_string());

        let source: Box<dyn Read + Send> = if file == "-" {
            debug!(%bucket, %key, "streaming data from standard input");
            Box::new(std::io::stdin())
        } else {
            debug!(%file, %bucket, %key, "uploading file");
            match std::fs::File::open(file) {
                Ok(f) => Box::new(f),
                Err(e) => {
                    formatter.error(&format!("{file}: {e}"));
                    return ExitCode::GeneralError;
                }
            }
        };

        let request = TransferRequest::new(&key)
            .content_type(args.content_type.clone())
            .concurrency(args.parallel);

        let progress = Progress::spinner(output_config, &format!("uploading {file} to {key}"));
        let result = transfer::upload(&client, &request, source).await;
        progress.finish_and_clear();

        match result {
            Ok(sent) => {
                formatter.success(&format!(
                    "{file} -> {bucket}:{key} ({})",
                    humansize::format_size(sent, humansize::BINARY)
                ));
            }
            Err(e) => {
                formatter.error(&format!("Failed to upload {file}: {e}"));
                return ExitCode::from(&e);
            }
        }
    }

    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_strips_leading_dots_and_slashes() {
        for (file, expected) in [
            ("./reports/q1.csv", "reports/q1.csv"),
            ("../reports/q1.csv", "reports/q1.csv"),
            ("/var/log/app.log", "var/log/app.log"),
            ("plain.txt", "plain.txt"),
        ] {
            assert_eq!(file.trim_start_matches(['.', '/']), expected);
        }
    }
}
