//! bkt - command-line client for S3-compatible object storage
//!
//! Uploads stream from files or standard input through a parallel
//! multipart path; recursive operations select keys by delimiter-guarded
//! prefix and apply their action fail-fast.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod exit_code;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // -D/--debug raises the default filter; RUST_LOG still wins when set.
    let default_filter = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
