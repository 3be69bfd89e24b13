//! CLI command definitions and execution
//!
//! Connection options are global and may come from the environment; they
//! are collected once into an immutable StoreConfig that every command
//! receives explicitly.

use clap::{Parser, Subcommand};

use bkt_core::{Result, StoreConfig};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod acls;
mod cat;
mod chacl;
mod completions;
mod create_bucket;
mod delete_bucket;
mod get;
mod list_buckets;
mod ls;
mod lsacl;
mod put;
mod rm;
mod url;

/// bkt - command-line client for S3-compatible object storage
///
/// Works against AWS S3 and S3 work-alikes. Credentials and endpoint may
/// be given as options or via the environment.
#[derive(Parser, Debug)]
#[command(name = "bkt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Access key ID to use
    #[arg(long = "aki", global = true, env = "S3_AKI", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// Secret access key to use
    #[arg(long = "key", global = true, env = "S3_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Full URL of the S3 system, for S3 work-alikes
    #[arg(long = "s3-url", global = true, env = "S3_URL")]
    pub s3_url: Option<String>,

    /// Region to operate in
    #[arg(
        short = 'r',
        long,
        global = true,
        env = "S3_REGION",
        default_value = bkt_core::config::DEFAULT_REGION
    )]
    pub region: String,

    /// Bucket to operate on
    #[arg(short = 'b', long, global = true, env = "S3_BUCKET")]
    pub bucket: Option<String>,

    /// Use path-based bucket addressing instead of DNS-style
    #[arg(short = 'P', long = "path-buckets", global = true, env = "S3_USE_PATH")]
    pub path_buckets: bool,

    /// Enable verbose logging of what bkt is doing
    #[arg(short = 'D', long, global = true, env = "S3_DEBUG")]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable progress indicators
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all buckets you own
    #[command(name = "list-buckets", visible_alias = "lsb")]
    ListBuckets(list_buckets::ListBucketsArgs),

    /// Create a new bucket
    #[command(name = "create-bucket", visible_aliases = ["new-bucket", "cb"])]
    CreateBucket(create_bucket::CreateBucketArgs),

    /// Delete a bucket
    #[command(name = "delete-bucket", visible_alias = "remove-bucket")]
    DeleteBucket(delete_bucket::DeleteBucketArgs),

    /// Upload files (or standard input) to a bucket
    #[command(visible_alias = "upload")]
    Put(put::PutArgs),

    /// Download an object to a local file
    #[command(visible_alias = "download")]
    Get(get::GetArgs),

    /// Print an object's contents on standard output
    Cat(cat::CatArgs),

    /// Print the HTTPS URL for an object
    Url(url::UrlArgs),

    /// Delete objects from a bucket
    #[command(visible_aliases = ["remove", "delete"])]
    Rm(rm::RmArgs),

    /// List the objects in a bucket
    #[command(visible_alias = "list")]
    Ls(ls::LsArgs),

    /// Change the access policy of a bucket or object
    #[command(name = "chacl", visible_alias = "change-acl")]
    Chacl(chacl::ChaclArgs),

    /// List the access grants on a bucket or object
    #[command(name = "lsacl", visible_alias = "list-acl")]
    Lsacl(lsacl::LsaclArgs),

    /// Describe the access policies this client knows about
    Acls,

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Collect the global options into an immutable configuration value
fn store_config(cli: &Cli) -> Result<StoreConfig> {
    let config = StoreConfig {
        access_key_id: cli.access_key_id.clone().unwrap_or_default(),
        secret_access_key: cli.secret_key.clone().unwrap_or_default(),
        endpoint: cli.s3_url.clone(),
        region: cli.region.clone(),
        bucket: cli.bucket.clone(),
        path_buckets: cli.path_buckets,
    };
    config.validate()?;
    Ok(config)
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };
    let formatter = Formatter::new(output_config);

    // These commands never talk to the store and skip configuration.
    match &cli.command {
        Commands::Acls => return acls::execute(&formatter),
        Commands::Completions(args) => return completions::execute(args),
        Commands::Url(args) => return url::execute(args, cli.bucket.as_deref(), &formatter),
        _ => {}
    }

    let config = match store_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    match cli.command {
        Commands::ListBuckets(args) => list_buckets::execute(args, &config, &formatter).await,
        Commands::CreateBucket(args) => create_bucket::execute(args, &config, &formatter).await,
        Commands::DeleteBucket(args) => delete_bucket::execute(args, &config, &formatter).await,
        Commands::Put(args) => put::execute(args, &config, output_config, &formatter).await,
        Commands::Get(args) => get::execute(args, &config, output_config, &formatter).await,
        Commands::Cat(args) => cat::execute(args, &config, &formatter).await,
        Commands::Rm(args) => rm::execute(args, &config, &formatter).await,
        Commands::Ls(args) => ls::execute(args, &config, &formatter).await,
        Commands::Chacl(args) => chacl::execute(args, &config, &formatter).await,
        Commands::Lsacl(args) => lsacl::execute(args, &config, &formatter).await,
        Commands::Acls | Commands::Url(_) | Commands::Completions(_) => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_store_config_requires_credentials() {
        let cli = Cli::parse_from(["bkt", "ls"]);
        assert!(store_config(&cli).is_err());
    }

    #[test]
    fn test_store_config_from_flags() {
        let cli = Cli::parse_from([
            "bkt",
            "--aki",
            "AKIEXAMPLE",
            "--key",
            "secret",
            "-b",
            "backups",
            "-r",
            "eu-west-1",
            "ls",
        ]);
        let config = store_config(&cli).unwrap();
        assert_eq!(config.access_key_id, "AKIEXAMPLE");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.bucket.as_deref(), Some("backups"));
    }
}
