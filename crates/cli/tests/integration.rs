//! Integration tests for the bkt CLI
//!
//! These tests require a running S3-compatible server.
//!
//! Run with:
//! ```bash
//! # Start a MinIO container
//! docker run -d --name minio -p 9000:9000 \
//!     -e MINIO_ROOT_USER=accesskey \
//!     -e MINIO_ROOT_PASSWORD=secretkey \
//!     minio/minio server /data
//!
//! # Point the tests at it
//! export TEST_S3_ENDPOINT=http://127.0.0.1:9000
//! export TEST_S3_ACCESS_KEY=accesskey
//! export TEST_S3_SECRET_KEY=secretkey
//!
//! cargo test --features integration
//! ```

#![cfg(feature = "integration")]

use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};

/// Get the path to the bkt binary
fn bkt_binary() -> std::path::PathBuf {
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_bkt") {
        return std::path::PathBuf::from(path);
    }

    let debug = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("target/debug/bkt");

    if debug.exists() {
        return debug;
    }

    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("target/release/bkt")
}

/// Connection settings from the environment
struct TestConfig {
    endpoint: String,
    access_key: String,
    secret_key: String,
}

fn test_config() -> Option<TestConfig> {
    Some(TestConfig {
        endpoint: std::env::var("TEST_S3_ENDPOINT").ok()?,
        access_key: std::env::var("TEST_S3_ACCESS_KEY").ok()?,
        secret_key: std::env::var("TEST_S3_SECRET_KEY").ok()?,
    })
}

/// Run bkt against the test endpoint, optionally feeding stdin
fn run_bkt(config: &TestConfig, args: &[&str], stdin: Option<&[u8]>) -> Output {
    let mut cmd = Command::new(bkt_binary());
    cmd.args(args)
        .env("S3_AKI", &config.access_key)
        .env("S3_KEY", &config.secret_key)
        .env("S3_URL", &config.endpoint)
        .env("S3_USE_PATH", "true")
        .arg("--no-color")
        .arg("--no-progress");

    match stdin {
        Some(data) => {
            cmd.stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
            let mut child = cmd.spawn().expect("failed to spawn bkt");
            child
                .stdin
                .as_mut()
                .expect("stdin piped")
                .write_all(data)
                .expect("failed to write stdin");
            child.wait_with_output().expect("failed to wait for bkt")
        }
        None => cmd.output().expect("failed to execute bkt"),
    }
}

static BUCKET_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A unique bucket per test, torn down best-effort on drop
struct TestBucket {
    config: TestConfig,
    name: String,
}

impl TestBucket {
    fn create(tag: &str) -> Option<Self> {
        let config = test_config()?;
        let name = format!(
            "bkt-it-{tag}-{}-{}",
            std::process::id(),
            BUCKET_COUNTER.fetch_add(1, Ordering::SeqCst)
        );
        let output = run_bkt(&config, &["create-bucket", &name], None);
        assert!(
            output.status.success(),
            "create-bucket failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        Some(Self { config, name })
    }

    fn run(&self, args: &[&str]) -> Output {
        let mut full = vec!["-b", self.name.as_str()];
        full.extend_from_slice(args);
        run_bkt(&self.config, &full, None)
    }

    fn run_with_stdin(&self, args: &[&str], stdin: &[u8]) -> Output {
        let mut full = vec!["-b", self.name.as_str()];
        full.extend_from_slice(args);
        run_bkt(&self.config, &full, Some(stdin))
    }
}

impl Drop for TestBucket {
    fn drop(&mut self) {
        let _ = run_bkt(
            &self.config,
            &["delete-bucket", "-R", &self.name],
            None,
        );
    }
}

#[test]
fn test_upload_download_round_trip() {
    let Some(bucket) = TestBucket::create("roundtrip") else {
        eprintln!("TEST_S3_* not set, skipping");
        return;
    };

    // 12 MiB of patterned data exercises the multi-part path (3 parts at
    // the default 5 MiB part size).
    let payload: Vec<u8> = (0..12 * 1024 * 1024u32).map(|i| (i % 251) as u8).collect();

    let output = bucket.run_with_stdin(&["put", "-", "--to", "blobs/big.bin"], &payload);
    assert!(
        output.status.success(),
        "put failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = bucket.run(&["get", "blobs/big.bin", "--to", "-"]);
    assert!(output.status.success());
    assert_eq!(output.stdout, payload, "downloaded bytes differ");
}

#[test]
fn test_upload_is_idempotent_per_key() {
    let Some(bucket) = TestBucket::create("idem") else {
        eprintln!("TEST_S3_* not set, skipping");
        return;
    };

    bucket.run_with_stdin(&["put", "-", "--to", "k"], b"first");
    let output = bucket.run_with_stdin(&["put", "-", "--to", "k"], b"second");
    assert!(output.status.success());

    let output = bucket.run(&["cat", "k"]);
    assert!(output.status.success());
    assert_eq!(output.stdout, b"second");
}

#[test]
fn test_recursive_delete_respects_delimiter() {
    let Some(bucket) = TestBucket::create("rmr") else {
        eprintln!("TEST_S3_* not set, skipping");
        return;
    };

    for key in ["archive", "archive/a", "archive/b", "archived/c"] {
        let output = bucket.run_with_stdin(&["put", "-", "--to", key], b"x");
        assert!(output.status.success());
    }

    let output = bucket.run(&["rm", "-R", "archive"]);
    assert!(
        output.status.success(),
        "rm -R failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = bucket.run(&["ls"]);
    let listing = String::from_utf8_lossy(&output.stdout);
    assert!(listing.contains("archived/c"), "bare-prefix key was deleted");
    assert!(!listing.contains("archive/a"));
    assert!(!listing.contains("archive/b"));
}

#[test]
fn test_empty_upload_round_trips() {
    let Some(bucket) = TestBucket::create("empty") else {
        eprintln!("TEST_S3_* not set, skipping");
        return;
    };

    let output = bucket.run_with_stdin(&["put", "-", "--to", "empty.bin"], b"");
    assert!(
        output.status.success(),
        "empty put failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = bucket.run(&["cat", "empty.bin"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_put_named_file_derives_key_and_type() {
    let Some(bucket) = TestBucket::create("putfile") else {
        eprintln!("TEST_S3_* not set, skipping");
        return;
    };

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.csv");
    std::fs::write(&path, b"id,name\n1,alpha\n2,beta\n").unwrap();

    let path_str = path.to_str().unwrap();
    let output = bucket.run(&["put", path_str]);
    assert!(
        output.status.success(),
        "put failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // The key defaults to the path with leading '.' and '/' stripped.
    let key = path_str.trim_start_matches(['.', '/']);
    let output = bucket.run(&["cat", key]);
    assert!(output.status.success());
    assert_eq!(output.stdout, b"id,name\n1,alpha\n2,beta\n");
}

#[test]
fn test_missing_credentials_is_a_usage_error() {
    let output = Command::new(bkt_binary())
        .args(["ls", "-b", "whatever"])
        .env_remove("S3_AKI")
        .env_remove("S3_KEY")
        .output()
        .expect("failed to execute bkt");
    assert_eq!(output.status.code(), Some(2));
}
