//! Error types for bkt-core
//!
//! Every error is terminal to the current invocation: nothing here is
//! retried, downgraded, or aggregated.

use thiserror::Error;

/// Result type alias for bkt-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bkt-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration, caught before any network call
    #[error("Configuration error: {0}")]
    Config(String),

    /// A failure anywhere in the sniff/relay/upload pipeline
    #[error("Transfer failed: {0}")]
    Transfer(String),

    /// Opaque error returned by the object store, passed through unmodified
    #[error("{0}")]
    Store(String),

    /// Bucket or object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unrecognized ACL policy name
    #[error("Unknown ACL policy: {0}")]
    InvalidAcl(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("missing required --bucket option".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing required --bucket option"
        );

        let err = Error::Store("SlowDown: please reduce request rate".into());
        assert_eq!(err.to_string(), "SlowDown: please reduce request rate");

        let err = Error::NotFound("archive/a".into());
        assert_eq!(err.to_string(), "Not found: archive/a");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
