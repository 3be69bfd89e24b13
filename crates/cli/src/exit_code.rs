//! Exit code definitions for the bkt CLI
//!
//! These codes follow a consistent convention so scripts can react to
//! different failure classes.

/// Exit codes for the bkt CLI application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// User input error: invalid arguments, bad policy name, missing option
    UsageError = 2,

    /// Network or store error
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,

    /// Resource not found: bucket or object does not exist
    NotFound = 5,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::GeneralError => "General error",
            Self::UsageError => "Invalid arguments or configuration",
            Self::NetworkError => "Network or store error",
            Self::AuthError => "Authentication or permission failure",
            Self::NotFound => "Resource not found",
        }
    }
}

impl From<&bkt_core::Error> for ExitCode {
    fn from(err: &bkt_core::Error) -> Self {
        use bkt_core::Error;
        match err {
            Error::Config(_) | Error::InvalidAcl(_) => Self::UsageError,
            Error::NotFound(_) => Self::NotFound,
            Error::Store(message) if message.contains("AccessDenied") => Self::AuthError,
            Error::Store(_) => Self::NetworkError,
            Error::Transfer(_) | Error::Io(_) => Self::GeneralError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
