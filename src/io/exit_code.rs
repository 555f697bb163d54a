//! Exit codes for CLI operations following Unix conventions.
//!
//! - `0`: Success, including requested types that resolve to no methods
//! - `1`: General error
//! - `4`-`6`: Specific failures scripts can react to

use crate::error::{DiscoveryError, FindError};

/// Standard exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// A package failed to parse or has no primary package (code 4)
    ParseError = 4,

    /// Missing package directory or unreadable file (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl ExitCode {
    /// Exit code for a single discovery failure.
    pub fn from_discovery_error(error: &DiscoveryError) -> Self {
        match error {
            DiscoveryError::PackageNotFound { .. } | DiscoveryError::FileRead { .. } => {
                ExitCode::IoError
            }
            DiscoveryError::Syntax { .. } | DiscoveryError::NoPackage { .. } => {
                ExitCode::ParseError
            }
            DiscoveryError::ParserInit { .. } => ExitCode::GeneralError,
        }
    }

    /// Exit code for a failed find.
    ///
    /// With several discovery failures the first one (by package path) decides.
    pub fn from_find_error(error: &FindError) -> Self {
        match error {
            FindError::Discovery(errors) => errors
                .first()
                .map(Self::from_discovery_error)
                .unwrap_or(ExitCode::GeneralError),
            FindError::InvalidRoot { .. } => ExitCode::IoError,
        }
    }
}
