//! Error types for package discovery and method resolution
//!
//! Discovery failures are structured errors collected per package and
//! returned to the caller. Resolution anomalies are never errors; they are
//! reported as [`Diagnostic`]s alongside the results.

use crate::types::TypeId;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to discover or parse one package
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Package directory '{path}' does not exist")]
    PackageNotFound { path: PathBuf },

    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse '{file}' at line {line}, column {column}: {reason}")]
    Syntax {
        package: PathBuf,
        file: PathBuf,
        line: u32,
        column: u32,
        reason: String,
    },

    #[error("Unable to find a non-test Go package in '{path}'")]
    NoPackage { path: PathBuf },

    #[error("Failed to initialize Go parser: {reason}")]
    ParserInit { package: PathBuf, reason: String },
}

impl DiscoveryError {
    /// Package directory the failure belongs to
    pub fn package(&self) -> &Path {
        match self {
            Self::PackageNotFound { path } | Self::NoPackage { path } => path,
            Self::FileRead { path, .. } => path.parent().unwrap_or(path),
            Self::Syntax { package, .. } | Self::ParserInit { package, .. } => package,
        }
    }

    /// Stable identifier for programmatic handling in JSON output
    pub fn status_code(&self) -> String {
        match self {
            Self::PackageNotFound { .. } => "PACKAGE_NOT_FOUND",
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::Syntax { .. } => "PARSE_ERROR",
            Self::NoPackage { .. } => "NO_PACKAGE",
            Self::ParserInit { .. } => "PARSER_INIT_ERROR",
        }
        .to_string()
    }

    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::PackageNotFound { .. } => vec![
                "Check the package path passed on the command line",
                "Check that GOPATH (or search.paths) contains the imported package",
            ],
            Self::FileRead { .. } => vec!["Check that the file exists and you have read permissions"],
            Self::Syntax { .. } => vec!["Fix the syntax error; run 'gofmt -l' on the package to locate it"],
            Self::NoPackage { .. } => vec![
                "The directory contains no .go files outside of *_test.go",
                "Point at the directory that holds the package sources",
            ],
            Self::ParserInit { .. } => vec!["The tree-sitter-go grammar is incompatible with this build"],
        }
    }
}

/// Top-level failure of a find operation
#[derive(Error, Debug)]
pub enum FindError {
    #[error("Discovery failed for {} package(s): {}", .0.len(), summarize(.0))]
    Discovery(Vec<DiscoveryError>),

    #[error("Invalid package path '{path}': {reason}")]
    InvalidRoot { path: PathBuf, reason: String },
}

impl FindError {
    pub fn status_code(&self) -> String {
        match self {
            Self::Discovery(errors) => errors
                .first()
                .map(DiscoveryError::status_code)
                .unwrap_or_else(|| "DISCOVERY_ERROR".to_string()),
            Self::InvalidRoot { .. } => "INVALID_ROOT".to_string(),
        }
    }
}

fn summarize(errors: &[DiscoveryError]) -> String {
    errors
        .iter()
        .map(|e| e.package().display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Non-fatal anomaly observed during discovery or resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An import could not be located in any search root
    UnresolvableImport { package: PathBuf, import_path: String },
    /// An embedded field that matched no declared type
    UnresolvedBase { owner: TypeId, base: String },
    /// An unqualified embedded name matched in more than one dot-imported package.
    /// All matches are merged into the result.
    AmbiguousBase {
        owner: TypeId,
        base: String,
        candidates: Vec<TypeId>,
    },
    /// Resolution re-entered a type already being resolved; the chain ends at the repeated type
    EmbeddingCycle { chain: Vec<TypeId> },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvableImport {
                package,
                import_path,
            } => write!(
                f,
                "unresolvable import \"{import_path}\" in {}",
                package.display()
            ),
            Self::UnresolvedBase { owner, base } => {
                write!(f, "embedded {base} in {owner} matches no known type")
            }
            Self::AmbiguousBase {
                owner,
                base,
                candidates,
            } => write!(
                f,
                "embedded {base} in {owner} matches {} dot-imported types; merging all",
                candidates.len()
            ),
            Self::EmbeddingCycle { chain } => {
                let names = chain
                    .iter()
                    .map(|id| id.name.as_str())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                write!(f, "embedding cycle {names}")
            }
        }
    }
}

/// Result type alias for discovery operations
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Result type alias for find operations
pub type FindResult<T> = Result<T, FindError>;
