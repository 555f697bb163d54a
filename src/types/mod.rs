//! Core identifiers and records shared by discovery and resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Globally unique key of a declared type: absolute package directory plus type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId {
    pub package: PathBuf,
    pub name: String,
}

impl TypeId {
    pub fn new(package: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn package(&self) -> &Path {
        &self.package
    }

    /// Same type name looked up in another package (dot-import candidates)
    pub fn in_package(&self, package: &Path) -> Self {
        Self::new(package, self.name.clone())
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.package.display(), self.name)
    }
}

/// Source span of a declaration (0-based lines and columns, as reported by tree-sitter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start_line: u32,
    pub start_column: u16,
    pub end_line: u32,
    pub end_column: u16,
}

impl Range {
    pub fn new(start_line: u32, start_column: u16, end_line: u32, end_column: u16) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}

/// An exported pointer-receiver method as declared in source.
///
/// Identity is the name within the owning type; the remaining fields are
/// payload carried through to the result surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub name: String,
    /// Declaration text up to, not including, the body
    pub signature: String,
    pub file: PathBuf,
    pub range: Range,
}

impl MethodRecord {
    pub fn new(
        name: impl Into<String>,
        signature: impl Into<String>,
        file: impl Into<PathBuf>,
        range: Range,
    ) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
            file: file.into(),
            range,
        }
    }
}

/// Reference from a struct to one of its embedded fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaseRef {
    /// Bare identifier. Looked up in the owning package first, then in every
    /// package the owning package dot-imports.
    Local(TypeId),
    /// `alias.Name` whose import was located at extraction time
    Qualified(TypeId),
    /// `alias.Name` whose alias is unknown in the file or whose import could not be located
    Unlocated { qualifier: String, name: String },
}

impl fmt::Display for BaseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseRef::Local(id) | BaseRef::Qualified(id) => write!(f, "{id}"),
            BaseRef::Unlocated { qualifier, name } => write!(f, "{qualifier}.{name}"),
        }
    }
}
