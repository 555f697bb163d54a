//! Import declaration representation
//!
//! This module defines the Import struct the Go parser produces for every
//! `import_spec` it meets.

/// How an import is bound in the importing file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKind {
    /// `import "example.com/lib"`, bound to the last path segment
    Default,
    /// `import l "example.com/lib"`
    Named(String),
    /// `import . "example.com/lib"`, exported names usable without a qualifier
    Dot,
    /// `import _ "example.com/lib"`, imported for side effects only
    Blank,
}

/// Represents an import statement in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// The import path without quotes (e.g., "example.com/lib/util")
    pub path: String,
    pub kind: ImportKind,
}

impl Import {
    pub fn new(path: impl Into<String>, kind: ImportKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn is_dot(&self) -> bool {
        matches!(self.kind, ImportKind::Dot)
    }

    /// Qualifier the file uses for this package, if any
    pub fn local_name(&self) -> Option<&str> {
        match &self.kind {
            ImportKind::Default => self.path.rsplit('/').next().filter(|s| !s.is_empty()),
            ImportKind::Named(alias) => Some(alias),
            ImportKind::Dot | ImportKind::Blank => None,
        }
    }
}
