//! Core locator trait for import path resolution

use std::collections::HashMap;
use std::path::PathBuf;

/// Resolves import specifiers to package directories.
///
/// Implementations are shared by every discovery task, so they must be
/// thread-safe and free of per-call mutation.
pub trait PackageLocator: Send + Sync {
    /// Absolute directory of the package named by `import_path`, if it can be found
    fn locate(&self, import_path: &str) -> Option<PathBuf>;
}

/// Fixed import-path table, for embedding callers and tests
#[derive(Debug, Default, Clone)]
pub struct MapLocator {
    packages: HashMap<String, PathBuf>,
}

impl MapLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, import_path: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.insert(import_path, dir);
        self
    }

    pub fn insert(&mut self, import_path: impl Into<String>, dir: impl Into<PathBuf>) {
        self.packages.insert(import_path.into(), dir.into());
    }
}

impl PackageLocator for MapLocator {
    fn locate(&self, import_path: &str) -> Option<PathBuf> {
        self.packages.get(import_path).cloned()
    }
}
