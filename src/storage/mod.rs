//! Declaration storage
//!
//! [`PackageStore`] is the concurrent, write-only store filled during
//! discovery; [`PackageIndex`] is its frozen, read-only form consumed by
//! method resolution.

pub mod memory;

pub use memory::PackageStore;

use crate::error::Diagnostic;
use crate::types::{BaseRef, MethodRecord, TypeId};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Read-only snapshot of everything discovery learned
#[derive(Debug, Default)]
pub struct PackageIndex {
    methods: HashMap<TypeId, Vec<MethodRecord>>,
    bases: HashMap<TypeId, Vec<BaseRef>>,
    dot_imports: HashMap<PathBuf, Vec<PathBuf>>,
    packages: HashSet<PathBuf>,
    extractions: HashMap<PathBuf, usize>,
    diagnostics: Vec<Diagnostic>,
}

impl PackageIndex {
    pub(crate) fn new(
        methods: HashMap<TypeId, Vec<MethodRecord>>,
        bases: HashMap<TypeId, Vec<BaseRef>>,
        dot_imports: HashMap<PathBuf, Vec<PathBuf>>,
        packages: HashSet<PathBuf>,
        extractions: HashMap<PathBuf, usize>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            methods,
            bases,
            dot_imports,
            packages,
            extractions,
            diagnostics,
        }
    }

    /// Own methods of a declared type; `None` means the type is unknown
    pub fn methods(&self, id: &TypeId) -> Option<&[MethodRecord]> {
        self.methods.get(id).map(Vec::as_slice)
    }

    pub fn contains_type(&self, id: &TypeId) -> bool {
        self.methods.contains_key(id)
    }

    /// Embedded bases in declaration order
    pub fn bases(&self, id: &TypeId) -> &[BaseRef] {
        self.bases.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Packages dot-imported by `package`, in first-seen order
    pub fn dot_imports(&self, package: &Path) -> &[PathBuf] {
        self.dot_imports
            .get(package)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Visited packages, sorted
    pub fn packages(&self) -> Vec<&Path> {
        let mut packages: Vec<&Path> = self.packages.iter().map(PathBuf::as_path).collect();
        packages.sort();
        packages
    }

    /// How many times declarations of `package` were extracted (at most once per run)
    pub fn extraction_count(&self, package: &Path) -> usize {
        self.extractions.get(package).copied().unwrap_or(0)
    }

    pub fn type_count(&self) -> usize {
        self.methods.len()
    }

    /// Discovery-phase diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
