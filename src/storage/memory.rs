use crate::error::Diagnostic;
use crate::storage::PackageIndex;
use crate::types::{BaseRef, MethodRecord, TypeId};
use dashmap::{DashMap, DashSet};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Shared tables written by discovery tasks.
///
/// Every table is guarded independently; no method holds a guard on one map
/// while touching another. Once discovery has joined, [`PackageStore::freeze`]
/// turns the store into a read-only [`PackageIndex`].
#[derive(Debug, Default)]
pub struct PackageStore {
    methods: DashMap<TypeId, Vec<MethodRecord>>,
    bases: DashMap<TypeId, Vec<BaseRef>>,
    visited: DashSet<PathBuf>,
    dot_imports: DashMap<PathBuf, Vec<PathBuf>>,
    extractions: DashMap<PathBuf, usize>,
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl PackageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically mark `package` as visited.
    ///
    /// Returns `true` for exactly one caller per path; every later or
    /// concurrent caller gets `false`.
    pub fn mark_visited(&self, package: &Path) -> bool {
        self.visited.insert(package.to_path_buf())
    }

    pub fn is_visited(&self, package: &Path) -> bool {
        self.visited.contains(package)
    }

    /// Ensure a (possibly empty) method entry exists for `id`
    pub fn declare_type(&self, id: TypeId) {
        self.methods.entry(id).or_default();
    }

    /// Append a method, creating the owner's entry if absent
    pub fn add_method(&self, owner: TypeId, method: MethodRecord) {
        self.methods.entry(owner).or_default().push(method);
    }

    /// Append an embedded base. The owner becomes a declared type.
    pub fn add_base(&self, owner: TypeId, base: BaseRef) {
        self.declare_type(owner.clone());
        self.bases.entry(owner).or_default().push(base);
    }

    /// Record a dot import of `target` by `package`, keeping first-seen order
    pub fn add_dot_import(&self, package: &Path, target: PathBuf) {
        let mut targets = self.dot_imports.entry(package.to_path_buf()).or_default();
        if !targets.contains(&target) {
            targets.push(target);
        }
    }

    /// Count one extraction pass over `package`
    pub fn record_extraction(&self, package: &Path) {
        *self.extractions.entry(package.to_path_buf()).or_default() += 1;
    }

    pub fn push_diagnostic(&self, diagnostic: Diagnostic) {
        let mut diagnostics = self.diagnostics.lock();
        if !diagnostics.contains(&diagnostic) {
            tracing::debug!("{diagnostic}");
            diagnostics.push(diagnostic);
        }
    }

    /// Close the discovery phase.
    ///
    /// Consuming the store guarantees no writer survives into resolution.
    pub fn freeze(self) -> PackageIndex {
        let mut diagnostics = self.diagnostics.into_inner();
        // Discovery tasks finish in arbitrary order
        diagnostics.sort_by_key(|d| d.to_string());

        PackageIndex::new(
            self.methods.into_iter().collect(),
            self.bases.into_iter().collect(),
            self.dot_imports.into_iter().collect(),
            self.visited.into_iter().collect(),
            self.extractions.into_iter().collect(),
            diagnostics,
        )
    }
}
