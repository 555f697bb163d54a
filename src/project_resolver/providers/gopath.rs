//! GOPATH-style import lookup
//!
//! Every search root is probed as `<root>/<src_dir>/<import path>`; the
//! first existing directory wins. Roots are made absolute and cleaned up
//! front so a package found twice always yields the same directory.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::finder::absolute_clean;
use crate::project_resolver::PackageLocator;

#[derive(Debug, Clone)]
pub struct GopathLocator {
    roots: Vec<PathBuf>,
    src_dir: PathBuf,
}

impl GopathLocator {
    pub fn new(roots: Vec<PathBuf>, src_dir: impl Into<PathBuf>) -> Self {
        let roots = roots
            .into_iter()
            .filter_map(|root| match absolute_clean(&root) {
                Ok(clean) => Some(clean),
                Err(e) => {
                    tracing::debug!("skipping search root {}: {e}", root.display());
                    None
                }
            })
            .collect();
        Self {
            roots,
            src_dir: src_dir.into(),
        }
    }

    /// Explicit `search.paths` first, then the entries of `search.env_var`
    pub fn from_settings(settings: &Settings) -> Self {
        let mut roots = settings.search.paths.clone();
        if let Ok(value) = std::env::var(&settings.search.env_var) {
            roots.extend(split_search_path(&value));
        }
        tracing::debug!(
            "import search roots from {}: {:?}",
            settings.search.env_var,
            roots
        );
        Self::new(roots, settings.search.src_dir.clone())
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn candidate(&self, root: &Path, import_path: &str) -> Option<PathBuf> {
        let mut candidate = root.join(&self.src_dir);
        for segment in import_path.split('/').filter(|s| !s.is_empty()) {
            candidate.push(segment);
        }
        absolute_clean(&candidate).ok()
    }
}

impl PackageLocator for GopathLocator {
    fn locate(&self, import_path: &str) -> Option<PathBuf> {
        if import_path.is_empty() {
            return None;
        }
        self.roots
            .iter()
            .filter_map(|root| self.candidate(root, import_path))
            .find(|candidate| candidate.is_dir())
    }
}

/// Colon-separated list, empty entries dropped
pub fn split_search_path(value: &str) -> Vec<PathBuf> {
    value
        .split(':')
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}
