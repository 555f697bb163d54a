//! Entry point tying discovery and resolution together

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::config::Settings;
use crate::error::{Diagnostic, FindError, FindResult};
use crate::indexing::{
    DiscoveryStats, MethodResolver, PackageWalker, ResolverOptions, TypeMethods, WalkerOptions,
};
use crate::project_resolver::{GopathLocator, PackageLocator};
use crate::storage::PackageStore;

/// Outcome of one find run
#[derive(Debug, Clone, Serialize)]
pub struct FindReport {
    pub root: PathBuf,
    /// One entry per distinct requested name, in request order
    pub types: Vec<TypeMethods>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: DiscoveryStats,
}

impl FindReport {
    pub fn get(&self, name: &str) -> Option<&TypeMethods> {
        self.types.iter().find(|t| t.name == name)
    }
}

pub struct MethodFinder {
    settings: Arc<Settings>,
    locator: Box<dyn PackageLocator>,
}

impl MethodFinder {
    /// Finder resolving imports through the configured GOPATH-style roots
    pub fn new(settings: Arc<Settings>) -> Self {
        let locator = GopathLocator::from_settings(&settings);
        tracing::debug!("search roots: {:?}", locator.roots());
        Self::with_locator(settings, locator)
    }

    pub fn with_locator(settings: Arc<Settings>, locator: impl PackageLocator + 'static) -> Self {
        Self {
            settings,
            locator: Box::new(locator),
        }
    }

    /// Discover everything reachable from `root`, then resolve `names` as
    /// types declared in `root`.
    ///
    /// Nothing is resolved if any package failed to load.
    pub fn find<S: AsRef<str>>(&self, root: &Path, names: &[S]) -> FindResult<FindReport> {
        let root = absolute_clean(root)?;

        let store = PackageStore::new();
        let walker = PackageWalker::new(
            &store,
            self.locator.as_ref(),
            WalkerOptions::from_settings(&self.settings),
        );
        let stats = walker.run(&root).map_err(FindError::Discovery)?;

        let index = store.freeze();
        tracing::debug!(
            "discovered {} packages, {} types",
            index.packages().len(),
            index.type_count()
        );

        let mut resolver = MethodResolver::new(&index, ResolverOptions::from_settings(&self.settings));
        let types = resolver.resolve_all(&root, names);

        let diagnostics = if self.settings.resolution.report_diagnostics {
            let mut diagnostics = index.diagnostics().to_vec();
            diagnostics.extend(resolver.into_diagnostics());
            for diagnostic in &diagnostics {
                tracing::warn!("{diagnostic}");
            }
            diagnostics
        } else {
            Vec::new()
        };

        Ok(FindReport {
            root,
            types,
            diagnostics,
            stats,
        })
    }
}

/// Make `path` absolute against the current directory and collapse `.` and
/// `..` components without touching the filesystem
pub fn absolute_clean(path: &Path) -> FindResult<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(FindError::InvalidRoot {
            path: path.to_path_buf(),
            reason: "empty path".to_string(),
        });
    }

    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| FindError::InvalidRoot {
            path: path.to_path_buf(),
            reason: format!("cannot read current directory: {e}"),
        })?;
        cwd.join(path)
    };

    let mut clean = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`
                if clean.file_name().is_some() {
                    clean.pop();
                }
            }
            other => clean.push(other.as_os_str()),
        }
    }
    Ok(clean)
}
