//! Concurrent package discovery
//!
//! Starting from a root package, parses every package reachable through
//! dot imports and cross-package embeddings, exactly once each, and fills
//! the [`PackageStore`].
//!
//! Recursive discovery calls are spawned as scoped threads while fewer than
//! `concurrency_limit` spawned tasks are alive; beyond that they run inline
//! on the calling thread. The enclosing `thread::scope` joins the whole
//! spawned tree before [`PackageWalker::run`] returns.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, Scope};

use parking_lot::Mutex;
use serde::Serialize;

use super::extractor::DeclarationExtractor;
use crate::config::Settings;
use crate::error::DiscoveryError;
use crate::parsing::load_package;
use crate::project_resolver::PackageLocator;
use crate::storage::PackageStore;

#[derive(Debug, Clone, Copy)]
pub struct WalkerOptions {
    /// Maximum number of live spawned discovery tasks (0 = all inline)
    pub concurrency_limit: usize,
    /// Stop scheduling new packages after the first failure
    pub fail_fast: bool,
}

impl WalkerOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            concurrency_limit: settings.discovery.concurrency_limit,
            fail_fast: settings.discovery.fail_fast,
        }
    }
}

impl Default for WalkerOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Counters describing one discovery run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryStats {
    pub packages_parsed: usize,
    pub files_parsed: usize,
    pub tasks_spawned: usize,
    pub inline_calls: usize,
}

pub struct PackageWalker<'a> {
    store: &'a PackageStore,
    locator: &'a dyn PackageLocator,
    options: WalkerOptions,
    live_tasks: AtomicUsize,
    cancelled: AtomicBool,
    errors: Mutex<Vec<DiscoveryError>>,
    packages_parsed: AtomicUsize,
    files_parsed: AtomicUsize,
    tasks_spawned: AtomicUsize,
    inline_calls: AtomicUsize,
}

impl<'a> PackageWalker<'a> {
    pub fn new(
        store: &'a PackageStore,
        locator: &'a dyn PackageLocator,
        options: WalkerOptions,
    ) -> Self {
        Self {
            store,
            locator,
            options,
            live_tasks: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
            errors: Mutex::new(Vec::new()),
            packages_parsed: AtomicUsize::new(0),
            files_parsed: AtomicUsize::new(0),
            tasks_spawned: AtomicUsize::new(0),
            inline_calls: AtomicUsize::new(0),
        }
    }

    /// Discover `root` and everything reachable from it.
    ///
    /// Blocks until every spawned task has finished. Any package failure
    /// fails the run; all failures are returned, ordered by package path.
    pub fn run(self, root: &Path) -> Result<DiscoveryStats, Vec<DiscoveryError>> {
        tracing::debug!(
            "discovering from {} (concurrency limit {})",
            root.display(),
            self.options.concurrency_limit
        );

        thread::scope(|scope| self.discover(scope, root.to_path_buf()));

        let mut errors = self.errors.into_inner();
        if !errors.is_empty() {
            errors.sort_by(|a, b| a.package().cmp(b.package()));
            return Err(errors);
        }

        Ok(DiscoveryStats {
            packages_parsed: self.packages_parsed.into_inner(),
            files_parsed: self.files_parsed.into_inner(),
            tasks_spawned: self.tasks_spawned.into_inner(),
            inline_calls: self.inline_calls.into_inner(),
        })
    }

    fn discover<'scope, 'env>(&'env self, scope: &'scope Scope<'scope, 'env>, package: PathBuf) {
        if self.cancelled.load(Ordering::Acquire) {
            return;
        }
        if !self.store.mark_visited(&package) {
            tracing::trace!("{} already discovered", package.display());
            return;
        }

        let files = match load_package(&package) {
            Ok(files) => files,
            Err(e) => {
                tracing::error!("{e}");
                if self.options.fail_fast {
                    self.cancelled.store(true, Ordering::Release);
                }
                self.errors.lock().push(e);
                return;
            }
        };

        self.packages_parsed.fetch_add(1, Ordering::Relaxed);
        self.files_parsed.fetch_add(files.len(), Ordering::Relaxed);
        tracing::debug!("parsed {} ({} files)", package.display(), files.len());

        let extractor = DeclarationExtractor::new(self.store, self.locator, &package);
        let mut requests: Vec<PathBuf> = Vec::new();
        for file in &files {
            for request in extractor.extract(file) {
                if !requests.contains(&request) {
                    requests.push(request);
                }
            }
        }
        self.store.record_extraction(&package);

        for request in requests {
            // Cheap pre-check; mark_visited stays the authoritative guard
            if self.store.is_visited(&request) {
                continue;
            }
            self.schedule(scope, request);
        }
    }

    fn schedule<'scope, 'env>(&'env self, scope: &'scope Scope<'scope, 'env>, package: PathBuf) {
        if self.try_acquire_slot() {
            self.tasks_spawned.fetch_add(1, Ordering::Relaxed);
            scope.spawn(move || {
                self.discover(scope, package);
                self.live_tasks.fetch_sub(1, Ordering::AcqRel);
            });
        } else {
            self.inline_calls.fetch_add(1, Ordering::Relaxed);
            self.discover(scope, package);
        }
    }

    /// Take a task slot if fewer than `concurrency_limit` spawned tasks are alive
    fn try_acquire_slot(&self) -> bool {
        let limit = self.options.concurrency_limit;
        self.live_tasks
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |live| {
                (live < limit).then_some(live + 1)
            })
            .is_ok()
    }
}
