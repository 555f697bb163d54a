#![allow(dead_code)]

use promoted::{MethodFinder, Settings};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Throwaway GOPATH: packages live under `<root>/src/<import path>`
pub struct GoWorkspace {
    pub dir: TempDir,
}

impl GoWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn add_file(&self, import_path: &str, file: &str, content: &str) -> PathBuf {
        let package = self.package_dir(import_path);
        fs::create_dir_all(&package).expect("Failed to create package dir");
        let file_path = package.join(file);
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    pub fn package_dir(&self, import_path: &str) -> PathBuf {
        self.dir.path().join("src").join(import_path)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Settings that search only this workspace
    pub fn settings(&self, concurrency_limit: usize) -> Settings {
        let mut settings = Settings::default();
        settings.discovery.concurrency_limit = concurrency_limit;
        settings.search.paths = vec![self.path().to_path_buf()];
        settings.search.env_var = "PROMOTED_TEST_UNSET_GOPATH".to_string();
        settings
    }

    pub fn finder(&self, concurrency_limit: usize) -> MethodFinder {
        MethodFinder::new(Arc::new(self.settings(concurrency_limit)))
    }
}
