//! Package directory loading
//!
//! A package is the set of non-test `.go` files directly inside one
//! directory. Files are returned sorted by name, which fixes the order in
//! which their declarations are applied.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::declarations::GoFile;
use super::parser::GoParser;
use crate::error::{DiscoveryError, DiscoveryResult};

/// Non-test Go source files of `dir`, sorted by file name
///
/// Like the go tool, files starting with `.` or `_` are ignored.
pub fn list_source_files(dir: &Path) -> DiscoveryResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(DiscoveryError::PackageNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| DiscoveryError::FileRead {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name.ends_with(".go")
            && !name.ends_with("_test.go")
            && !name.starts_with('.')
            && !name.starts_with('_')
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Parse every source file of the package in `dir`
///
/// Files are parsed in parallel on the rayon pool, one tree-sitter parser
/// per worker; results come back in file-name order. Only files belonging to
/// the primary package are returned: the first package name, in file order,
/// that does not end in `_test`.
pub fn load_package(dir: &Path) -> DiscoveryResult<Vec<GoFile>> {
    let paths = list_source_files(dir)?;

    let files = paths
        .par_iter()
        .map_init(GoParser::new, |parser, path| match parser {
            Ok(parser) => parser.parse_file(path, dir),
            Err(reason) => Err(DiscoveryError::ParserInit {
                package: dir.to_path_buf(),
                reason: reason.clone(),
            }),
        })
        .collect::<DiscoveryResult<Vec<_>>>()?;

    select_primary(dir, files)
}

fn select_primary(dir: &Path, files: Vec<GoFile>) -> DiscoveryResult<Vec<GoFile>> {
    let Some(primary) = files
        .iter()
        .map(|f| f.package_name.as_str())
        .find(|name| !name.ends_with("_test"))
        .map(str::to_string)
    else {
        return Err(DiscoveryError::NoPackage {
            path: dir.to_path_buf(),
        });
    };

    let (selected, skipped): (Vec<_>, Vec<_>) = files
        .into_iter()
        .partition(|f| f.package_name == primary);

    for file in &skipped {
        tracing::debug!(
            "skipping {} (package {}, expected {primary})",
            file.path.display(),
            file.package_name
        );
    }

    Ok(selected)
}
