//! Import path resolution
//!
//! Maps a Go import specifier (`example.com/lib/util`) to the absolute
//! directory holding that package. Discovery consults a [`PackageLocator`]
//! for every import it meets; a `None` answer is a non-fatal diagnostic.
//!
//! This is distinct from `indexing::resolver` which resolves method sets.
//! - project_resolver: "Which directory does this import name?"
//! - indexing::resolver: "Which methods does this type end up with?"

pub mod provider;
pub mod providers;

pub use provider::{MapLocator, PackageLocator};
pub use providers::gopath::GopathLocator;
