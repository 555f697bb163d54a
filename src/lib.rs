//! Promoted-method discovery for Go packages
//!
//! Discovery walks a root package and every package it embeds from or
//! dot-imports, concurrently and at most once per package, filling a
//! [`storage::PackageStore`]. Resolution then runs over the frozen
//! [`storage::PackageIndex`] and returns each requested type's own exported
//! pointer methods followed by those promoted from its embedded fields.

pub mod config;
pub mod error;
pub mod finder;
pub mod indexing;
pub mod io;
pub mod parsing;
pub mod project_resolver;
pub mod storage;
pub mod types;

// Explicit exports for better API clarity
pub use config::Settings;
pub use error::{Diagnostic, DiscoveryError, DiscoveryResult, FindError, FindResult};
pub use finder::{FindReport, MethodFinder};
pub use indexing::{
    DiscoveryStats, MethodResolver, PackageWalker, ResolverOptions, TypeMethods, WalkerOptions,
};
pub use parsing::GoParser;
pub use project_resolver::{GopathLocator, MapLocator, PackageLocator};
pub use storage::{PackageIndex, PackageStore};
pub use types::{BaseRef, MethodRecord, Range, TypeId};
