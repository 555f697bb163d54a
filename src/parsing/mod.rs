//! Source parsing
//!
//! Turns package directories into declaration lists. Only Go is supported.

pub mod go;
pub mod import;

pub use go::{GoFile, GoParser, load_package};
pub use import::{Import, ImportKind};
