//! Go language support
//!
//! The Go parser uses tree-sitter-go to turn one source file into a
//! [`GoFile`]: the package clause, imports, type declarations with their
//! embedded fields, and function and method declarations.
//!
//! ## Module Components
//!
//! - [`parser`]: tree-sitter integration and declaration extraction
//! - [`declarations`]: the per-file declaration model
//! - [`package`]: directory listing and primary-package selection

pub mod declarations;
pub mod package;
pub mod parser;

pub use declarations::{
    EmbeddedField, FunctionDecl, GoFile, Receiver, TypeDecl, TypeShape, is_exported,
};
pub use package::{list_source_files, load_package};
pub use parser::GoParser;
