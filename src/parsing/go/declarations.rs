//! Declarations extracted from one Go source file
//!
//! Only top-level declarations are recorded; bodies are never inspected.

use crate::parsing::Import;
use crate::types::Range;
use std::path::PathBuf;

/// Top-level declarations of one file, in source order
#[derive(Debug, Clone)]
pub struct GoFile {
    pub path: PathBuf,
    pub package_name: String,
    pub imports: Vec<Import>,
    pub types: Vec<TypeDecl>,
    pub functions: Vec<FunctionDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub shape: TypeShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Struct { embedded: Vec<EmbeddedField> },
    /// Interfaces, aliases, and named non-struct types
    Other,
}

/// A struct field declared without a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedField {
    /// Package qualifier of `pkg.Name`
    pub qualifier: Option<String>,
    pub name: String,
    pub pointer: bool,
}

impl EmbeddedField {
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
            pointer: false,
        }
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            name: name.into(),
            pointer: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub receiver: Option<Receiver>,
    pub signature: String,
    pub range: Range,
}

impl FunctionDecl {
    /// Go exports identifiers starting with an upper-case letter
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }

    /// Receiver type name if this is a method on `*T` with exactly one receiver parameter
    pub fn pointer_receiver(&self) -> Option<&str> {
        let receiver = self.receiver.as_ref()?;
        if receiver.parameter_count != 1 || !receiver.pointer {
            return None;
        }
        receiver.type_name.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    /// Named receiver type, type arguments stripped
    pub type_name: Option<String>,
    pub pointer: bool,
    pub parameter_count: usize,
}

pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
