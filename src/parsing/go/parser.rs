//! Go parser implementation
//!
//! Uses tree-sitter-go crate’s LANGUAGE constant (converted via .into()).
//!
//! Produces a [`GoFile`] per source file: the package clause, imports,
//! type declarations with their embedded fields, and function/method
//! declarations. Nothing below the top level is visited.

use std::fs;
use std::path::Path;

use tree_sitter::{Node, Parser};

use super::declarations::{
    EmbeddedField, FunctionDecl, GoFile, Receiver, TypeDecl, TypeShape,
};
use crate::error::{DiscoveryError, DiscoveryResult};
use crate::parsing::{Import, ImportKind};
use crate::types::Range;

/// Go language parser
///
/// Wraps a single tree-sitter parser, which is not shareable across threads;
/// every parsing worker creates its own.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Create a new Go parser
    pub fn new() -> Result<Self, String> {
        let mut parser = Parser::new();
        let lang = tree_sitter_go::LANGUAGE;
        parser
            .set_language(&lang.into())
            .map_err(|e| format!("Failed to set Go language: {e}"))?;

        Ok(Self { parser })
    }

    /// Read and parse one file of the package in `package`
    pub fn parse_file(&mut self, path: &Path, package: &Path) -> DiscoveryResult<GoFile> {
        let code = fs::read_to_string(path).map_err(|source| DiscoveryError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_source(&code, path, package)
    }

    /// Parse Go source code and extract its top-level declarations
    ///
    /// Any syntax error in the file is a failure.
    pub fn parse_source(
        &mut self,
        code: &str,
        path: &Path,
        package: &Path,
    ) -> DiscoveryResult<GoFile> {
        let syntax_error = |line: u32, column: u32, reason: String| DiscoveryError::Syntax {
            package: package.to_path_buf(),
            file: path.to_path_buf(),
            line,
            column,
            reason,
        };

        let tree = self
            .parser
            .parse(code, None)
            .ok_or_else(|| syntax_error(1, 1, "parser produced no tree".to_string()))?;
        let root = tree.root_node();

        if root.has_error() {
            let (line, column, reason) = match first_error(root) {
                Some(node) => describe_error(node, code),
                None => (1, 1, "syntax error".to_string()),
            };
            return Err(syntax_error(line, column, reason));
        }

        let mut file = GoFile {
            path: path.to_path_buf(),
            package_name: String::new(),
            imports: Vec::new(),
            types: Vec::new(),
            functions: Vec::new(),
        };

        for child in root.children(&mut root.walk()) {
            match child.kind() {
                "package_clause" => {
                    if let Some(name) = child
                        .children(&mut child.walk())
                        .find(|n| n.kind() == "package_identifier")
                    {
                        file.package_name = code[name.byte_range()].to_string();
                    }
                }
                "import_declaration" => {
                    self.process_import_declaration(child, code, &mut file.imports);
                }
                "type_declaration" => {
                    self.process_type_declaration(child, code, &mut file.types);
                }
                "method_declaration" | "function_declaration" => {
                    if let Some(function) = self.process_function(child, code) {
                        file.functions.push(function);
                    }
                }
                _ => {}
            }
        }

        if file.package_name.is_empty() {
            return Err(syntax_error(1, 1, "missing package clause".to_string()));
        }

        Ok(file)
    }

    /// Process a Go import declaration node
    fn process_import_declaration(&self, node: Node, code: &str, imports: &mut Vec<Import>) {
        // import_declaration can contain either a single import_spec or import_spec_list
        for child in node.children(&mut node.walk()) {
            match child.kind() {
                "import_spec" => {
                    if let Some(import) = self.process_import_spec(child, code) {
                        imports.push(import);
                    }
                }
                "import_spec_list" => {
                    for spec_child in child.children(&mut child.walk()) {
                        if spec_child.kind() == "import_spec" {
                            if let Some(import) = self.process_import_spec(spec_child, code) {
                                imports.push(import);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Process a single Go import_spec node
    fn process_import_spec(&self, node: Node, code: &str) -> Option<Import> {
        let mut import_path = None;
        let mut kind = ImportKind::Default;

        for child in node.children(&mut node.walk()) {
            match child.kind() {
                "interpreted_string_literal" | "raw_string_literal" => {
                    let path_text = &code[child.byte_range()];
                    import_path = Some(path_text.trim_matches(|c| c == '"' || c == '`').to_string());
                }
                // import l "example.com/lib"
                "package_identifier" => {
                    kind = ImportKind::Named(code[child.byte_range()].to_string());
                }
                "dot" => kind = ImportKind::Dot,
                "blank_identifier" => kind = ImportKind::Blank,
                _ => {}
            }
        }

        import_path.map(|path| Import::new(path, kind))
    }

    /// type_declaration contains type_spec nodes (and type_alias nodes for `type A = B`)
    fn process_type_declaration(&self, node: Node, code: &str, types: &mut Vec<TypeDecl>) {
        for child in node.children(&mut node.walk()) {
            match child.kind() {
                "type_spec" => {
                    if let Some(decl) = self.process_type_spec(child, code) {
                        types.push(decl);
                    }
                }
                "type_alias" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        types.push(TypeDecl {
                            name: code[name.byte_range()].to_string(),
                            shape: TypeShape::Other,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    fn process_type_spec(&self, node: Node, code: &str) -> Option<TypeDecl> {
        let name = &code[node.child_by_field_name("name")?.byte_range()];
        let type_node = node.child_by_field_name("type")?;

        let shape = match type_node.kind() {
            "struct_type" => TypeShape::Struct {
                embedded: self.extract_embedded_fields(type_node, code),
            },
            _ => TypeShape::Other,
        };

        Some(TypeDecl {
            name: name.to_string(),
            shape,
        })
    }

    /// Collect the fields of a struct_type that carry no field name
    fn extract_embedded_fields(&self, struct_node: Node, code: &str) -> Vec<EmbeddedField> {
        let mut embedded = Vec::new();

        for child in struct_node.children(&mut struct_node.walk()) {
            if child.kind() != "field_declaration_list" {
                continue;
            }
            for field in child.children(&mut child.walk()) {
                if field.kind() != "field_declaration" || field.child_by_field_name("name").is_some()
                {
                    continue;
                }
                let Some(type_node) = field.child_by_field_name("type") else {
                    continue;
                };
                let star = field.children(&mut field.walk()).any(|n| n.kind() == "*");
                if let Some((qualifier, name, pointer)) = named_type(type_node, code) {
                    embedded.push(EmbeddedField {
                        qualifier,
                        name,
                        pointer: star || pointer,
                    });
                }
            }
        }

        embedded
    }

    /// Process a function or method declaration
    fn process_function(&self, node: Node, code: &str) -> Option<FunctionDecl> {
        let name = &code[node.child_by_field_name("name")?.byte_range()];

        let receiver = node
            .child_by_field_name("receiver")
            .map(|receiver| self.process_receiver(receiver, code));

        Some(FunctionDecl {
            name: name.to_string(),
            receiver,
            signature: extract_signature(node, code),
            range: node_range(node),
        })
    }

    /// Method receivers in Go are parameter lists: func (r *Type) method()
    fn process_receiver(&self, receiver: Node, code: &str) -> Receiver {
        let params: Vec<Node> = receiver
            .children(&mut receiver.walk())
            .filter(|n| n.kind() == "parameter_declaration")
            .collect();

        let (type_name, pointer) = params
            .first()
            .and_then(|param| param.child_by_field_name("type"))
            .and_then(|type_node| named_type(type_node, code))
            .map(|(_, name, pointer)| (Some(name), pointer))
            .unwrap_or((None, false));

        Receiver {
            type_name,
            pointer,
            parameter_count: params.len(),
        }
    }
}

/// Resolve a type expression to `(qualifier, name, pointer)` when it names a type.
///
/// Handles `T`, `*T`, `pkg.T`, `T[X]` and parenthesised forms; anything else
/// (slices, maps, function types) is not a named type.
fn named_type(node: Node, code: &str) -> Option<(Option<String>, String, bool)> {
    match node.kind() {
        "type_identifier" => Some((None, code[node.byte_range()].to_string(), false)),
        "qualified_type" => {
            let package = node.child_by_field_name("package")?;
            let name = node.child_by_field_name("name")?;
            Some((
                Some(code[package.byte_range()].to_string()),
                code[name.byte_range()].to_string(),
                false,
            ))
        }
        "generic_type" => named_type(node.child_by_field_name("type")?, code),
        "pointer_type" | "parenthesized_type" => {
            let inner = node.named_child(0)?;
            let (qualifier, name, pointer) = named_type(inner, code)?;
            Some((qualifier, name, pointer || node.kind() == "pointer_type"))
        }
        _ => None,
    }
}

/// Declaration text without the body
fn extract_signature(node: Node, code: &str) -> String {
    let start = node.start_byte();
    let mut end = node.end_byte();

    if let Some(body) = node.child_by_field_name("body") {
        end = body.start_byte();
    }

    code[start..end].trim().to_string()
}

/// Span of `node`; positions past the field widths saturate
fn node_range(node: Node) -> Range {
    let start = node.start_position();
    let end = node.end_position();
    Range::new(
        u32::try_from(start.row).unwrap_or(u32::MAX),
        u16::try_from(start.column).unwrap_or(u16::MAX),
        u32::try_from(end.row).unwrap_or(u32::MAX),
        u16::try_from(end.column).unwrap_or(u16::MAX),
    )
}

/// Depth-first search for the first ERROR or MISSING node
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// 1-based line and column plus a short reason
fn describe_error(node: Node, code: &str) -> (u32, u32, String) {
    let position = node.start_position();
    let reason = if node.is_missing() {
        format!("missing {}", node.kind())
    } else {
        let text = code[node.byte_range()].lines().next().unwrap_or("").trim();
        let snippet: String = text.chars().take(40).collect();
        format!("unexpected `{snippet}`")
    };
    (position.row as u32 + 1, position.column as u32 + 1, reason)
}
