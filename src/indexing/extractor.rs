//! Declaration extraction
//!
//! Applies one parsed file to the [`PackageStore`]: type entries, embedded
//! bases, exported pointer-receiver methods, and dot imports. Returns the
//! packages that must be discovered before resolution can see everything
//! the file refers to.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Diagnostic;
use crate::parsing::go::{GoFile, TypeShape};
use crate::project_resolver::PackageLocator;
use crate::storage::PackageStore;
use crate::types::{BaseRef, MethodRecord, TypeId};

/// Import path of one qualifier and its package directory, if located
struct AliasTarget<'f> {
    import_path: &'f str,
    located: Option<PathBuf>,
}

/// Import qualifiers of one file.
///
/// Lives only while its file is being extracted.
type ImportAliases<'f> = HashMap<&'f str, AliasTarget<'f>>;

pub struct DeclarationExtractor<'a> {
    store: &'a PackageStore,
    locator: &'a dyn PackageLocator,
    package: &'a Path,
}

impl<'a> DeclarationExtractor<'a> {
    pub fn new(store: &'a PackageStore, locator: &'a dyn PackageLocator, package: &'a Path) -> Self {
        Self {
            store,
            locator,
            package,
        }
    }

    /// Apply `file` to the store, returning discovery requests in encounter order
    pub fn extract(&self, file: &GoFile) -> Vec<PathBuf> {
        let mut requests = Vec::new();
        let aliases = self.extract_imports(file, &mut requests);

        for decl in &file.types {
            let id = TypeId::new(self.package, decl.name.clone());
            self.store.declare_type(id.clone());

            let TypeShape::Struct { embedded } = &decl.shape else {
                continue;
            };

            for field in embedded {
                let base = match &field.qualifier {
                    None => BaseRef::Local(TypeId::new(self.package, field.name.clone())),
                    Some(qualifier) => match aliases.get(qualifier.as_str()) {
                        Some(AliasTarget {
                            located: Some(dir), ..
                        }) => {
                            push_request(&mut requests, dir);
                            BaseRef::Qualified(TypeId::new(dir.clone(), field.name.clone()))
                        }
                        target => {
                            if let Some(target) = target {
                                self.unresolvable_import(target.import_path);
                            }
                            BaseRef::Unlocated {
                                qualifier: qualifier.clone(),
                                name: field.name.clone(),
                            }
                        }
                    },
                };
                self.store.add_base(id.clone(), base);
            }
        }

        for function in &file.functions {
            let Some(receiver) = function.pointer_receiver() else {
                continue;
            };
            if !function.is_exported() {
                continue;
            }
            self.store.add_method(
                TypeId::new(self.package, receiver),
                MethodRecord::new(
                    function.name.clone(),
                    function.signature.clone(),
                    file.path.clone(),
                    function.range,
                ),
            );
        }

        requests
    }

    /// Unlocated imports only become diagnostics once something depends on
    /// them: a dot import, or a qualifier used by an embedded field.
    fn extract_imports<'f>(&self, file: &'f GoFile, requests: &mut Vec<PathBuf>) -> ImportAliases<'f> {
        let mut aliases = ImportAliases::new();

        for import in &file.imports {
            let located = self.locator.locate(&import.path);
            if located.is_none() {
                tracing::debug!(
                    "import \"{}\" in {} not found in any search root",
                    import.path,
                    file.path.display()
                );
            }

            if import.is_dot() {
                match &located {
                    Some(dir) => {
                        self.store.add_dot_import(self.package, dir.clone());
                        push_request(requests, dir);
                    }
                    None => self.unresolvable_import(&import.path),
                }
                continue;
            }

            if let Some(name) = import.local_name() {
                aliases.insert(
                    name,
                    AliasTarget {
                        import_path: &import.path,
                        located,
                    },
                );
            }
        }

        aliases
    }

    fn unresolvable_import(&self, import_path: &str) {
        self.store.push_diagnostic(Diagnostic::UnresolvableImport {
            package: self.package.to_path_buf(),
            import_path: import_path.to_string(),
        });
    }
}

fn push_request(requests: &mut Vec<PathBuf>, dir: &Path) {
    if !requests.iter().any(|r| r == dir) {
        requests.push(dir.to_path_buf());
    }
}
