//! Method set resolution over a frozen [`PackageIndex`]
//!
//! A type's method set is its own exported pointer methods followed, for
//! each embedded base in declaration order, by the base's method set. Bare
//! base names that are not declared in the owning package are looked up in
//! every package the owner dot-imports.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use crate::config::Settings;
use crate::error::Diagnostic;
use crate::storage::PackageIndex;
use crate::types::{BaseRef, MethodRecord, TypeId};

#[derive(Debug, Clone, Copy)]
pub struct ResolverOptions {
    /// Cache method sets of types whose resolution hit no cycle
    pub memoize: bool,
}

impl ResolverOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            memoize: settings.resolution.memoize,
        }
    }
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self { memoize: true }
    }
}

/// Resolved method set of one requested type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeMethods {
    pub name: String,
    pub methods: Vec<MethodRecord>,
}

impl TypeMethods {
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }
}

pub struct MethodResolver<'a> {
    index: &'a PackageIndex,
    options: ResolverOptions,
    memo: HashMap<TypeId, Vec<MethodRecord>>,
    /// Types whose resolution is on the current call path
    in_progress: Vec<TypeId>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> MethodResolver<'a> {
    pub fn new(index: &'a PackageIndex, options: ResolverOptions) -> Self {
        Self {
            index,
            options,
            memo: HashMap::new(),
            in_progress: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Full method set of `id`; empty when the type is unknown
    pub fn resolve(&mut self, id: &TypeId) -> Vec<MethodRecord> {
        self.visit(id).0
    }

    /// Resolve each name as a type of `package`, keeping the request order.
    /// Repeated names are resolved once.
    pub fn resolve_all<S: AsRef<str>>(&mut self, package: &Path, names: &[S]) -> Vec<TypeMethods> {
        let mut results: Vec<TypeMethods> = Vec::new();
        for name in names {
            let name = name.as_ref();
            if results.iter().any(|r| r.name == name) {
                continue;
            }
            let methods = self.resolve(&TypeId::new(package, name));
            if !self.index.contains_type(&TypeId::new(package, name)) {
                tracing::debug!("{name} is not declared in {}", package.display());
            }
            results.push(TypeMethods {
                name: name.to_string(),
                methods,
            });
        }
        results
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Returns the method set and whether any cycle was truncated below `id`
    fn visit(&mut self, id: &TypeId) -> (Vec<MethodRecord>, bool) {
        let index = self.index;
        let Some(own) = index.methods(id) else {
            return (Vec::new(), false);
        };

        if let Some(start) = self.in_progress.iter().position(|t| t == id) {
            let mut chain = self.in_progress[start..].to_vec();
            chain.push(id.clone());
            self.push_diagnostic(Diagnostic::EmbeddingCycle { chain });
            return (Vec::new(), true);
        }

        if let Some(cached) = self.memo.get(id) {
            return (cached.clone(), false);
        }

        self.in_progress.push(id.clone());
        let mut methods = own.to_vec();
        let mut truncated = false;

        for base in index.bases(id) {
            for target in self.targets(id, base) {
                let (inherited, cut) = self.visit(&target);
                methods.extend(inherited);
                truncated |= cut;
            }
        }

        self.in_progress.pop();

        // Truncated results depend on the call path
        if self.options.memoize && !truncated {
            self.memo.insert(id.clone(), methods.clone());
        }

        (methods, truncated)
    }

    /// Declared types an embedded base refers to
    fn targets(&mut self, owner: &TypeId, base: &BaseRef) -> Vec<TypeId> {
        let index = self.index;
        match base {
            BaseRef::Local(id) | BaseRef::Qualified(id) if index.contains_type(id) => {
                vec![id.clone()]
            }
            BaseRef::Local(id) => {
                let candidates: Vec<TypeId> = index
                    .dot_imports(owner.package())
                    .iter()
                    .map(|package| id.in_package(package))
                    .filter(|candidate| index.contains_type(candidate))
                    .collect();

                match candidates.len() {
                    0 => self.push_diagnostic(Diagnostic::UnresolvedBase {
                        owner: owner.clone(),
                        base: id.name.clone(),
                    }),
                    1 => {}
                    _ => self.push_diagnostic(Diagnostic::AmbiguousBase {
                        owner: owner.clone(),
                        base: id.name.clone(),
                        candidates: candidates.clone(),
                    }),
                }
                candidates
            }
            BaseRef::Qualified(_) | BaseRef::Unlocated { .. } => {
                self.push_diagnostic(Diagnostic::UnresolvedBase {
                    owner: owner.clone(),
                    base: base.to_string(),
                });
                Vec::new()
            }
        }
    }

    fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        if !self.diagnostics.contains(&diagnostic) {
            tracing::debug!("{diagnostic}");
            self.diagnostics.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PackageStore;
    use crate::types::Range;
    use std::path::PathBuf;

    fn method(name: &str) -> MethodRecord {
        MethodRecord::new(name, format!("func {name}()"), "/x.go", Range::new(0, 0, 0, 0))
    }

    fn id(package: &str, name: &str) -> TypeId {
        TypeId::new(package, name)
    }

    fn names(methods: &[MethodRecord]) -> Vec<&str> {
        methods.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_no_bases_returns_own_methods() {
        let store = PackageStore::new();
        store.add_method(id("/p", "T"), method("B"));
        store.add_method(id("/p", "T"), method("A"));
        let index = store.freeze();

        let mut resolver = MethodResolver::new(&index, ResolverOptions::default());
        assert_eq!(names(&resolver.resolve(&id("/p", "T"))), vec!["B", "A"]);
    }

    #[test]
    fn test_own_before_base() {
        let store = PackageStore::new();
        store.add_method(id("/p", "Base"), method("Hello"));
        store.add_base(id("/p", "Derived"), BaseRef::Local(id("/p", "Base")));
        store.add_method(id("/p", "Derived"), method("World"));
        let index = store.freeze();

        let mut resolver = MethodResolver::new(&index, ResolverOptions::default());
        assert_eq!(
            names(&resolver.resolve(&id("/p", "Derived"))),
            vec!["World", "Hello"]
        );
        assert!(resolver.diagnostics().is_empty());
    }

    #[test]
    fn test_unknown_type_is_empty() {
        let index = PackageStore::new().freeze();
        let mut resolver = MethodResolver::new(&index, ResolverOptions::default());
        assert!(resolver.resolve(&id("/p", "Nope")).is_empty());
        assert!(resolver.diagnostics().is_empty());
    }

    #[test]
    fn test_dot_import_candidate() {
        let store = PackageStore::new();
        store.add_base(id("/a", "X"), BaseRef::Local(id("/a", "Y")));
        store.add_dot_import(Path::new("/a"), PathBuf::from("/b"));
        store.add_method(id("/b", "Y"), method("Foo"));
        let index = store.freeze();

        let mut resolver = MethodResolver::new(&index, ResolverOptions::default());
        assert_eq!(names(&resolver.resolve(&id("/a", "X"))), vec!["Foo"]);
    }

    #[test]
    fn test_ambiguous_candidates_are_merged() {
        let store = PackageStore::new();
        store.add_base(id("/a", "X"), BaseRef::Local(id("/a", "Y")));
        store.add_dot_import(Path::new("/a"), PathBuf::from("/c"));
        store.add_dot_import(Path::new("/a"), PathBuf::from("/b"));
        store.add_method(id("/b", "Y"), method("FromB"));
        store.add_method(id("/c", "Y"), method("FromC"));
        let index = store.freeze();

        let mut resolver = MethodResolver::new(&index, ResolverOptions::default());
        assert_eq!(
            names(&resolver.resolve(&id("/a", "X"))),
            vec!["FromC", "FromB"]
        );
        assert_eq!(
            resolver.diagnostics(),
            &[Diagnostic::AmbiguousBase {
                owner: id("/a", "X"),
                base: "Y".to_string(),
                candidates: vec![id("/c", "Y"), id("/b", "Y")],
            }]
        );
    }

    #[test]
    fn test_unresolved_bases_are_reported() {
        let store = PackageStore::new();
        store.add_method(id("/a", "X"), method("Own"));
        store.add_base(id("/a", "X"), BaseRef::Local(id("/a", "Ghost")));
        store.add_base(
            id("/a", "X"),
            BaseRef::Unlocated {
                qualifier: "sync".to_string(),
                name: "Mutex".to_string(),
            },
        );
        let index = store.freeze();

        let mut resolver = MethodResolver::new(&index, ResolverOptions::default());
        assert_eq!(names(&resolver.resolve(&id("/a", "X"))), vec!["Own"]);
        assert_eq!(
            resolver.into_diagnostics(),
            vec![
                Diagnostic::UnresolvedBase {
                    owner: id("/a", "X"),
                    base: "Ghost".to_string(),
                },
                Diagnostic::UnresolvedBase {
                    owner: id("/a", "X"),
                    base: "sync.Mutex".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_cycle_is_truncated() {
        let store = PackageStore::new();
        store.add_method(id("/p", "A"), method("OnA"));
        store.add_method(id("/p", "B"), method("OnB"));
        store.add_base(id("/p", "A"), BaseRef::Local(id("/p", "B")));
        store.add_base(id("/p", "B"), BaseRef::Local(id("/p", "A")));
        let index = store.freeze();

        for memoize in [true, false] {
            let mut resolver = MethodResolver::new(&index, ResolverOptions { memoize });
            assert_eq!(names(&resolver.resolve(&id("/p", "A"))), vec!["OnA", "OnB"]);
            assert_eq!(names(&resolver.resolve(&id("/p", "B"))), vec!["OnB", "OnA"]);
            assert!(matches!(
                resolver.diagnostics()[0],
                Diagnostic::EmbeddingCycle { .. }
            ));
        }
    }

    #[test]
    fn test_self_embedding() {
        let store = PackageStore::new();
        store.add_method(id("/p", "S"), method("M"));
        store.add_base(id("/p", "S"), BaseRef::Local(id("/p", "S")));
        let index = store.freeze();

        let mut resolver = MethodResolver::new(&index, ResolverOptions::default());
        assert_eq!(names(&resolver.resolve(&id("/p", "S"))), vec!["M"]);
        assert_eq!(
            resolver.diagnostics(),
            &[Diagnostic::EmbeddingCycle {
                chain: vec![id("/p", "S"), id("/p", "S")],
            }]
        );
    }

    #[test]
    fn test_memoized_matches_unmemoized() {
        let store = PackageStore::new();
        // Top embeds Left and Right, both embed Shared; Shared embeds Top (cycle)
        store.add_method(id("/p", "Top"), method("T"));
        store.add_method(id("/p", "Left"), method("L"));
        store.add_method(id("/p", "Right"), method("R"));
        store.add_method(id("/p", "Shared"), method("S"));
        store.add_base(id("/p", "Top"), BaseRef::Local(id("/p", "Left")));
        store.add_base(id("/p", "Top"), BaseRef::Local(id("/p", "Right")));
        store.add_base(id("/p", "Left"), BaseRef::Local(id("/p", "Shared")));
        store.add_base(id("/p", "Right"), BaseRef::Local(id("/p", "Shared")));
        store.add_base(id("/p", "Shared"), BaseRef::Local(id("/p", "Top")));
        let index = store.freeze();

        let order = ["Top", "Shared", "Left", "Right", "Top"];
        let mut memoized = MethodResolver::new(&index, ResolverOptions { memoize: true });
        let mut plain = MethodResolver::new(&index, ResolverOptions { memoize: false });

        for name in order {
            assert_eq!(
                memoized.resolve(&id("/p", name)),
                plain.resolve(&id("/p", name)),
                "mismatch for {name}"
            );
        }
    }

    #[test]
    fn test_resolve_all_deduplicates_names() {
        let store = PackageStore::new();
        store.add_method(id("/p", "T"), method("M"));
        let index = store.freeze();

        let mut resolver = MethodResolver::new(&index, ResolverOptions::default());
        let results = resolver.resolve_all(Path::new("/p"), &["T", "Missing", "T"]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].method_names(), vec!["M"]);
        assert_eq!(results[1].name, "Missing");
        assert!(results[1].methods.is_empty());
    }
}
