//! End-to-end find runs over throwaway GOPATH trees

use crate::common::GoWorkspace;
use promoted::{Diagnostic, FindError, TypeId};

fn names(report: &promoted::FindReport, type_name: &str) -> Vec<String> {
    report
        .get(type_name)
        .map(|t| t.methods.iter().map(|m| m.name.clone()).collect())
        .unwrap_or_default()
}

#[test]
fn test_own_methods_before_embedded() {
    let ws = GoWorkspace::new();
    ws.add_file(
        "example.com/p",
        "base.go",
        r#"package p

type Base struct{}

func (b *Base) Hello() {}
"#,
    );
    ws.add_file(
        "example.com/p",
        "derived.go",
        r#"package p

type Derived struct {
	Base
}

func (d *Derived) World() {}
"#,
    );

    let report = ws
        .finder(4)
        .find(&ws.package_dir("example.com/p"), &["Derived"])
        .unwrap();

    assert_eq!(names(&report, "Derived"), vec!["World", "Hello"]);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_dot_imported_base() {
    let ws = GoWorkspace::new();
    ws.add_file(
        "example.com/a",
        "a.go",
        r#"package a

import . "example.com/b"

type X struct {
	Y
}
"#,
    );
    ws.add_file(
        "example.com/b",
        "b.go",
        r#"package b

type Y struct{}

func (y *Y) Foo() {}
func (y *Y) private() {}
func (y Y) ByValue() {}
"#,
    );

    let report = ws
        .finder(2)
        .find(&ws.package_dir("example.com/a"), &["X"])
        .unwrap();

    assert_eq!(names(&report, "X"), vec!["Foo"]);
    assert_eq!(report.stats.packages_parsed, 2);
}

#[test]
fn test_qualified_pointer_embedding_across_packages() {
    let ws = GoWorkspace::new();
    ws.add_file(
        "example.com/app",
        "server.go",
        r#"package app

import (
	"example.com/lib/conn"
	log "example.com/lib/logging"
)

type Server struct {
	*conn.Conn
	log.Logger
	name string
}

func (s *Server) Serve() error { return nil }
"#,
    );
    ws.add_file(
        "example.com/lib/conn",
        "conn.go",
        r#"package conn

type Conn struct{}

func (c *Conn) Read(p []byte) (int, error) { return 0, nil }
func (c *Conn) Close() error { return nil }
"#,
    );
    ws.add_file(
        "example.com/lib/logging",
        "logger.go",
        r#"package logging

type Logger struct{}

func (l *Logger) Printf(format string, args ...any) {}
"#,
    );

    let report = ws
        .finder(8)
        .find(&ws.package_dir("example.com/app"), &["Server"])
        .unwrap();

    assert_eq!(
        names(&report, "Server"),
        vec!["Serve", "Read", "Close", "Printf"]
    );
    let serve = &report.get("Server").unwrap().methods[0];
    assert!(serve.signature.contains("Serve() error"));
    assert!(serve.file.ends_with("server.go"));
}

#[test]
fn test_unknown_type_is_empty() {
    let ws = GoWorkspace::new();
    ws.add_file("example.com/p", "p.go", "package p\n\ntype T struct{}\n");

    let report = ws
        .finder(1)
        .find(&ws.package_dir("example.com/p"), &["Missing"])
        .unwrap();

    assert_eq!(report.types.len(), 1);
    assert!(names(&report, "Missing").is_empty());
}

#[test]
fn test_cross_package_cycle_terminates() {
    let ws = GoWorkspace::new();
    ws.add_file(
        "example.com/a",
        "a.go",
        r#"package a

import "example.com/b"

type A struct {
	b.B
}

func (x *A) OnA() {}
"#,
    );
    ws.add_file(
        "example.com/b",
        "b.go",
        r#"package b

import "example.com/a"

type B struct {
	a.A
}

func (x *B) OnB() {}
"#,
    );

    let report = ws
        .finder(4)
        .find(&ws.package_dir("example.com/a"), &["A"])
        .unwrap();

    assert_eq!(names(&report, "A"), vec!["OnA", "OnB"]);
    let a = TypeId::new(ws.package_dir("example.com/a"), "A");
    let b = TypeId::new(ws.package_dir("example.com/b"), "B");
    assert!(report.diagnostics.contains(&Diagnostic::EmbeddingCycle {
        chain: vec![a.clone(), b, a],
    }));
}

#[test]
fn test_deterministic_across_runs_and_limits() {
    let ws = GoWorkspace::new();
    for i in 0..6 {
        let next = i + 1;
        ws.add_file(
            &format!("example.com/layer{i}"),
            "layer.go",
            &format!(
                r#"package layer{i}

import "example.com/layer{next}"

type T struct {{
	layer{next}.T
}}

func (t *T) M{i}a() {{}}
func (t *T) M{i}b() {{}}
"#
            ),
        );
    }
    ws.add_file(
        "example.com/layer6",
        "layer.go",
        "package layer6\n\ntype T struct{}\n\nfunc (t *T) Bottom() {}\n",
    );

    let root = ws.package_dir("example.com/layer0");
    let baseline = names(&ws.finder(0).find(&root, &["T"]).unwrap(), "T");
    assert_eq!(baseline.len(), 13);
    assert_eq!(baseline.first().map(String::as_str), Some("M0a"));
    assert_eq!(baseline.last().map(String::as_str), Some("Bottom"));

    for limit in [0, 1, 3, 16] {
        for _ in 0..3 {
            let report = ws.finder(limit).find(&root, &["T"]).unwrap();
            assert_eq!(names(&report, "T"), baseline, "limit {limit}");
            assert_eq!(report.stats.packages_parsed, 7);
        }
    }
}

#[test]
fn test_memoization_does_not_change_results() {
    let ws = GoWorkspace::new();
    ws.add_file(
        "example.com/p",
        "p.go",
        r#"package p

type Shared struct{ Top }
type Left struct{ Shared }
type Right struct{ Shared }
type Top struct {
	Left
	Right
}

func (s *Shared) S() {}
func (l *Left) L()   {}
func (r *Right) R()  {}
func (t *Top) T()    {}
"#,
    );

    let root = ws.package_dir("example.com/p");
    let types = ["Top", "Shared", "Left", "Right"];

    let memoized = ws.finder(2).find(&root, &types).unwrap();
    let mut settings = ws.settings(2);
    settings.resolution.memoize = false;
    let plain = promoted::MethodFinder::new(std::sync::Arc::new(settings))
        .find(&root, &types)
        .unwrap();

    for name in types {
        assert_eq!(names(&memoized, name), names(&plain, name), "{name}");
    }
    assert_eq!(names(&memoized, "Top"), vec!["T", "L", "S", "R", "S"]);
}

#[test]
fn test_test_packages_are_ignored() {
    let ws = GoWorkspace::new();
    ws.add_file(
        "example.com/p",
        "p.go",
        "package p\n\ntype T struct{}\n\nfunc (t *T) Real() {}\n",
    );
    ws.add_file(
        "example.com/p",
        "p_test.go",
        "package p_test\n\nfunc (t *T) Fake() {}\n",
    );

    let report = ws
        .finder(1)
        .find(&ws.package_dir("example.com/p"), &["T"])
        .unwrap();
    assert_eq!(names(&report, "T"), vec!["Real"]);
}

#[test]
fn test_parse_failures_are_aggregated() {
    let ws = GoWorkspace::new();
    ws.add_file(
        "example.com/root",
        "root.go",
        r#"package root

import (
	"example.com/bad1"
	"example.com/bad2"
)

type R struct {
	bad1.A
	bad2.B
}
"#,
    );
    ws.add_file("example.com/bad1", "a.go", "package bad1\n\ntype A struct {\n");
    ws.add_file("example.com/bad2", "b.go", "package bad2\n\nfunc (\n");

    let err = ws
        .finder(4)
        .find(&ws.package_dir("example.com/root"), &["R"])
        .unwrap_err();

    let FindError::Discovery(errors) = &err else {
        panic!("expected discovery failure, got {err:?}");
    };
    assert_eq!(errors.len(), 2);
    assert!(errors[0].package().ends_with("bad1"));
    assert!(errors[1].package().ends_with("bad2"));
    assert_eq!(err.status_code(), "PARSE_ERROR");
}

#[test]
fn test_unlocatable_import_is_a_diagnostic() {
    let ws = GoWorkspace::new();
    ws.add_file(
        "example.com/p",
        "p.go",
        r#"package p

import "sync"

type Guarded struct {
	sync.Mutex
}

func (g *Guarded) Do() {}
"#,
    );

    let report = ws
        .finder(1)
        .find(&ws.package_dir("example.com/p"), &["Guarded"])
        .unwrap();

    assert_eq!(names(&report, "Guarded"), vec!["Do"]);
    assert_eq!(report.diagnostics.len(), 2);
    assert!(matches!(
        report.diagnostics[0],
        Diagnostic::UnresolvableImport { ref import_path, .. } if import_path == "sync"
    ));
    assert!(matches!(
        report.diagnostics[1],
        Diagnostic::UnresolvedBase { ref base, .. } if base == "sync.Mutex"
    ));
}

#[test]
fn test_unused_unlocatable_import_is_silent() {
    let ws = GoWorkspace::new();
    ws.add_file(
        "example.com/p",
        "p.go",
        r#"package p

import (
	"fmt"
	"strings"
)

type Printer struct{}

func (p *Printer) Print() { fmt.Println(strings.ToUpper("x")) }
"#,
    );

    let report = ws
        .finder(1)
        .find(&ws.package_dir("example.com/p"), &["Printer"])
        .unwrap();

    assert_eq!(names(&report, "Printer"), vec!["Print"]);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_unclean_search_root_parses_each_package_once() {
    let ws = GoWorkspace::new();
    ws.add_file(
        "example.com/a",
        "a.go",
        r#"package a

import "example.com/b"

type A struct {
	b.B
}

func (x *A) OnA() {}
"#,
    );
    ws.add_file(
        "example.com/b",
        "b.go",
        r#"package b

import "example.com/a"

type B struct {
	a.A
}

func (x *B) OnB() {}
"#,
    );

    let mut settings = ws.settings(4);
    settings.search.paths = vec![ws.path().join("src/./example.com/..").join("..")];
    let finder = promoted::MethodFinder::new(std::sync::Arc::new(settings));

    let report = finder
        .find(&ws.package_dir("example.com/a"), &["A"])
        .unwrap();

    assert_eq!(names(&report, "A"), vec!["OnA", "OnB"]);
    assert_eq!(report.stats.packages_parsed, 2);
}
