//! Settings loaded from a TOML file drive package search and discovery

use crate::common::GoWorkspace;
use promoted::{MethodFinder, Settings};
use std::sync::Arc;

#[test]
fn test_search_paths_from_settings_file() {
    let ws = GoWorkspace::new();
    ws.add_file(
        "example.com/app",
        "app.go",
        r#"package app

import "example.com/base"

type App struct {
	base.Service
}
"#,
    );
    ws.add_file(
        "example.com/base",
        "service.go",
        "package base\n\ntype Service struct{}\n\nfunc (s *Service) Start() {}\n",
    );

    let settings_path = ws.path().join(".promoted").join("settings.toml");
    std::fs::create_dir_all(settings_path.parent().unwrap()).unwrap();
    std::fs::write(
        &settings_path,
        format!(
            r#"
[discovery]
concurrency_limit = 0

[search]
env_var = "PROMOTED_TEST_UNSET_GOPATH"
paths = ["{}"]
"#,
            ws.path().display()
        ),
    )
    .unwrap();

    let settings = Settings::load_from(&settings_path).expect("Should load settings");
    assert_eq!(settings.discovery.concurrency_limit, 0);
    assert!(settings.resolution.memoize);

    let report = MethodFinder::new(Arc::new(settings))
        .find(&ws.package_dir("example.com/app"), &["App"])
        .unwrap();

    let methods = report.get("App").unwrap().method_names();
    assert_eq!(methods, vec!["Start"]);
    assert_eq!(report.stats.tasks_spawned, 0);
    assert_eq!(report.stats.inline_calls, 1);
}

#[test]
fn test_without_search_roots_imports_stay_unresolved() {
    let ws = GoWorkspace::new();
    ws.add_file(
        "example.com/app",
        "app.go",
        "package app\n\nimport \"example.com/base\"\n\ntype App struct{ base.Service }\n",
    );
    ws.add_file(
        "example.com/base",
        "service.go",
        "package base\n\ntype Service struct{}\n\nfunc (s *Service) Start() {}\n",
    );

    let mut settings = ws.settings(1);
    settings.search.paths.clear();

    let report = MethodFinder::new(Arc::new(settings))
        .find(&ws.package_dir("example.com/app"), &["App"])
        .unwrap();

    assert!(report.get("App").unwrap().methods.is_empty());
    assert_eq!(report.stats.packages_parsed, 1);
}
