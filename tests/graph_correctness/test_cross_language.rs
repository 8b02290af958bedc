//! A single repository mixing languages indexes each file under its own
//! rules and resolves imports only within that file's language.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use cartograph_core::types::{EdgeKind, Language};
use cartograph_parsers::resolver::Resolver;
use cartograph_parsers::treesitter::parse_file;

fn write(root: &Path, rel: &str, contents: &str) {
    let full = root.join(rel);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, contents).unwrap();
}

#[test]
fn go_and_python_files_in_the_same_repo_resolve_independently() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "go.mod", "module example.com/app\n");
    write(
        root,
        "internal/util/util.go",
        "package util\n\nfunc Helper() {}\n",
    );
    write(
        root,
        "main.go",
        "package main\n\nimport \"example.com/app/internal/util\"\n\nfunc main() {\n\tutil.Helper()\n}\n",
    );
    write(
        root,
        "scripts/runner.py",
        "from . import tasks\n\ndef run():\n    tasks.execute()\n",
    );
    write(root, "scripts/tasks.py", "def execute():\n    pass\n");

    let known_files: HashSet<String> = [
        "go.mod",
        "internal/util/util.go",
        "main.go",
        "scripts/runner.py",
        "scripts/tasks.py",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let resolver = Resolver::new(root, &known_files);

    let go_source = fs::read(root.join("main.go")).unwrap();
    let go_result = parse_file("main.go", &go_source, Language::Go).unwrap();
    let go_import_edges: Vec<_> = go_result
        .raw_imports
        .iter()
        .map(|imp| cartograph_core::types::Edge {
            source_id: imp.source_file.clone(),
            target_id: imp.specifier.clone(),
            kind: EdgeKind::Imports,
        })
        .collect();
    let resolved_go = resolver.resolve_all(go_import_edges, Language::Go);
    assert_eq!(resolved_go.len(), 1);
    assert_eq!(resolved_go[0].target_id, "internal/util/util.go");

    let py_source = fs::read(root.join("scripts/runner.py")).unwrap();
    let py_result = parse_file("scripts/runner.py", &py_source, Language::Python).unwrap();
    let py_import_edges: Vec<_> = py_result
        .raw_imports
        .iter()
        .map(|imp| cartograph_core::types::Edge {
            source_id: imp.source_file.clone(),
            target_id: imp.specifier.clone(),
            kind: EdgeKind::Imports,
        })
        .collect();
    let resolved_py = resolver.resolve_all(py_import_edges, Language::Python);
    assert_eq!(resolved_py.len(), 1);
    assert_eq!(resolved_py[0].target_id, "scripts/tasks.py");
}

#[test]
fn each_extractor_only_recognizes_its_own_language_constructs() {
    let go_source = b"package p\n\nfunc main() {}\n";
    let go_result = parse_file("a.go", go_source, Language::Go).unwrap();
    assert_eq!(go_result.symbols.len(), 1);

    let rust_source = b"fn main() {}\n";
    let rust_result = parse_file("a.rs", rust_source, Language::Rust).unwrap();
    assert_eq!(rust_result.symbols.len(), 1);

    assert_eq!(go_result.file.language, Language::Go);
    assert_eq!(rust_result.file.language, Language::Rust);
}
