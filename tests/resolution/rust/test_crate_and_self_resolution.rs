use std::collections::HashSet;

use cartograph_core::types::{Edge, EdgeKind, Language};
use cartograph_parsers::resolver::Resolver;

use crate::common::write_project;

#[test]
fn crate_prefixed_use_resolves_through_the_crate_s_src_directory() {
    let (_dir, root) = write_project(&[
        ("Cargo.toml", "[package]\nname = \"widgets\"\n"),
        ("src/lib.rs", "mod config;\n"),
        ("src/config.rs", "pub struct Config;\n"),
    ]);

    let known_files: HashSet<String> = ["src/lib.rs", "src/config.rs"]
        .into_iter()
        .map(String::from)
        .collect();

    let resolver = Resolver::new(&root, &known_files);
    let edge = Edge {
        source_id: "src/lib.rs".to_string(),
        target_id: "crate::config".to_string(),
        kind: EdgeKind::Imports,
    };

    let resolved = resolver.resolve_edge(edge, Language::Rust).unwrap();
    assert_eq!(resolved.target_id, "src/config.rs");
}

#[test]
fn self_prefixed_use_resolves_relative_to_the_using_file_s_directory() {
    let (_dir, root) = write_project(&[
        ("src/handlers/mod.rs", "use self::auth;\n"),
        ("src/handlers/auth.rs", ""),
    ]);

    let known_files: HashSet<String> = ["src/handlers/mod.rs", "src/handlers/auth.rs"]
        .into_iter()
        .map(String::from)
        .collect();

    let resolver = Resolver::new(&root, &known_files);
    let edge = Edge {
        source_id: "src/handlers/mod.rs".to_string(),
        target_id: "self::auth".to_string(),
        kind: EdgeKind::Imports,
    };

    let resolved = resolver.resolve_edge(edge, Language::Rust).unwrap();
    assert_eq!(resolved.target_id, "src/handlers/auth.rs");
}

#[test]
fn external_crate_use_is_dropped() {
    let (_dir, root) = write_project(&[("src/lib.rs", "use serde::Serialize;\n")]);
    let known_files: HashSet<String> = ["src/lib.rs".to_string()].into_iter().collect();
    let resolver = Resolver::new(&root, &known_files);
    let edge = Edge {
        source_id: "src/lib.rs".to_string(),
        target_id: "serde::Serialize".to_string(),
        kind: EdgeKind::Imports,
    };
    assert!(resolver.resolve_edge(edge, Language::Rust).is_none());
}
