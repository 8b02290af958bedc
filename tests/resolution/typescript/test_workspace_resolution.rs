use std::collections::HashSet;
use std::fs;

use cartograph_core::types::{Edge, EdgeKind, Language};
use cartograph_parsers::resolver::Resolver;

use crate::common::write_project;

#[test]
fn relative_import_missing_an_extension_probes_the_suffix_list() {
    let (_dir, root) = write_project(&[
        ("src/app.ts", "import { util } from './util';\n"),
        ("src/util.ts", "export const util = 1;\n"),
    ]);

    let known_files: HashSet<String> = ["src/app.ts", "src/util.ts"]
        .into_iter()
        .map(String::from)
        .collect();

    let resolver = Resolver::new(&root, &known_files);
    let edge = Edge {
        source_id: "src/app.ts".to_string(),
        target_id: "./util".to_string(),
        kind: EdgeKind::Imports,
    };

    let resolved = resolver.resolve_edge(edge, Language::TypeScript).unwrap();
    assert_eq!(resolved.target_id, "src/util.ts");
}

#[test]
fn workspace_package_specifier_resolves_through_its_manifest_exports() {
    let (_dir, root) = write_project(&[
        ("package.json", r#"{"name": "root", "workspaces": ["packages/*"]}"#),
        ("src/app.ts", "import { logger } from '@acme/logger';\n"),
        ("packages/logger/src/index.ts", "export const logger = {};\n"),
    ]);

    fs::write(
        root.join("packages/logger/package.json"),
        r#"{"name": "@acme/logger", "exports": "./src/index.ts"}"#,
    )
    .unwrap();

    let known_files: HashSet<String> = [
        "src/app.ts",
        "packages/logger/src/index.ts",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let resolver = Resolver::new(&root, &known_files);
    let edge = Edge {
        source_id: "src/app.ts".to_string(),
        target_id: "@acme/logger".to_string(),
        kind: EdgeKind::Imports,
    };

    let resolved = resolver.resolve_edge(edge, Language::TypeScript).unwrap();
    assert_eq!(resolved.target_id, "packages/logger/src/index.ts");
}

#[test]
fn unknown_bare_package_specifier_is_dropped() {
    let (_dir, root) = write_project(&[("src/app.ts", "import lodash from 'lodash';\n")]);
    let known_files: HashSet<String> = ["src/app.ts".to_string()].into_iter().collect();
    let resolver = Resolver::new(&root, &known_files);
    let edge = Edge {
        source_id: "src/app.ts".to_string(),
        target_id: "lodash".to_string(),
        kind: EdgeKind::Imports,
    };
    assert!(resolver.resolve_edge(edge, Language::TypeScript).is_none());
}
