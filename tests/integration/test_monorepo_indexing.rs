use cartograph_core::cancel::CancellationToken;
use cartograph_core::memory::MemoryStore;
use cartograph_core::types::EdgeKind;

use cartograph_index::orchestrator;

use crate::common::write_project;

#[test]
fn a_yarn_workspace_import_resolves_to_the_sibling_package_s_entry_point() {
    let (_dir, root) = write_project(&[
        (
            "package.json",
            r#"{"name": "root", "workspaces": ["packages/*"]}"#,
        ),
        (
            "packages/logger/package.json",
            r#"{"name": "@acme/logger", "exports": "./src/index.ts"}"#,
        ),
        ("packages/logger/src/index.ts", "export const log = (msg: string) => msg;\n"),
        (
            "apps/web/app.ts",
            "import { log } from '@acme/logger';\n\nexport function start(): void {\n  log('hi');\n}\n",
        ),
    ]);

    let store = MemoryStore::new();
    let cancel = CancellationToken::new();
    let stats = orchestrator::index_repository(&root, &store, None, None, &cancel).unwrap();
    assert_eq!(stats.file_count, 2);

    let edges = store.get_all_edges(Some(EdgeKind::Imports)).unwrap();
    assert!(edges
        .iter()
        .any(|e| e.source_id == "apps/web/app.ts" && e.target_id == "packages/logger/src/index.ts"));
}
