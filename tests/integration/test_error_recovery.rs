use cartograph_core::cancel::CancellationToken;
use cartograph_core::memory::MemoryStore;

use cartograph_index::orchestrator;

use crate::common::write_project;

#[test]
fn syntactically_broken_source_still_produces_a_result_instead_of_aborting() {
    let (_dir, root) = write_project(&[
        ("good.go", "package main\n\nfunc main() {}\n"),
        ("broken.go", "package main\n\nfunc Broken( {{{\n"),
    ]);

    let store = MemoryStore::new();
    let cancel = CancellationToken::new();
    let stats = orchestrator::index_repository(&root, &store, None, None, &cancel).unwrap();

    assert_eq!(stats.file_count, 2);
    assert!(store.get_file("good.go").unwrap().is_some());
    assert!(store.get_file("broken.go").unwrap().is_some());
}

#[test]
fn unsupported_extensions_are_skipped_alongside_supported_files() {
    let (_dir, root) = write_project(&[
        ("main.go", "package main\n\nfunc main() {}\n"),
        ("notes.txt", "just some notes\n"),
        ("data.json", "{}\n"),
    ]);

    let store = MemoryStore::new();
    let cancel = CancellationToken::new();
    let stats = orchestrator::index_repository(&root, &store, None, None, &cancel).unwrap();
    assert_eq!(stats.file_count, 1);
}
