//! Persistent-backend-specific behavior: disk-backed opens, schema
//! idempotency, and that writes are safe against adversarial content since
//! they go through parameterized statements rather than string formatting.

use cartograph_core::sqlite::SqliteGraphStore;
use cartograph_core::store::GraphStore;
use cartograph_core::types::{FileNode, Language, SymbolKind, SymbolNode};

#[test]
fn reopening_the_same_path_sees_prior_data() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("graph.db");

    {
        let store = SqliteGraphStore::open(&db_path).unwrap();
        store
            .add_file(FileNode {
                path: "a.go".to_string(),
                language: Language::Go,
                loc: 3,
            })
            .unwrap();
        store.close().unwrap();
    }

    let reopened = SqliteGraphStore::open(&db_path).unwrap();
    assert!(reopened.get_file("a.go").unwrap().is_some());
}

#[test]
fn schema_init_is_idempotent_on_an_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("graph.db");
    let store = SqliteGraphStore::open(&db_path).unwrap();
    store.init_schema().unwrap();
    store.init_schema().unwrap();
    store
        .add_file(FileNode {
            path: "a.go".to_string(),
            language: Language::Go,
            loc: 1,
        })
        .unwrap();
}

#[test]
fn symbol_names_containing_sql_metacharacters_round_trip_unharmed() {
    let store = SqliteGraphStore::in_memory().unwrap();
    store
        .add_file(FileNode {
            path: "a.py".to_string(),
            language: Language::Python,
            loc: 1,
        })
        .unwrap();
    let dangerous_name = "foo'; DROP TABLE files; --";
    store
        .add_symbol(SymbolNode {
            name: dangerous_name.to_string(),
            kind: SymbolKind::Function,
            exported: true,
            file_path: "a.py".to_string(),
            start_line: 1,
            end_line: 1,
        })
        .unwrap();

    assert!(store.get_file("a.py").unwrap().is_some());
    let got = store.get_symbol("a.py", dangerous_name).unwrap().unwrap();
    assert_eq!(got.name, dangerous_name);
}

#[test]
fn closing_twice_is_safe_and_further_access_reports_a_backend_error() {
    let store = SqliteGraphStore::in_memory().unwrap();
    store.close().unwrap();
    store.close().unwrap();
    assert!(store.get_file("anything").is_err());
}
