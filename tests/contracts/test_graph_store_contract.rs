//! Both `GraphStore` backends must satisfy the same capability contract.
//! Each check here runs once against `MemoryStore` and once against
//! `SqliteGraphStore::in_memory`, so a regression in either backend's
//! adherence to the trait surface shows up regardless of which store a
//! caller picked.

use cartograph_core::cancel::CancellationToken;
use cartograph_core::memory::MemoryStore;
use cartograph_core::sqlite::SqliteGraphStore;
use cartograph_core::store::GraphStore;
use cartograph_core::types::{
    ClusterNode, Direction, Edge, EdgeKind, FileNode, Language, SymbolKind, SymbolNode,
};

fn backends() -> Vec<Box<dyn GraphStore>> {
    vec![
        Box::new(MemoryStore::new()),
        Box::new(SqliteGraphStore::in_memory().unwrap()),
    ]
}

fn file(path: &str) -> FileNode {
    FileNode {
        path: path.to_string(),
        language: Language::Rust,
        loc: 4,
    }
}

fn symbol(file_path: &str, name: &str) -> SymbolNode {
    SymbolNode {
        name: name.to_string(),
        kind: SymbolKind::Function,
        exported: true,
        file_path: file_path.to_string(),
        start_line: 1,
        end_line: 3,
    }
}

#[test]
fn reinserting_a_file_keeps_the_last_write() {
    for store in backends() {
        store.add_file(file("a.rs")).unwrap();
        let mut updated = file("a.rs");
        updated.loc = 99;
        store.add_file(updated).unwrap();

        let got = store.get_file("a.rs").unwrap().unwrap();
        assert_eq!(got.loc, 99);
    }
}

#[test]
fn unknown_lookups_are_none_not_errors() {
    for store in backends() {
        assert!(store.get_file("missing.rs").unwrap().is_none());
        assert!(store.get_symbol("missing.rs", "Nope").unwrap().is_none());
    }
}

#[test]
fn query_symbols_is_case_insensitive_substring_with_limit() {
    for store in backends() {
        store.add_file(file("a.rs")).unwrap();
        for n in 0..5 {
            store.add_symbol(symbol("a.rs", &format!("Handle{n}"))).unwrap();
        }
        store
            .add_symbol(SymbolNode {
                kind: SymbolKind::Type,
                ..symbol("a.rs", "HandleType")
            })
            .unwrap();

        let all = store.query_symbols("HANDLE", None, 0).unwrap();
        assert_eq!(all.len(), 6);

        let limited = store.query_symbols("handle", None, 2).unwrap();
        assert_eq!(limited.len(), 2);

        let functions_only = store
            .query_symbols("handle", Some(SymbolKind::Function), 0)
            .unwrap();
        assert_eq!(functions_only.len(), 5);
    }
}

#[test]
fn dependency_traversal_respects_depth_and_direction() {
    for store in backends() {
        store.add_file(file("a.rs")).unwrap();
        store.add_file(file("b.rs")).unwrap();
        store.add_file(file("c.rs")).unwrap();
        store
            .add_edge(Edge {
                source_id: "a.rs".to_string(),
                target_id: "b.rs".to_string(),
                kind: EdgeKind::Imports,
            })
            .unwrap();
        store
            .add_edge(Edge {
                source_id: "b.rs".to_string(),
                target_id: "c.rs".to_string(),
                kind: EdgeKind::Imports,
            })
            .unwrap();

        let cancel = CancellationToken::new();
        let shallow = store
            .get_dependencies("a.rs", Direction::Downstream, 1, &cancel)
            .unwrap();
        assert_eq!(shallow.len(), 1);
        assert_eq!(shallow[0].nodes, vec!["a.rs", "b.rs"]);

        let upstream = store
            .get_dependencies("c.rs", Direction::Upstream, 5, &cancel)
            .unwrap();
        assert_eq!(upstream.len(), 2);
    }
}

#[test]
fn assess_impact_computes_risk_score() {
    for store in backends() {
        for f in ["a.rs", "b.rs", "c.rs", "d.rs"] {
            store.add_file(file(f)).unwrap();
        }
        for (src, dst) in [("a.rs", "b.rs"), ("a.rs", "c.rs"), ("b.rs", "d.rs"), ("c.rs", "d.rs")] {
            store
                .add_edge(Edge {
                    source_id: src.to_string(),
                    target_id: dst.to_string(),
                    kind: EdgeKind::Imports,
                })
                .unwrap();
        }

        let cancel = CancellationToken::new();
        let report = store
            .assess_impact(&["d.rs".to_string()], &cancel)
            .unwrap();
        assert_eq!(report.directly_affected.len(), 2);
        assert!((report.risk_score - 0.75).abs() < f64::EPSILON);
    }
}

#[test]
fn clusters_and_stats_round_trip() {
    for store in backends() {
        store.add_file(file("a.rs")).unwrap();
        store.add_file(file("b.rs")).unwrap();
        store
            .add_cluster(ClusterNode {
                name: "src/".to_string(),
                cohesion_score: 1.0,
                members: vec!["a.rs".to_string(), "b.rs".to_string()],
            })
            .unwrap();

        let clusters = store.get_clusters().unwrap();
        assert_eq!(clusters.len(), 1);

        let stats = store.stats().unwrap();
        assert_eq!(stats.file_count, 2);
        assert_eq!(stats.cluster_count, 1);
    }
}

#[test]
fn close_is_idempotent() {
    for store in backends() {
        store.close().unwrap();
        store.close().unwrap();
    }
}
