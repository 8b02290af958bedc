use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::cancel::CancellationToken;
use crate::impact::assess_impact as compute_impact;
use crate::store::GraphStore;
use crate::traversal::bfs_dependencies;
use crate::types::{
    ClusterNode, CoreError, DependencyChain, Direction, Edge, EdgeKind, FileNode, GraphStats,
    ImpactReport, Language, SymbolKind, SymbolNode,
};

/// Durable, directory-backed implementation of [`GraphStore`] on top of
/// SQLite. The connection is wrapped in a mutex so the backend can satisfy
/// `Send + Sync` while every trait method still only needs `&self`.
pub struct SqliteGraphStore {
    conn: Mutex<Option<Connection>>,
}

impl SqliteGraphStore {
    pub fn open(path: &std::path::Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(|e| CoreError::backend("sqlite", e))?;
        let store = SqliteGraphStore {
            conn: Mutex::new(Some(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(|e| CoreError::backend("sqlite", e))?;
        let store = SqliteGraphStore {
            conn: Mutex::new(Some(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, CoreError> {
        let guard = self.conn.lock().expect("sqlite store lock poisoned");
        let conn = guard
            .as_ref()
            .ok_or_else(|| CoreError::backend("sqlite", "store is closed"))?;
        f(conn).map_err(|e| CoreError::backend("sqlite", e))
    }

    fn all_edges_internal(&self, conn: &Connection) -> rusqlite::Result<Vec<Edge>> {
        let mut stmt = conn.prepare("SELECT source_id, target_id, kind FROM edges")?;
        let rows = stmt.query_map([], |row| {
            let kind_str: String = row.get(2)?;
            Ok(Edge {
                source_id: row.get(0)?,
                target_id: row.get(1)?,
                kind: EdgeKind::from_str_opt(&kind_str).unwrap_or(EdgeKind::Imports),
            })
        })?;
        rows.collect()
    }
}

fn language_from_str(s: &str) -> Language {
    match s {
        "go" => Language::Go,
        "typescript" => Language::TypeScript,
        "python" => Language::Python,
        _ => Language::Rust,
    }
}

fn kind_from_str(s: &str) -> SymbolKind {
    match s {
        "function" => SymbolKind::Function,
        "method" => SymbolKind::Method,
        "class" => SymbolKind::Class,
        "type" => SymbolKind::Type,
        "enum" => SymbolKind::Enum,
        "interface" => SymbolKind::Interface,
        _ => SymbolKind::Variable,
    }
}

impl GraphStore for SqliteGraphStore {
    fn init_schema(&self) -> Result<(), CoreError> {
        self.with_conn(|conn| {
            conn.execute_batch(
                "
                CREATE TABLE IF NOT EXISTS files (
                    path TEXT PRIMARY KEY,
                    language TEXT NOT NULL,
                    loc INTEGER NOT NULL
                );

                CREATE TABLE IF NOT EXISTS symbols (
                    file_path TEXT NOT NULL,
                    name TEXT NOT NULL,
                    kind TEXT NOT NULL,
                    exported INTEGER NOT NULL,
                    start_line INTEGER NOT NULL,
                    end_line INTEGER NOT NULL,
                    PRIMARY KEY (file_path, name)
                );
                CREATE INDEX IF NOT EXISTS idx_symbols_name ON symbols(name);

                CREATE TABLE IF NOT EXISTS clusters (
                    name TEXT PRIMARY KEY,
                    cohesion_score REAL NOT NULL,
                    members TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS edges (
                    source_id TEXT NOT NULL,
                    target_id TEXT NOT NULL,
                    kind TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_edges_source ON edges(source_id);
                CREATE INDEX IF NOT EXISTS idx_edges_target ON edges(target_id);
                ",
            )
        })
    }

    fn add_file(&self, file: FileNode) -> Result<(), CoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO files (path, language, loc) VALUES (?1, ?2, ?3)",
                params![file.path, file.language.as_str(), file.loc],
            )
            .map(|_| ())
        })
    }

    fn add_symbol(&self, symbol: SymbolNode) -> Result<(), CoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO symbols
                    (file_path, name, kind, exported, start_line, end_line)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    symbol.file_path,
                    symbol.name,
                    symbol.kind.as_str(),
                    symbol.exported as i64,
                    symbol.start_line,
                    symbol.end_line,
                ],
            )
            .map(|_| ())
        })
    }

    fn add_cluster(&self, cluster: ClusterNode) -> Result<(), CoreError> {
        let members_json = serde_json::to_string(&cluster.members)
            .map_err(|e| CoreError::backend("sqlite", e))?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO clusters (name, cohesion_score, members)
                 VALUES (?1, ?2, ?3)",
                params![cluster.name, cluster.cohesion_score, members_json],
            )
            .map(|_| ())
        })
    }

    fn add_edge(&self, edge: Edge) -> Result<(), CoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO edges (source_id, target_id, kind) VALUES (?1, ?2, ?3)",
                params![edge.source_id, edge.target_id, edge.kind.as_str()],
            )
            .map(|_| ())
        })
    }

    fn get_file(&self, path: &str) -> Result<Option<FileNode>, CoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT path, language, loc FROM files WHERE path = ?1",
                params![path],
                |row| {
                    let lang: String = row.get(1)?;
                    Ok(FileNode {
                        path: row.get(0)?,
                        language: language_from_str(&lang),
                        loc: row.get(2)?,
                    })
                },
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })
        })
    }

    fn get_symbol(&self, file_path: &str, name: &str) -> Result<Option<SymbolNode>, CoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT file_path, name, kind, exported, start_line, end_line
                 FROM symbols WHERE file_path = ?1 AND name = ?2",
                params![file_path, name],
                |row| {
                    let kind: String = row.get(2)?;
                    let exported: i64 = row.get(3)?;
                    Ok(SymbolNode {
                        file_path: row.get(0)?,
                        name: row.get(1)?,
                        kind: kind_from_str(&kind),
                        exported: exported != 0,
                        start_line: row.get(4)?,
                        end_line: row.get(5)?,
                    })
                },
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })
        })
    }

    fn query_symbols(
        &self,
        query: &str,
        kind: Option<SymbolKind>,
        limit: i64,
    ) -> Result<Vec<SymbolNode>, CoreError> {
        self.with_conn(|conn| {
            let pattern = format!("%{query}%");
            let sql = match (kind.is_some(), limit > 0) {
                (true, true) => {
                    "SELECT file_path, name, kind, exported, start_line, end_line FROM symbols
                     WHERE name LIKE ?1 AND kind = ?2
                     ORDER BY file_path, name LIMIT ?3"
                }
                (true, false) => {
                    "SELECT file_path, name, kind, exported, start_line, end_line FROM symbols
                     WHERE name LIKE ?1 AND kind = ?2
                     ORDER BY file_path, name"
                }
                (false, true) => {
                    "SELECT file_path, name, kind, exported, start_line, end_line FROM symbols
                     WHERE name LIKE ?1
                     ORDER BY file_path, name LIMIT ?3"
                }
                (false, false) => {
                    "SELECT file_path, name, kind, exported, start_line, end_line FROM symbols
                     WHERE name LIKE ?1
                     ORDER BY file_path, name"
                }
            };

            let mut stmt = conn.prepare(sql)?;
            let map_row = |row: &rusqlite::Row| -> rusqlite::Result<SymbolNode> {
                let kind_str: String = row.get(2)?;
                let exported: i64 = row.get(3)?;
                Ok(SymbolNode {
                    file_path: row.get(0)?,
                    name: row.get(1)?,
                    kind: kind_from_str(&kind_str),
                    exported: exported != 0,
                    start_line: row.get(4)?,
                    end_line: row.get(5)?,
                })
            };

            let rows = match (kind, limit > 0) {
                (Some(k), true) => {
                    stmt.query_map(params![pattern, k.as_str(), limit], map_row)?.collect()
                }
                (Some(k), false) => {
                    stmt.query_map(params![pattern, k.as_str()], map_row)?.collect()
                }
                (None, true) => stmt.query_map(params![pattern, limit], map_row)?.collect(),
                (None, false) => stmt.query_map(params![pattern], map_row)?.collect(),
            };
            rows
        })
    }

    fn get_dependencies(
        &self,
        node_id: &str,
        direction: Direction,
        max_depth: i64,
        cancel: &CancellationToken,
    ) -> Result<Vec<DependencyChain>, CoreError> {
        let edges = self.with_conn(|conn| self.all_edges_internal(conn))?;
        bfs_dependencies(&edges, node_id, direction, max_depth, cancel)
    }

    fn assess_impact(
        &self,
        changed_files: &[String],
        cancel: &CancellationToken,
    ) -> Result<ImpactReport, CoreError> {
        if cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        let (edges, file_count) = self.with_conn(|conn| {
            let edges = self.all_edges_internal(conn)?;
            let file_count: i64 = conn.query_row("SELECT COUNT(*) FROM files", [], |r| r.get(0))?;
            Ok((edges, file_count as usize))
        })?;
        let changed: std::collections::HashSet<String> = changed_files.iter().cloned().collect();
        Ok(compute_impact(&edges, file_count, &changed))
    }

    fn get_clusters(&self) -> Result<Vec<ClusterNode>, CoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT name, cohesion_score, members FROM clusters")?;
            let rows = stmt.query_map([], |row| {
                let members_json: String = row.get(2)?;
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?, members_json))
            })?;
            let mut clusters = Vec::new();
            for row in rows {
                let (name, cohesion_score, members_json) = row?;
                let members: Vec<String> = serde_json::from_str(&members_json).unwrap_or_default();
                clusters.push(ClusterNode {
                    name,
                    cohesion_score,
                    members,
                });
            }
            Ok(clusters)
        })
    }

    fn get_all_edges(&self, kind: Option<EdgeKind>) -> Result<Vec<Edge>, CoreError> {
        self.with_conn(|conn| {
            let edges = self.all_edges_internal(conn)?;
            Ok(match kind {
                Some(k) => edges.into_iter().filter(|e| e.kind == k).collect(),
                None => edges,
            })
        })
    }

    fn list_files(&self) -> Result<Vec<FileNode>, CoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT path, language, loc FROM files")?;
            let rows = stmt.query_map([], |row| {
                let lang: String = row.get(1)?;
                Ok(FileNode {
                    path: row.get(0)?,
                    language: language_from_str(&lang),
                    loc: row.get(2)?,
                })
            })?;
            rows.collect()
        })
    }

    fn stats(&self) -> Result<GraphStats, CoreError> {
        self.with_conn(|conn| {
            let file_count: i64 = conn.query_row("SELECT COUNT(*) FROM files", [], |r| r.get(0))?;
            let symbol_count: i64 =
                conn.query_row("SELECT COUNT(*) FROM symbols", [], |r| r.get(0))?;
            let cluster_count: i64 =
                conn.query_row("SELECT COUNT(*) FROM clusters", [], |r| r.get(0))?;
            let edge_count: i64 = conn.query_row("SELECT COUNT(*) FROM edges", [], |r| r.get(0))?;
            Ok(GraphStats {
                file_count: file_count as usize,
                symbol_count: symbol_count as usize,
                cluster_count: cluster_count as usize,
                edge_count: edge_count as usize,
            })
        })
    }

    fn close(&self) -> Result<(), CoreError> {
        let mut guard = self.conn.lock().expect("sqlite store lock poisoned");
        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, e)| CoreError::backend("sqlite", e))?;
        }
        Ok(())
    }
}
