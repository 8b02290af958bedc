use std::collections::HashSet;
use std::sync::RwLock;

use crate::cancel::CancellationToken;
use crate::impact::assess_impact as compute_impact;
use crate::store::GraphStore;
use crate::traversal::bfs_dependencies;
use crate::types::{
    ClusterNode, CoreError, DependencyChain, Direction, Edge, EdgeKind, FileNode, GraphStats,
    ImpactReport, SymbolKind, SymbolNode,
};

#[derive(Default)]
struct Inner {
    files: std::collections::HashMap<String, FileNode>,
    symbols: std::collections::HashMap<String, SymbolNode>,
    clusters: std::collections::HashMap<String, ClusterNode>,
    edges: Vec<Edge>,
}

/// Single-process, all-in-memory graph store.
///
/// A single reader-writer lock protects the whole backend: any number of
/// concurrent readers, or one exclusive writer. Every accessor copies the
/// data it returns out from under the lock before releasing it.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for MemoryStore {
    fn init_schema(&self) -> Result<(), CoreError> {
        Ok(())
    }

    fn add_file(&self, file: FileNode) -> Result<(), CoreError> {
        let mut inner = self.inner.write().expect("memory store lock poisoned");
        inner.files.insert(file.path.clone(), file);
        Ok(())
    }

    fn add_symbol(&self, symbol: SymbolNode) -> Result<(), CoreError> {
        let mut inner = self.inner.write().expect("memory store lock poisoned");
        inner.symbols.insert(symbol.id(), symbol);
        Ok(())
    }

    fn add_cluster(&self, cluster: ClusterNode) -> Result<(), CoreError> {
        let mut inner = self.inner.write().expect("memory store lock poisoned");
        inner.clusters.insert(cluster.name.clone(), cluster);
        Ok(())
    }

    fn add_edge(&self, edge: Edge) -> Result<(), CoreError> {
        let mut inner = self.inner.write().expect("memory store lock poisoned");
        inner.edges.push(edge);
        Ok(())
    }

    fn get_file(&self, path: &str) -> Result<Option<FileNode>, CoreError> {
        let inner = self.inner.read().expect("memory store lock poisoned");
        Ok(inner.files.get(path).cloned())
    }

    fn get_symbol(&self, file_path: &str, name: &str) -> Result<Option<SymbolNode>, CoreError> {
        let inner = self.inner.read().expect("memory store lock poisoned");
        Ok(inner.symbols.get(&format!("{file_path}:{name}")).cloned())
    }

    fn query_symbols(
        &self,
        query: &str,
        kind: Option<SymbolKind>,
        limit: i64,
    ) -> Result<Vec<SymbolNode>, CoreError> {
        let inner = self.inner.read().expect("memory store lock poisoned");
        let needle = query.to_lowercase();
        let mut matches: Vec<SymbolNode> = inner
            .symbols
            .values()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .filter(|s| kind.map(|k| k == s.kind).unwrap_or(true))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id().cmp(&b.id()));
        if limit > 0 {
            matches.truncate(limit as usize);
        }
        Ok(matches)
    }

    fn get_dependencies(
        &self,
        node_id: &str,
        direction: Direction,
        max_depth: i64,
        cancel: &CancellationToken,
    ) -> Result<Vec<DependencyChain>, CoreError> {
        let inner = self.inner.read().expect("memory store lock poisoned");
        bfs_dependencies(&inner.edges, node_id, direction, max_depth, cancel)
    }

    fn assess_impact(
        &self,
        changed_files: &[String],
        cancel: &CancellationToken,
    ) -> Result<ImpactReport, CoreError> {
        let inner = self.inner.read().expect("memory store lock poisoned");
        if cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        let changed: HashSet<String> = changed_files.iter().cloned().collect();
        Ok(compute_impact(&inner.edges, inner.files.len(), &changed))
    }

    fn get_clusters(&self) -> Result<Vec<ClusterNode>, CoreError> {
        let inner = self.inner.read().expect("memory store lock poisoned");
        Ok(inner.clusters.values().cloned().collect())
    }

    fn get_all_edges(&self, kind: Option<EdgeKind>) -> Result<Vec<Edge>, CoreError> {
        let inner = self.inner.read().expect("memory store lock poisoned");
        Ok(inner
            .edges
            .iter()
            .filter(|e| kind.map(|k| k == e.kind).unwrap_or(true))
            .cloned()
            .collect())
    }

    fn list_files(&self) -> Result<Vec<FileNode>, CoreError> {
        let inner = self.inner.read().expect("memory store lock poisoned");
        Ok(inner.files.values().cloned().collect())
    }

    fn stats(&self) -> Result<GraphStats, CoreError> {
        let inner = self.inner.read().expect("memory store lock poisoned");
        Ok(GraphStats {
            file_count: inner.files.len(),
            symbol_count: inner.symbols.len(),
            cluster_count: inner.clusters.len(),
            edge_count: inner.edges.len(),
        })
    }

    fn close(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
