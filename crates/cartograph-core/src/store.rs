use crate::cancel::CancellationToken;
use crate::types::{
    ClusterNode, CoreError, Direction, Edge, EdgeKind, FileNode, GraphStats, ImpactReport,
    SymbolKind, SymbolNode,
};

/// FROZEN CONTRACT — GraphStore trait.
///
/// Both store backends implement this exact capability set; callers program
/// against the trait object, never against a concrete backend. Do not widen
/// or narrow this surface without updating both implementations in lockstep.
///
/// Every method takes `&self`: implementations own whatever interior
/// mutability (a lock, a database handle) their backend needs, so the trait
/// itself never requires exclusive access.
pub trait GraphStore: Send + Sync {
    /// Prepares the backend for use. Must be safe to call more than once.
    fn init_schema(&self) -> Result<(), CoreError>;

    fn add_file(&self, file: FileNode) -> Result<(), CoreError>;
    fn add_symbol(&self, symbol: SymbolNode) -> Result<(), CoreError>;
    fn add_cluster(&self, cluster: ClusterNode) -> Result<(), CoreError>;
    fn add_edge(&self, edge: Edge) -> Result<(), CoreError>;

    fn get_file(&self, path: &str) -> Result<Option<FileNode>, CoreError>;
    fn get_symbol(&self, file_path: &str, name: &str) -> Result<Option<SymbolNode>, CoreError>;

    /// Case-insensitive substring search on symbol name. `limit <= 0` means
    /// unbounded. An optional kind filter narrows the match further.
    fn query_symbols(
        &self,
        query: &str,
        kind: Option<SymbolKind>,
        limit: i64,
    ) -> Result<Vec<SymbolNode>, CoreError>;

    fn get_dependencies(
        &self,
        node_id: &str,
        direction: Direction,
        max_depth: i64,
        cancel: &CancellationToken,
    ) -> Result<Vec<crate::types::DependencyChain>, CoreError>;

    fn assess_impact(
        &self,
        changed_files: &[String],
        cancel: &CancellationToken,
    ) -> Result<ImpactReport, CoreError>;

    fn get_clusters(&self) -> Result<Vec<ClusterNode>, CoreError>;

    fn get_all_edges(&self, kind: Option<EdgeKind>) -> Result<Vec<Edge>, CoreError>;

    /// All known files. Not part of the five public query operations — used
    /// internally by the persistence bridge and by tests.
    fn list_files(&self) -> Result<Vec<FileNode>, CoreError>;

    fn stats(&self) -> Result<GraphStats, CoreError>;

    fn close(&self) -> Result<(), CoreError>;
}
